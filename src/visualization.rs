//! Visualization utilities for TSP tours.
//!
//! Generates SVG drawings of a tour or of the matched multigraph it was
//! extracted from. PNG output needs the `resvg` feature.

use crate::graph::Multigraph;
use crate::instance::TspInstance;
use crate::solution::Solution;
use std::fs::File;
use std::io::Write;
use std::path::Path;
#[cfg(feature = "resvg")]
use resvg::usvg;
#[cfg(feature = "resvg")]
use resvg::render;
#[cfg(feature = "resvg")]
use resvg::FitTo;
#[cfg(feature = "resvg")]
use resvg::tiny_skia::{Pixmap, Transform};
#[cfg(feature = "resvg")]
use resvg::usvg::TreeParsing;

/// SVG visualization generator
pub struct Visualizer {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Margin
    pub margin: f64,
    /// City radius
    pub node_radius: f64,
    /// Draw city indices next to the markers
    pub labels: bool,
}

impl Default for Visualizer {
    fn default() -> Self {
        Visualizer {
            width: 800.0,
            height: 800.0,
            margin: 50.0,
            node_radius: 4.0,
            labels: true,
        }
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn header(&self, title: &str) -> String {
        format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<style>
    .city {{ fill: #3498db; stroke: #2c3e50; stroke-width: 1; }}
    .start {{ fill: #e74c3c; stroke: #c0392b; stroke-width: 2; }}
    .edge {{ stroke: #34495e; stroke-width: 2; fill: none; }}
    .matching {{ stroke: #e67e22; stroke-width: 2; stroke-dasharray: 6,4; fill: none; }}
    .label {{ font-family: Arial; font-size: 10px; fill: #2c3e50; }}
    .title {{ font-family: Arial; font-size: 14px; fill: #2c3e50; font-weight: bold; }}
</style>
<rect width="100%" height="100%" fill="#ecf0f1"/>
<text x="{m}" y="25" class="title">{title}</text>
"##,
            w = self.width,
            h = self.height,
            m = self.margin,
            title = title
        )
    }

    /// Map instance coordinates onto the canvas (y axis pointing up)
    fn projection(&self, instance: &TspInstance) -> impl Fn(i64, i64) -> (f64, f64) {
        let stats = instance.statistics();
        let (min_x, min_y) = (stats.min_x as f64, stats.min_y as f64);
        let scale_x = (self.width - 2.0 * self.margin) / ((stats.max_x - stats.min_x) as f64).max(1.0);
        let scale_y = (self.height - 2.0 * self.margin) / ((stats.max_y - stats.min_y) as f64).max(1.0);
        let scale = scale_x.min(scale_y);
        let (margin, height) = (self.margin, self.height);

        move |x, y| {
            (
                margin + (x as f64 - min_x) * scale,
                height - margin - (y as f64 - min_y) * scale,
            )
        }
    }

    fn push_line(svg: &mut String, (x1, y1): (f64, f64), (x2, y2): (f64, f64), class: &str) {
        svg.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="{}"/>
"#,
            x1, y1, x2, y2, class
        ));
    }

    fn push_cities(&self, svg: &mut String, instance: &TspInstance, start: Option<usize>) {
        let project = self.projection(instance);
        for (id, city) in instance.cities.iter().enumerate() {
            let (x, y) = project(city.x, city.y);
            let class = if Some(id) == start { "start" } else { "city" };
            svg.push_str(&format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="{}" class="{}"/>
"#,
                x, y, self.node_radius, class
            ));
            if self.labels {
                svg.push_str(&format!(
                    r#"<text x="{:.2}" y="{:.2}" class="label" text-anchor="middle">{}</text>
"#,
                    x,
                    y - self.node_radius - 3.0,
                    id
                ));
            }
        }
    }

    /// Generate SVG visualization of a solution
    pub fn generate_svg(&self, instance: &TspInstance, solution: &Solution) -> String {
        let title = format!(
            "Instance: {} | Length: {} | Start: {}",
            instance.name, solution.length, solution.start
        );
        let mut svg = self.header(&title);
        let project = self.projection(instance);

        for w in solution.tour.windows(2) {
            let (a, b) = (&instance.cities[w[0]], &instance.cities[w[1]]);
            Self::push_line(&mut svg, project(a.x, a.y), project(b.x, b.y), "edge");
        }

        self.push_cities(&mut svg, instance, solution.tour.first().copied());
        svg.push_str("</svg>");
        svg
    }

    /// Generate SVG of a matched multigraph; edges listed in `matched` are dashed
    pub fn generate_graph_svg(&self, instance: &TspInstance, graph: &Multigraph, matched: &[(usize, usize)]) -> String {
        let title = format!(
            "Instance: {} | Edges: {} | Matched: {}",
            instance.name,
            graph.edge_count(),
            matched.len()
        );
        let mut svg = self.header(&title);
        let project = self.projection(instance);

        let mut remaining_matched: Vec<(usize, usize)> =
            matched.iter().map(|&(u, v)| (u.min(v), u.max(v))).collect();
        for (u, v) in graph.edges() {
            let class = match remaining_matched.iter().position(|&e| e == (u, v)) {
                Some(pos) => {
                    remaining_matched.swap_remove(pos);
                    "matching"
                }
                None => "edge",
            };
            let (a, b) = (&instance.cities[u], &instance.cities[v]);
            Self::push_line(&mut svg, project(a.x, a.y), project(b.x, b.y), class);
        }

        self.push_cities(&mut svg, instance, None);
        svg.push_str("</svg>");
        svg
    }

    /// Save SVG to file
    pub fn save_svg<P: AsRef<Path>>(&self, svg: &str, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(svg.as_bytes())?;
        Ok(())
    }

    /// Render SVG to a PNG file (requires the `resvg` feature)
    pub fn save_png<P: AsRef<Path>>(&self, svg: &str, path: P) -> std::io::Result<()> {
        #[cfg(feature = "resvg")]
        {
            let opt = usvg::Options::default();
            let rtree = usvg::Tree::from_str(svg, &opt)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("usvg parse error: {}", e)))?;
            let mut pixmap = Pixmap::new(self.width.max(1.0) as u32, self.height.max(1.0) as u32)
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "Failed to create pixmap"))?;
            render(&rtree, FitTo::Original, Transform::default(), pixmap.as_mut())
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "resvg render failed"))?;
            pixmap
                .save_png(path.as_ref())
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("save_png failed: {}", e)))?;
            return Ok(());
        }

        #[cfg(not(feature = "resvg"))]
        {
            let _ = (svg, path);
            Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "PNG rendering requires the `resvg` feature",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::matching::greedy_odd_matching;
    use crate::heuristics::spanning_tree::prim;
    use crate::instance::City;
    use crate::matrix::DistanceMatrix;

    fn square() -> TspInstance {
        let cities = vec![City::new(0, 0), City::new(0, 10), City::new(10, 10), City::new(10, 0)];
        TspInstance::new("square", cities)
    }

    #[test]
    fn test_tour_svg() {
        let instance = square();
        let matrix = DistanceMatrix::build(&instance.cities, 1).unwrap();
        let solution = Solution::from_tour(&matrix, vec![0, 1, 2, 3, 0], "test");

        let svg = Visualizer::new().generate_svg(&instance, &solution);

        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Length: 40"));
        assert_eq!(svg.matches("class=\"edge\"").count(), 4);
        assert_eq!(svg.matches("class=\"start\"").count(), 1);
    }

    #[test]
    fn test_graph_svg_marks_matching_edges() {
        let instance = square();
        let matrix = DistanceMatrix::build(&instance.cities, 1).unwrap();
        let mut graph = prim(&matrix).graph;
        let matched = greedy_odd_matching(&mut graph, &matrix);

        let svg = Visualizer::new().generate_graph_svg(&instance, &graph, &matched);

        assert_eq!(svg.matches("class=\"matching\"").count(), 1);
        assert_eq!(svg.matches("class=\"edge\"").count(), 3);
    }

    #[test]
    fn test_single_city_projection() {
        let instance = TspInstance::new("one", vec![City::new(5, 5)]);
        let matrix = DistanceMatrix::build(&instance.cities, 1).unwrap();
        let solution = Solution::from_tour(&matrix, vec![0, 0], "test");

        let svg = Visualizer { labels: false, ..Visualizer::new() }.generate_svg(&instance, &solution);
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("class=\"label\""));
    }
}
