//! Module for parsing and representing Euclidean TSP instances.
//!
//! City files hold one record per line: an integer id followed by integer
//! X and Y coordinates. Ids are discarded; rows are assumed to be sorted by id,
//! so a city's identity is its position in the file.

use crate::error::{Error, Result};
use crate::matrix::Distance;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Largest absolute coordinate accepted by the loader.
///
/// Keeps every pairwise distance below 2^33, so tour lengths over any
/// practical number of cities fit in a [`Distance`].
pub const MAX_COORDINATE: i64 = 1 << 31;

/// A city with integer planar coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// X coordinate
    pub x: i64,
    /// Y coordinate
    pub y: i64,
}

impl City {
    pub fn new(x: i64, y: i64) -> Self {
        City { x, y }
    }

    /// Euclidean distance to `other`, rounded to the nearest integer
    #[inline]
    pub fn distance_to(&self, other: &City) -> Distance {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt().round() as Distance
    }
}

/// Represents a complete TSP instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TspInstance {
    /// Name of the instance (file stem when loaded from disk)
    pub name: String,
    /// Cities in file order
    pub cities: Vec<City>,
}

impl TspInstance {
    pub fn new(name: impl Into<String>, cities: Vec<City>) -> Self {
        TspInstance {
            name: name.into(),
            cities,
        }
    }

    /// Parse an instance from a city file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::configuration(format!("cannot open {}: {}", path.display(), e))
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "instance".to_string());

        Self::from_reader(name, BufReader::new(file))
    }

    /// Parse an instance from any buffered reader
    pub fn from_reader<R: BufRead>(name: impl Into<String>, reader: R) -> Result<Self> {
        let mut cities = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line
                .map_err(|e| Error::configuration(format!("line {}: read error: {}", line_no, e)))?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return Err(Error::configuration(format!(
                    "line {}: expected `id x y`, found {:?}",
                    line_no, line
                )));
            }

            parts[0].parse::<i64>().map_err(|_| {
                Error::configuration(format!("line {}: invalid city id {:?}", line_no, parts[0]))
            })?;
            let x = parse_coordinate(parts[1], "x", line_no)?;
            let y = parse_coordinate(parts[2], "y", line_no)?;

            cities.push(City::new(x, y));
        }

        if cities.is_empty() {
            return Err(Error::configuration("input contains no cities"));
        }

        Ok(TspInstance::new(name, cities))
    }

    /// Generate a reproducible random instance with coordinates in `[0, extent]`
    ///
    /// `extent` is clamped to [`MAX_COORDINATE`].
    pub fn random(num_cities: usize, extent: i64, seed: u64) -> Self {
        use rand::prelude::*;
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let extent = extent.clamp(0, MAX_COORDINATE);

        let cities = (0..num_cities)
            .map(|_| City::new(rng.gen_range(0..=extent), rng.gen_range(0..=extent)))
            .collect();

        TspInstance::new(format!("random-{}-{}", num_cities, seed), cities)
    }

    /// Write the instance in the same `id x y` format `from_file` reads
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for (id, city) in self.cities.iter().enumerate() {
            writeln!(writer, "{} {} {}", id + 1, city.x, city.y)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Number of cities
    pub fn dimension(&self) -> usize {
        self.cities.len()
    }

    /// Get statistics about the instance
    pub fn statistics(&self) -> InstanceStatistics {
        let min_x = self.cities.iter().map(|c| c.x).min().unwrap_or(0);
        let max_x = self.cities.iter().map(|c| c.x).max().unwrap_or(0);
        let min_y = self.cities.iter().map(|c| c.y).min().unwrap_or(0);
        let max_y = self.cities.iter().map(|c| c.y).max().unwrap_or(0);

        let mut sorted = self.cities.clone();
        sorted.sort_by_key(|c| (c.x, c.y));
        sorted.dedup();

        InstanceStatistics {
            name: self.name.clone(),
            dimension: self.dimension(),
            distinct_locations: sorted.len(),
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }
}

fn parse_coordinate(token: &str, axis: &str, line_no: usize) -> Result<i64> {
    let value: i64 = token.parse().map_err(|_| {
        Error::configuration(format!("line {}: invalid {} coordinate {:?}", line_no, axis, token))
    })?;
    if value.unsigned_abs() > MAX_COORDINATE as u64 {
        return Err(Error::configuration(format!(
            "line {}: {} coordinate {} outside [-{}, {}]",
            line_no, axis, value, MAX_COORDINATE, MAX_COORDINATE
        )));
    }
    Ok(value)
}

/// Statistics about a TSP instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub dimension: usize,
    pub distinct_locations: usize,
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Cities: {}", self.dimension)?;
        writeln!(f, "  Distinct locations: {}", self.distinct_locations)?;
        writeln!(f, "  X range: [{}, {}]", self.min_x, self.max_x)?;
        writeln!(f, "  Y range: [{}, {}]", self.min_y, self.max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_distance_calculation() {
        let a = City::new(0, 0);
        let b = City::new(3, 4);
        assert_eq!(a.distance_to(&b), 5);
        assert_eq!(b.distance_to(&a), 5);

        // sqrt(200) = 14.14.. rounds down
        assert_eq!(City::new(0, 0).distance_to(&City::new(10, 10)), 14);
        assert_eq!(City::new(0, 0).distance_to(&City::new(1, 1)), 1);
        assert_eq!(City::new(0, 0).distance_to(&City::new(2, 2)), 3);
    }

    #[test]
    fn test_parse_records() {
        let input = "1 0 0\n2 0 10\n\n3 10 10\n4 10 0 trailing\n";
        let instance = TspInstance::from_reader("square", Cursor::new(input)).unwrap();

        assert_eq!(instance.name, "square");
        assert_eq!(instance.dimension(), 4);
        assert_eq!(instance.cities[1], City::new(0, 10));
        assert_eq!(instance.cities[3], City::new(10, 0));
    }

    #[test]
    fn test_parse_rejects_malformed_line() {
        let err = TspInstance::from_reader("bad", Cursor::new("1 0 0\n2 5\n")).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("line 2"));

        let err = TspInstance::from_reader("bad", Cursor::new("1 0 zero\n")).unwrap_err();
        assert!(err.to_string().contains("invalid y coordinate"));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        let err = TspInstance::from_reader("empty", Cursor::new("\n\n")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_parse_rejects_out_of_range_coordinate() {
        let input = "1 9223372036854775807 0\n2 -1 0\n";
        let err = TspInstance::from_reader("huge", Cursor::new(input)).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("line 1"));

        let input = format!("1 {} 0\n2 0 {}\n", MAX_COORDINATE, -MAX_COORDINATE);
        let instance = TspInstance::from_reader("edge", Cursor::new(input)).unwrap();
        assert_eq!(instance.dimension(), 2);
    }

    #[test]
    fn test_distance_at_extreme_coordinates() {
        let a = City::new(i64::MAX, 0);
        let b = City::new(-1, 0);
        assert!(a.distance_to(&b) > 0);

        let c = City::new(MAX_COORDINATE, MAX_COORDINATE);
        let d = City::new(-MAX_COORDINATE, -MAX_COORDINATE);
        let expected = ((2.0 * MAX_COORDINATE as f64).powi(2) * 2.0).sqrt().round() as Distance;
        assert_eq!(c.distance_to(&d), expected);
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = TspInstance::from_file("/nonexistent/cities.txt").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = TspInstance::random(50, 1000, 7);
        let b = TspInstance::random(50, 1000, 7);
        let c = TspInstance::random(50, 1000, 8);

        assert_eq!(a.cities, b.cities);
        assert_ne!(a.cities, c.cities);
        assert!(a.cities.iter().all(|c| (0..=1000).contains(&c.x) && (0..=1000).contains(&c.y)));
    }

    #[test]
    fn test_save_and_reload() {
        let instance = TspInstance::random(12, 100, 3);
        let path = std::env::temp_dir().join("christofides_tsp_instance_roundtrip.txt");
        instance.save(&path).unwrap();

        let reloaded = TspInstance::from_file(&path).unwrap();
        assert_eq!(reloaded.cities, instance.cities);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_statistics() {
        let cities = vec![City::new(0, 0), City::new(0, 10), City::new(10, 10), City::new(0, 0)];
        let stats = TspInstance::new("dup", cities).statistics();
        assert_eq!(stats.dimension, 4);
        assert_eq!(stats.distinct_locations, 3);
        assert_eq!((stats.min_x, stats.max_x, stats.min_y, stats.max_y), (0, 10, 0, 10));
    }
}
