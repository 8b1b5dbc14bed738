//! Christofides TSP Solver - Command Line Interface
//!
//! Builds approximate tours for Euclidean TSP instances.

use christofides_tsp::benchmark::{load_instances_from_dir, Benchmark, BenchmarkConfig};
use christofides_tsp::error::{Error, Result};
use christofides_tsp::heuristics::construction::TourGenerator;
use christofides_tsp::heuristics::local_search::{TwoOptSearch, DEFAULT_TWO_OPT_PASSES};
use christofides_tsp::heuristics::spanning_tree::prim;
use christofides_tsp::instance::TspInstance;
use christofides_tsp::matrix::DistanceMatrix;
use christofides_tsp::solver::{ChristofidesSolver, SolverConfig};
use christofides_tsp::visualization::Visualizer;
use clap::{Parser, Subcommand};

use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "christofides-tsp")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "Christofides-style tour construction with 2-opt for the Euclidean TSP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single instance
    Solve {
        /// City file (`id x y` per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Write the tour file here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the solution as JSON here
        #[arg(long)]
        json: Option<PathBuf>,

        /// Worker threads (defaults to available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Number of start vertices to evaluate (defaults to all)
        #[arg(short, long)]
        starts: Option<usize>,

        /// Maximum 2-opt sweeps per tour
        #[arg(short, long, default_value_t = DEFAULT_TWO_OPT_PASSES)]
        passes: usize,

        /// Render the tour next to the input file
        #[arg(long)]
        visualize: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run benchmarks on a directory of instances
    Benchmark {
        /// Directory containing instance files
        #[arg(short, long)]
        dir: PathBuf,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Number of runs per configuration
        #[arg(short, long, default_value = "3")]
        runs: usize,

        /// Worker counts to compare
        #[arg(short, long, num_args = 1..)]
        workers: Vec<usize>,

        /// 2-opt pass budgets to compare
        #[arg(short, long, num_args = 1..)]
        passes: Vec<usize>,

        /// Start vertices per run (defaults to all)
        #[arg(short, long)]
        starts: Option<usize>,
    },

    /// Analyze an instance
    Analyze {
        /// City file
        #[arg(short, long)]
        input: PathBuf,

        /// Render the matched multigraph next to the input file
        #[arg(long)]
        visualize: bool,
    },

    /// Generate a random instance
    Generate {
        /// Number of cities
        #[arg(short, long)]
        cities: usize,

        /// Coordinates are drawn from [0, extent]
        #[arg(short, long, default_value = "1000")]
        extent: i64,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output city file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Solve { input, output, json, workers, starts, passes, visualize, verbose } => {
            let config = SolverConfig {
                workers: workers.unwrap_or_else(|| SolverConfig::default().workers),
                starts,
                two_opt_passes: passes,
            };
            solve_instance(&input, config, output, json, visualize, verbose)
        }

        Commands::Benchmark { dir, output, runs, workers, passes, starts } => {
            let defaults = BenchmarkConfig::default();
            let config = BenchmarkConfig {
                num_runs: runs,
                worker_counts: if workers.is_empty() { defaults.worker_counts } else { workers },
                two_opt_passes: if passes.is_empty() { defaults.two_opt_passes } else { passes },
                starts,
                progress: true,
            };
            run_benchmark(&dir, &output, config)
        }

        Commands::Analyze { input, visualize } => analyze_instance(&input, visualize),

        Commands::Generate { cities, extent, seed, output } => generate_instance(cities, extent, seed, &output),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn solve_instance(
    path: &Path,
    config: SolverConfig,
    output: Option<PathBuf>,
    json: Option<PathBuf>,
    visualize: bool,
    verbose: bool,
) -> Result<()> {
    println!("Loading instance from {:?}...", path);
    let instance = TspInstance::from_file(path)?;

    if verbose {
        println!("{}", instance.statistics());
    }

    println!(
        "Solving with {} workers, {} starts, {} 2-opt passes...",
        config.workers,
        config.starts.map_or_else(|| "all".to_string(), |s| s.to_string()),
        config.two_opt_passes
    );

    let solution = ChristofidesSolver::new(config).solve(&instance)?;

    println!("\n========== Results ==========");
    println!("Algorithm: {}", solution.algorithm);
    println!("Length: {}", solution.length);
    println!("Best start: {}", solution.start);
    println!("Time: {:.4}s", solution.computation_time);
    if let Some(passes) = solution.iterations {
        println!("2-opt passes: {}", passes);
    }

    if verbose {
        println!("\nTour: {:?}", solution.tour);
    }

    if let Some(out_path) = output {
        solution.save(&out_path)?;
        println!("\nTour saved to {:?}", out_path);
    }

    if let Some(json_path) = json {
        solution.save_json(&json_path)?;
        println!("Solution saved to {:?}", json_path);
    }

    if visualize {
        let viz = Visualizer::new();
        let svg = viz.generate_svg(&instance, &solution);
        save_rendering(&viz, &svg, &path.with_extension("png"), &path.with_extension("svg"))?;
    }

    Ok(())
}

/// Write a PNG, falling back to SVG when PNG rendering is unavailable
fn save_rendering(viz: &Visualizer, svg: &str, png_path: &Path, svg_path: &Path) -> Result<()> {
    match viz.save_png(svg, png_path) {
        Ok(()) => println!("Visualization saved to {:?}", png_path),
        Err(e) => {
            viz.save_svg(svg, svg_path)?;
            println!("PNG conversion failed ({}). Saved SVG to {:?}", e, svg_path);
        }
    }
    Ok(())
}

fn run_benchmark(dir: &Path, output: &Path, config: BenchmarkConfig) -> Result<()> {
    println!("Loading instances from {:?}...", dir);

    let instances = load_instances_from_dir(dir)?;
    println!("Found {} instances", instances.len());

    if instances.is_empty() {
        eprintln!("No instances found!");
        return Ok(());
    }

    println!(
        "Configurations: workers={:?} passes={:?}, {} runs each",
        config.worker_counts, config.two_opt_passes, config.num_runs
    );

    let mut benchmark = Benchmark::new(config);
    let start = Instant::now();
    benchmark.run_on_instances(&instances)?;
    println!("Benchmark finished in {:.2}s", start.elapsed().as_secs_f64());

    std::fs::create_dir_all(output)?;

    let results_path = output.join("results.csv");
    benchmark.export_to_csv(&results_path)?;
    println!("\nResults exported to {:?}", results_path);

    let stats_path = output.join("statistics.csv");
    benchmark.export_statistics_csv(&stats_path)?;
    println!("Statistics exported to {:?}", stats_path);

    let report = benchmark.generate_report();
    println!("\n{}", report);

    let report_path = output.join("report.txt");
    std::fs::write(&report_path, &report)?;
    println!("Report saved to {:?}", report_path);

    Ok(())
}

fn analyze_instance(path: &Path, visualize: bool) -> Result<()> {
    let instance = TspInstance::from_file(path)?;

    let workers = SolverConfig::default().workers;
    let matrix = DistanceMatrix::build(&instance.cities, workers)?;
    let tree = prim(&matrix);
    let odd_vertices = tree.graph.odd_vertices().len();

    println!("========== Instance Analysis ==========\n");
    println!("{}", instance.statistics());

    let n = matrix.size();
    let mut total: i128 = 0;
    let mut min_dist = i64::MAX;
    let mut max_dist = 0;
    for i in 0..n {
        for &d in &matrix.row(i)[i + 1..] {
            total += d as i128;
            min_dist = min_dist.min(d);
            max_dist = max_dist.max(d);
        }
    }
    let pairs = n * n.saturating_sub(1) / 2;

    if pairs > 0 {
        println!("\nDistance Statistics:");
        println!("  Average: {:.2}", total as f64 / pairs as f64);
        println!("  Min: {}", min_dist);
        println!("  Max: {}", max_dist);
    }

    println!("\nSpanning Tree:");
    println!("  Weight: {}", tree.total_weight);
    println!("  Odd-degree vertices: {}", odd_vertices);
    println!("  Tour lower bound: {}", tree.total_weight);

    if visualize {
        let generator = TourGenerator::new(&matrix, TwoOptSearch::new());
        let tree_edges = tree.graph.edges();
        let mut matched = generator.graph().edges();
        for edge in &tree_edges {
            if let Some(pos) = matched.iter().position(|e| e == edge) {
                matched.remove(pos);
            }
        }

        let viz = Visualizer::new();
        let svg = viz.generate_graph_svg(&instance, generator.graph(), &matched);
        save_rendering(
            &viz,
            &svg,
            &path.with_extension("graph.png"),
            &path.with_extension("graph.svg"),
        )?;
    }

    Ok(())
}

fn generate_instance(cities: usize, extent: i64, seed: u64, output: &Path) -> Result<()> {
    if extent <= 0 {
        return Err(Error::configuration("extent must be positive"));
    }
    let instance = TspInstance::random(cities, extent, seed);
    instance.save(output)?;
    println!("Generated {} cities (seed {}) into {:?}", cities, seed, output);
    Ok(())
}
