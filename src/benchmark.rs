//! Benchmarking and experimentation module.
//!
//! Runs the solver over a set of instances for every combination of worker
//! count and 2-opt pass budget, collects per-run results, and aggregates them
//! into statistics. Repeated runs of one configuration double as a
//! determinism check: their lengths must all agree.

use crate::error::Result;
use crate::instance::TspInstance;
use crate::matrix::Distance;
use crate::solver::{ChristofidesSolver, SolverConfig};

use indicatif::{ProgressBar, ProgressStyle};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Result of a single solver run on an instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Instance name
    pub instance: String,
    /// Number of cities
    pub dimension: usize,
    /// Worker threads used
    pub workers: usize,
    /// 2-opt pass budget
    pub two_opt_passes: usize,
    /// Number of start vertices evaluated
    pub starts: usize,
    /// Run index within its configuration
    pub run: usize,
    /// Tour length
    pub length: Distance,
    /// Start vertex of the best tour
    pub best_start: usize,
    /// Computation time in seconds
    pub time: f64,
}

/// Aggregated statistics for one instance under one configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigStatistics {
    pub instance: String,
    pub workers: usize,
    pub two_opt_passes: usize,
    pub num_runs: usize,
    pub best_length: Distance,
    pub worst_length: Distance,
    pub avg_length: f64,
    pub avg_time: f64,
    pub std_time: f64,
    /// All runs produced the same length
    pub deterministic: bool,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of runs per configuration
    pub num_runs: usize,
    /// Worker counts to try
    pub worker_counts: Vec<usize>,
    /// 2-opt pass budgets to try
    pub two_opt_passes: Vec<usize>,
    /// Start vertices per run (`None` = all)
    pub starts: Option<usize>,
    /// Show a progress bar
    pub progress: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            num_runs: 3,
            worker_counts: vec![1, SolverConfig::default().workers],
            two_opt_passes: vec![1, 5],
            starts: None,
            progress: true,
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<RunResult>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
        }
    }

    fn solver_configs(&self) -> Vec<SolverConfig> {
        let mut configs = Vec::new();
        for &workers in &self.config.worker_counts {
            for &two_opt_passes in &self.config.two_opt_passes {
                configs.push(SolverConfig {
                    workers,
                    starts: self.config.starts,
                    two_opt_passes,
                });
            }
        }
        configs
    }

    /// Run every configuration on one instance
    pub fn run_on_instance(&mut self, instance: &TspInstance) -> Result<()> {
        self.run_with_progress(instance, None)
    }

    fn run_with_progress(&mut self, instance: &TspInstance, progress: Option<&ProgressBar>) -> Result<()> {
        log::info!("Running benchmark on instance: {}", instance.name);
        let starts = self.config.starts.map_or(instance.dimension(), |s| s.min(instance.dimension()));

        for config in self.solver_configs() {
            let solver = ChristofidesSolver::new(config.clone());
            for run in 0..self.config.num_runs {
                let solution = solver.solve(instance)?;
                self.results.push(RunResult {
                    instance: instance.name.clone(),
                    dimension: instance.dimension(),
                    workers: config.workers,
                    two_opt_passes: config.two_opt_passes,
                    starts,
                    run,
                    length: solution.length,
                    best_start: solution.start,
                    time: solution.computation_time,
                });
                if let Some(bar) = progress {
                    bar.inc(1);
                }
            }
        }
        Ok(())
    }

    /// Run benchmark on multiple instances
    pub fn run_on_instances(&mut self, instances: &[TspInstance]) -> Result<()> {
        let total = (instances.len() * self.solver_configs().len() * self.config.num_runs) as u64;
        let bar = if self.config.progress {
            let bar = ProgressBar::new(total);
            if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} runs ({elapsed})") {
                bar.set_style(style);
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        for instance in instances {
            self.run_with_progress(instance, Some(&bar))?;
        }
        bar.finish_and_clear();
        Ok(())
    }

    /// Compute statistics per instance and configuration
    pub fn compute_statistics(&self) -> Vec<ConfigStatistics> {
        let mut groups: BTreeMap<(String, usize, usize), Vec<&RunResult>> = BTreeMap::new();
        for result in &self.results {
            groups
                .entry((result.instance.clone(), result.workers, result.two_opt_passes))
                .or_default()
                .push(result);
        }

        let mut statistics: Vec<ConfigStatistics> = groups
            .into_iter()
            .map(|((instance, workers, two_opt_passes), runs)| {
                let lengths: Vec<f64> = runs.iter().map(|r| r.length as f64).collect();
                let times: Vec<f64> = runs.iter().map(|r| r.time).collect();
                let best_length = runs.iter().map(|r| r.length).min().unwrap_or(0);
                let worst_length = runs.iter().map(|r| r.length).max().unwrap_or(0);
                let std_time = if times.len() > 1 { times.iter().population_std_dev() } else { 0.0 };

                ConfigStatistics {
                    instance,
                    workers,
                    two_opt_passes,
                    num_runs: runs.len(),
                    best_length,
                    worst_length,
                    avg_length: lengths.iter().mean(),
                    avg_time: times.iter().mean(),
                    std_time,
                    deterministic: best_length == worst_length,
                }
            })
            .collect();

        statistics.sort_by_key(|s| (s.instance.clone(), OrderedFloat(s.avg_length), s.workers));
        statistics
    }

    /// Export results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Export statistics to CSV
    pub fn export_statistics_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for stat in self.compute_statistics() {
            writer.serialize(stat)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("        TSP Benchmark Report\n");
        report.push_str(&format!("  {}\n", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")));
        report.push_str("========================================\n\n");

        let stats = self.compute_statistics();

        report.push_str("-".repeat(90).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<20} {:>8} {:>8} {:>6} {:>12} {:>12} {:>10} {:>8}\n",
            "Instance", "Workers", "Passes", "Runs", "Best", "Avg", "Avg Time", "Stable"
        ));
        report.push_str("-".repeat(90).as_str());
        report.push('\n');

        for stat in &stats {
            report.push_str(&format!(
                "{:<20} {:>8} {:>8} {:>6} {:>12} {:>12.1} {:>10.4} {:>8}\n",
                stat.instance,
                stat.workers,
                stat.two_opt_passes,
                stat.num_runs,
                stat.best_length,
                stat.avg_length,
                stat.avg_time,
                if stat.deterministic { "yes" } else { "NO" }
            ));
        }

        report.push_str("-".repeat(90).as_str());
        report.push('\n');

        report.push_str("\nBest tour per instance:\n");
        let mut instance_best: BTreeMap<&str, &RunResult> = BTreeMap::new();
        for result in &self.results {
            let entry = instance_best.entry(result.instance.as_str()).or_insert(result);
            if result.length < entry.length {
                *entry = result;
            }
        }
        for (instance, best) in &instance_best {
            report.push_str(&format!(
                "  {}: {} (workers={}, passes={}, start={})\n",
                instance, best.length, best.workers, best.two_opt_passes, best.best_start
            ));
        }

        report
    }

    /// Get all results
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }
}

/// Load every `.txt` or `.tsp` city file in a directory, smallest first
pub fn load_instances_from_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<TspInstance>> {
    let mut instances = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_city_file = path
            .extension()
            .map(|e| e == "txt" || e == "tsp")
            .unwrap_or(false);
        if !is_city_file {
            continue;
        }

        match TspInstance::from_file(&path) {
            Ok(instance) => instances.push(instance),
            Err(e) => log::warn!("skipping {}: {}", path.display(), e),
        }
    }

    instances.sort_by(|a, b| a.dimension().cmp(&b.dimension()).then_with(|| a.name.cmp(&b.name)));
    Ok(instances)
}
