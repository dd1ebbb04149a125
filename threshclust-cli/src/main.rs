//! threshclust command-line interface.
//!
//! Loads points from text, a file or a random generator, clusters them and
//! prints a per-point table with a cluster summary, or writes CSV/JSON.
#![allow(clippy::uninlined_format_args, clippy::cast_precision_loss)]

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use std::path::{Path, PathBuf};
use std::time::Instant;

use threshclust_algorithms::{
    threshold_sweep, DistanceMetric, EuclideanDistance, StatisticalDistance, ThresholdClustering,
};
use threshclust_core::{ClusteringConfig, Labeling, PointSet, TraversalOrder};
use threshclust_io::{
    generate_uniform, parse_points, read_points, ClusteringReport, LabelingWriter,
};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: {0}")]
    ThreshclustIo(#[from] threshclust_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] threshclust_core::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

/// Distance metric selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Metric {
    /// Squared offset normalized by per-cluster spread (default)
    Statistical,
    /// Plain squared Euclidean distance to the cluster mean
    Euclidean,
}

/// Sequential threshold clustering of N-dimensional points.
#[derive(Parser)]
#[command(name = "threshclust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where the points come from.
#[derive(Args)]
struct InputArgs {
    /// File with parenthesized points, e.g. "(1,2,3), (4,5,6)"
    #[arg(short, long, conflicts_with_all = ["points", "random"])]
    input: Option<PathBuf>,

    /// Points given inline in the same format
    #[arg(long, conflicts_with = "random")]
    points: Option<String>,

    /// Generate this many uniform random points in [0, 1)
    #[arg(long)]
    random: Option<usize>,

    /// Dimension of generated points
    #[arg(long, default_value = "3")]
    dim: usize,

    /// Seed for generated points (omit for a fresh random set)
    #[arg(long)]
    seed: Option<u64>,
}

impl InputArgs {
    fn load(&self) -> Result<PointSet> {
        let points = match (&self.input, &self.points, self.random) {
            (Some(path), _, _) => read_points(path)?,
            (None, Some(text), _) => parse_points(text)?,
            (None, None, Some(count)) => generate_uniform(count, self.dim, self.seed)?,
            (None, None, None) => {
                return Err(CliError::Usage(
                    "no input given: use --input, --points or --random".into(),
                ))
            }
        };
        log::info!("loaded {} points of dimension {}", points.len(), points.dim());
        Ok(points)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster points and print or write the labels
    Cluster {
        #[command(flatten)]
        input: InputArgs,

        /// JSON file with a clustering config ({"threshold": .., "order": ..})
        #[arg(long)]
        config: Option<PathBuf>,

        /// Maximum distance for joining a cluster [default: 1.0]
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Traversal order: forward, reverse, shuffle or shuffle:<seed> [default: forward]
        #[arg(long)]
        order: Option<TraversalOrder>,

        /// Distance metric
        #[arg(short, long, value_enum, default_value = "statistical")]
        metric: Metric,

        /// Output file (.csv or .json); prints a table when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count clusters across several thresholds
    Sweep {
        #[command(flatten)]
        input: InputArgs,

        /// Comma-separated thresholds, e.g. 0.5,1,2,4
        #[arg(long, value_delimiter = ',', required = true)]
        thresholds: Vec<f64>,

        /// Traversal order
        #[arg(long, default_value = "forward")]
        order: TraversalOrder,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(
    path: Option<&Path>,
    threshold: Option<f64>,
    order: Option<TraversalOrder>,
) -> Result<ClusteringConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<ClusteringConfig>(&text)?
        }
        None => ClusteringConfig::default(),
    };
    if let Some(threshold) = threshold {
        config.threshold = threshold;
    }
    if let Some(order) = order {
        config.order = order;
    }
    config.validate()?;
    Ok(config)
}

fn run_clustering(
    points: &PointSet,
    config: &ClusteringConfig,
    metric: Metric,
) -> Result<Labeling> {
    let labeling = match metric {
        Metric::Statistical => run_with(points, config, StatisticalDistance)?,
        Metric::Euclidean => run_with(points, config, EuclideanDistance)?,
    };
    Ok(labeling)
}

fn run_with<M: DistanceMetric>(
    points: &PointSet,
    config: &ClusteringConfig,
    metric: M,
) -> Result<Labeling> {
    let engine = ThresholdClustering::with_metric(config.clone(), metric);
    Ok(engine.cluster(points)?)
}

fn format_point(point: &[f64]) -> String {
    let coords: Vec<String> = point.iter().map(|v| format!("{v:.3}")).collect();
    format!("({})", coords.join(", "))
}

fn print_table(points: &PointSet, report: &ClusteringReport) {
    println!("{:>6} | {:<36} | {:>5}", "Index", "Point", "Label");
    println!("{:-<53}", "");
    for (index, (point, label)) in points.iter().zip(report.labels.labels()).enumerate() {
        println!("{:>6} | {:<36} | {:>5}", index, format_point(point), label);
    }

    println!();
    println!(
        "Clusters: {} (largest {}, singletons {}, mean size {:.2})",
        report.statistics.num_clusters,
        report.statistics.largest_cluster,
        report.statistics.singleton_clusters,
        report.statistics.mean_cluster_size
    );
    println!("{:>5} | {:>6} | {:<36} | {:<36}", "Label", "Size", "Centroid", "Spread");
    println!("{:-<92}", "");
    for cluster in &report.clusters {
        println!(
            "{:>5} | {:>6} | {:<36} | {:<36}",
            cluster.label,
            cluster.size,
            format_point(&cluster.centroid),
            format_point(&cluster.spread)
        );
    }
}

fn write_output(path: &Path, points: &PointSet, report: &ClusteringReport) -> Result<()> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or_else(|| "csv".to_string(), |ext| ext.to_lowercase());

    let mut writer = LabelingWriter::create(path)?;
    match format.as_str() {
        "json" => writer.write_json(report)?,
        "csv" => writer.write_csv(points, &report.labels)?,
        other => {
            log::warn!("unknown extension '{}', writing CSV", other);
            writer.write_csv(points, &report.labels)?;
        }
    }
    log::info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Cluster {
            input,
            config,
            threshold,
            order,
            metric,
            output,
        } => {
            let points = input.load()?;
            let config = load_config(config.as_deref(), threshold, order)?;
            log::info!(
                "metric {:?}, threshold {}, order {}",
                metric,
                config.threshold,
                config.order
            );

            let start = Instant::now();
            let labeling = run_clustering(&points, &config, metric)?;
            let elapsed = start.elapsed();

            let report = ClusteringReport::new(config, &points, labeling)?;
            match output {
                Some(path) => write_output(&path, &points, &report)?,
                None => print_table(&points, &report),
            }

            println!(
                "Clustered {} points into {} clusters in {:.3} ms",
                points.len(),
                report.statistics.num_clusters,
                elapsed.as_secs_f64() * 1000.0
            );
        }

        Commands::Sweep {
            input,
            thresholds,
            order,
        } => {
            let points = input.load()?;

            let start = Instant::now();
            let sweep = threshold_sweep(&points, &thresholds, order)?;
            let elapsed = start.elapsed();

            println!("{:<12} | {:<10}", "Threshold", "Clusters");
            println!("{:-<25}", "");
            for entry in &sweep {
                println!("{:<12} | {:<10}", entry.threshold, entry.num_clusters);
            }
            println!(
                "Swept {} thresholds over {} points ({}) in {:.3} ms",
                sweep.len(),
                points.len(),
                order,
                elapsed.as_secs_f64() * 1000.0
            );
        }
    }

    Ok(())
}
