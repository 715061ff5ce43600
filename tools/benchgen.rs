//! Benchgen: writes a manufacturing planning problem of a given size.
//!
//! Usage: benchgen <N> [--seed <n>] [--branching <k>] [--out-dir <dir>] ...
//!
//! Produces problem-R.pddl, state-R.n3 and graph-R.jsonld, where R is the
//! number of models actually generated (R < N when the depth bound is hit).

use clap::{Parser, ValueEnum};
use plant_benchgen::config::GeneratorConfig;
use plant_benchgen::core::emit::OutputFormat;
use plant_benchgen::core::grid::NeighborPolicy;
use plant_benchgen::core::pipeline::{self, PipelineError};
use plant_benchgen::core::tree::TreeError;
use plant_benchgen::logging::{init_logging, LogFormat};
use std::path::PathBuf;
use std::process;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "benchgen", version, about = "Generate a manufacturing planning benchmark")]
struct Cli {
    /// Number of product models to generate (positive integer)
    count: usize,

    /// Seed for the workstation placement shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Children per model and level (1 builds a chain)
    #[arg(long)]
    branching: Option<usize>,

    /// Left/right neighbour rule at row borders
    #[arg(long, value_enum)]
    neighbors: Option<NeighborArg>,

    /// PDDL problem template with {objects}, {init} and {goal}
    #[arg(long)]
    template: Option<PathBuf>,

    /// Directory for the generated documents
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output format to write; repeat for several (default: all)
    #[arg(long = "format", value_enum)]
    formats: Vec<FormatArg>,

    /// RON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormatArg::Text)]
    log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NeighborArg {
    Bounded,
    Wrapping,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Pddl,
    N3,
    Jsonld,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let log_format = match cli.log_format {
        LogFormatArg::Text => LogFormat::Text,
        LogFormatArg::Json => LogFormat::Json,
    };
    if let Err(e) = init_logging(level, log_format) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match pipeline::run(&config, cli.count) {
        Ok(report) => {
            println!(
                "Generated {} models ({} requested): {} workstations on a {}x{} grid, \
                 {} items, seed {}",
                report.realized,
                report.requested,
                report.workstations,
                report.grid_width,
                report.grid_width,
                report.items,
                report.seed
            );
            if report.is_underrun() {
                println!(
                    "Depth bound reached: only {} of {} models fit",
                    report.realized, report.requested
                );
            }
            for path in &report.written {
                println!("Wrote '{}'", path.display());
            }
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            eprintln!("Error: {}", e);
            if is_usage_error(&e) {
                eprintln!("Usage: benchgen <N>   (N: positive number of models)");
            }
            process::exit(1);
        }
    }
}

/// Failures caused by the size argument rather than the run itself.
fn is_usage_error(err: &PipelineError) -> bool {
    matches!(err, PipelineError::Tree(TreeError::InvalidModelCount(_)))
}

/// File values first, then flags on top.
fn build_config(cli: &Cli) -> Result<GeneratorConfig, plant_benchgen::config::ConfigError> {
    let mut config = match cli.config {
        Some(ref path) => GeneratorConfig::load_from_ron(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(k) = cli.branching {
        config.branching_factor = k;
    }
    if let Some(neighbors) = cli.neighbors {
        config.neighbor_policy = match neighbors {
            NeighborArg::Bounded => NeighborPolicy::RowBounded,
            NeighborArg::Wrapping => NeighborPolicy::RowWrapping,
        };
    }
    if let Some(ref template) = cli.template {
        config.template = template.clone();
    }
    if let Some(ref dir) = cli.out_dir {
        config.output_dir = dir.clone();
    }
    if !cli.formats.is_empty() {
        let mut formats: Vec<OutputFormat> = cli
            .formats
            .iter()
            .map(|f| match f {
                FormatArg::Pddl => OutputFormat::Pddl,
                FormatArg::N3 => OutputFormat::N3,
                FormatArg::Jsonld => OutputFormat::JsonLd,
            })
            .collect();
        formats.sort();
        formats.dedup();
        config.formats = formats;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plant_benchgen::core::template::TemplateError;

    #[test]
    fn usage_only_for_bad_model_count() {
        assert!(is_usage_error(&TreeError::InvalidModelCount(0).into()));
        assert!(!is_usage_error(&TreeError::InvalidBranchingFactor(0).into()));
        assert!(!is_usage_error(&TemplateError::MissingPlaceholder("{goal}").into()));
    }
}
