//! Chaingen: writes a chain-shaped PDDL domain for planner scaling runs.
//!
//! Usage: chaingen <L> [--out-dir <dir>]

use clap::Parser;
use plant_benchgen::core::chain::ChainDomain;
use plant_benchgen::core::output::{Document, OutputWriter};
use plant_benchgen::logging::{init_logging, LogFormat};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "chaingen", version, about = "Generate a chain PDDL domain")]
struct Cli {
    /// Number of links in the chain (positive integer)
    length: usize,

    /// Directory for domain-L.pddl
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    if let Err(e) = init_logging(level, LogFormat::Text) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let domain = ChainDomain::generate(cli.length).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Usage: chaingen <L>   (L: positive chain length)");
        process::exit(1);
    });

    let doc = Document {
        file_name: domain.file_name(),
        contents: domain.text,
    };
    match OutputWriter::new(&cli.out_dir).write_all(&[doc]) {
        Ok(written) => {
            for path in written {
                info!(path = %path.display(), "wrote chain domain");
                println!("Wrote '{}'", path.display());
            }
        }
        Err(e) => {
            error!("Write failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
