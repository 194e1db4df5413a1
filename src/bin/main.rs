//! csv2lsvm Command Line Interface
//!
//! Converts a numeric CSV file into libSVM format.

use clap::Parser;
use csv2lsvm::api::Converter;
use csv2lsvm::{ConfigFile, ConvertConfig, Result};
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "csv2lsvm")]
#[command(about = "Convert numeric CSV files into sparse libSVM format")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "csv2lsvm Contributors")]
struct Cli {
    /// Input CSV file; column 0 is the label
    input: PathBuf,

    /// Output libSVM file
    #[arg(short, long, default_value = "out.svm")]
    output: PathBuf,

    /// Fractional digits for labels and values
    #[arg(short, long)]
    precision: Option<usize>,

    /// Stop after this many rows
    #[arg(short = 'n', long)]
    max_rows: Option<usize>,

    /// Skip the first line of the input
    #[arg(long)]
    header: bool,

    /// Append to the output file instead of overwriting it
    #[arg(long)]
    append: bool,

    /// JSON file with conversion settings; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Precision used when neither a flag nor a config file sets one
const CLI_DEFAULT_PRECISION: usize = 4;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    info!("Input: {:?}", cli.input);
    info!("Output: {:?}", cli.output);

    let summary = Converter::from_config(config).convert_file(&cli.input, &cli.output)?;

    info!(
        "Converted {} rows in {} ms",
        summary.rows,
        summary.elapsed().num_milliseconds()
    );
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<ConvertConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading settings from {path:?}");
            ConfigFile::load_from_file(path)?.into_config(CLI_DEFAULT_PRECISION)
        }
        None => {
            let mut config = ConvertConfig::default();
            config.write.precision = CLI_DEFAULT_PRECISION;
            config
        }
    };

    if let Some(precision) = cli.precision {
        config.write.precision = precision;
    }
    if let Some(max_rows) = cli.max_rows {
        config.read.max_rows = Some(max_rows);
    }
    if cli.header {
        config.read.skip_header = true;
    }
    if cli.append {
        config.write.append = true;
    }

    Ok(config)
}
