use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use ladder_split::io::OutputFormat;
use ladder_split::ladder::{self, SplitOptions};
use ladder_split::model::LABEL_COLUMN;
use ladder_split::{Result, ToolError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            println!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing(&cli)?;
    ladder::prepare_run(&cli.input_file, &cli.output_folder)?;

    let options = SplitOptions {
        label_column: cli.label_column,
        format: cli.format.into(),
    };
    ladder::split_ladder(&cli.input_file, &cli.output_folder, &options, |path| {
        println!("Saved: {}", path.display());
    })?;
    Ok(())
}

fn init_tracing(cli: &Cli) -> Result<()> {
    if cli.quiet {
        return Ok(());
    }

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Split a career ladder into one list of behavior statements per job level."
)]
struct Cli {
    /// Path to the input Excel (.xlsx) or CSV (.csv) file.
    input_file: PathBuf,

    /// Folder where the per-level files are saved. Created if missing.
    output_folder: PathBuf,

    /// Format of the per-level files.
    #[arg(long, value_enum, default_value_t = FormatKind::Csv)]
    format: FormatKind,

    /// Column holding the competency area of each row.
    #[arg(long, default_value = LABEL_COLUMN)]
    label_column: String,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Disable logging entirely.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatKind {
    Csv,
    Xlsx,
}

impl From<FormatKind> for OutputFormat {
    fn from(kind: FormatKind) -> Self {
        match kind {
            FormatKind::Csv => OutputFormat::Csv,
            FormatKind::Xlsx => OutputFormat::Xlsx,
        }
    }
}
