//! CLI command definitions for cwl2click.
//!
//! One subcommand: `generate`, which converts a named process from a CWL
//! document into a click command-line source file.

use crate::loader;
use crate::renderer::{write_click_cli, RenderMeta};
use chrono::Local;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

const BANNER: &str =
    "------------------------------------------------------------------------";

/// Click command-line interface generator for CWL tools.
#[derive(Parser)]
#[command(name = "cwl2click")]
#[command(about = "Generate click command-line interfaces from CWL processes")]
#[command(version)]
#[command(
    long_about = "cwl2click converts a CWL CommandLineTool into a Python click script \
                  exposing one option per CWL input.\n\nExample usage:\n  \
                  cwl2click generate workflow.cwl --workflow-id my-tool --output ./generated"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate a click CLI source file from a CWL process.
    #[command(alias = "gen")]
    Generate(GenerateArgs),
}

/// Arguments for the generate command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path to the CWL document (single process or packed $graph).
    pub workflow: PathBuf,

    /// ID of the process to convert.
    #[arg(long)]
    pub workflow_id: String,

    /// Output directory path (created if absent).
    #[arg(short = 'o', long)]
    pub output: PathBuf,
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before
/// running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI with the parsed arguments.
pub fn run_with_cli(cli: Cli) -> ExitCode {
    match cli.command {
        Commands::Generate(args) => run_generate_command(args),
    }
}

/// Runs the conversion, reporting a build banner, total elapsed time and a
/// completion timestamp regardless of outcome. Errors are caught here and
/// mapped to a failing exit code rather than propagated.
fn run_generate_command(args: GenerateArgs) -> ExitCode {
    let start = Instant::now();

    info!(
        workflow = %args.workflow.display(),
        workflow_id = %args.workflow_id,
        "Generating click interface"
    );

    let target = args.output.join(format!("{}.py", args.workflow_id));
    let outcome = generate(&args, &target);

    info!("{BANNER}");
    let code = match outcome {
        Ok(()) => {
            info!("BUILD SUCCESS");
            info!("Generated {}", target.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("BUILD FAILED");
            error!(
                "An unexpected error occurred while generating {}: {e:#}",
                target.display()
            );
            ExitCode::FAILURE
        }
    };

    info!("{BANNER}");
    info!("Total time: {:.4} seconds", start.elapsed().as_secs_f64());
    info!(
        "Finished at: {}",
        Local::now().format("%Y-%m-%dT%H:%M:%S%.3f")
    );

    code
}

/// Loads the document, resolves the process and writes the artifact.
///
/// The rendered source is buffered first, so a failed conversion never
/// leaves a partial artifact on disk.
fn generate(args: &GenerateArgs, target: &Path) -> anyhow::Result<()> {
    let document = loader::load_document(&args.workflow)?;
    info!("{BANNER}");

    let meta = RenderMeta::capture();
    let mut buffer = Vec::new();
    write_click_cli(&document, &args.workflow_id, &meta, &mut buffer)?;

    fs::create_dir_all(&args.output)?;
    fs::write(target, &buffer)?;

    Ok(())
}
