//! Command-line interface for cwl2click.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli, Commands, GenerateArgs};
