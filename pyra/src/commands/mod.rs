mod check;
mod completions;
mod generate;
mod init;
mod list;
mod manifest;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use init::InitCommand;
use list::ListCommand;
use manifest::ManifestCommand;

/// Extension trait for exiting on declaration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for pyra_module::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "pyra")]
#[command(version)]
#[command(about = "Generate cloud function entrypoints from TOML declarations")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
            Commands::Manifest(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a starter functions.toml
    Init(InitCommand),

    /// Generate the server entrypoint source on stdout
    Generate(GenerateCommand),

    /// Print the discovery manifest (functions.yaml) on stdout
    Manifest(ManifestCommand),

    /// Validate functions.toml without generating code
    Check(CheckCommand),

    /// List declared functions and params
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
