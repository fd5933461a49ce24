use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Context, Result};

use crate::scaffold::{StarterToml, WriteResult};

#[derive(Args)]
pub struct InitCommand {
    /// Module name (defaults to current directory)
    #[arg(default_value = ".")]
    pub name: String,

    /// Output directory (defaults to ./<name>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let (module_name, output_dir) = Self::resolve_paths(&self.name, self.output.clone())?;

        let starter = StarterToml::new(&module_name);
        match starter.write(&output_dir)? {
            WriteResult::Written => {
                println!(
                    "Created {} for module '{}'",
                    starter.path(&output_dir).display(),
                    module_name
                );
                println!();
                println!("Next steps:");
                if output_dir != Path::new(".") {
                    println!("  cd {}", output_dir.display());
                }
                println!("  pyra check");
                println!("  pyra generate > src/bin/server.rs");
            }
            WriteResult::Skipped => {
                eprintln!(
                    "{} already exists, refusing to overwrite",
                    starter.path(&output_dir).display()
                );
                std::process::exit(1);
            }
        }

        Ok(())
    }

    fn resolve_paths(name: &str, output: Option<PathBuf>) -> Result<(String, PathBuf)> {
        if name == "." {
            let cwd = std::env::current_dir().wrap_err("Failed to get current directory")?;
            let dir_name = cwd
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| eyre::eyre!("Current directory has no valid name"))?
                .to_string();
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            // Dashed directory names are common; module names cannot carry them.
            Ok((dir_name.replace('-', "_"), output_dir))
        } else {
            let output_dir = output.unwrap_or_else(|| PathBuf::from(name));
            Ok((name.replace('-', "_"), output_dir))
        }
    }
}
