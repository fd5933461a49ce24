use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use pyra_module::{FunctionsToml, Severity};
use pyra_registry::DEFAULT_REGION;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to functions.toml (defaults to ./functions.toml)
    #[arg(default_value = "functions.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let functions_toml = FunctionsToml::open(&self.config).unwrap_or_exit();
        let registry = functions_toml.registry().unwrap_or_exit();

        // Print all lint findings
        let mut has_warnings = false;
        for diag in functions_toml.lint() {
            match diag.severity {
                Severity::Warning => {
                    has_warnings = true;
                    eprintln!("warning: {}", diag.message);
                    if let Some(loc) = &diag.location {
                        eprintln!("  --> {}", loc);
                    }
                }
                Severity::Info => {
                    println!("info: {}", diag.message);
                    if let Some(loc) = &diag.location {
                        println!("  --> {}", loc);
                    }
                }
            }
        }

        if has_warnings {
            println!();
        }

        println!("✓ {} is valid\n", self.config.display());

        let decl = functions_toml.decl();
        println!(
            "  module {} ({})",
            decl.module.name,
            decl.module.region.as_deref().unwrap_or(DEFAULT_REGION)
        );
        println!();

        let count = registry.len();
        println!("  {} function{}:", count, if count == 1 { "" } else { "s" });
        for def in registry.functions() {
            println!("    {} ({})", def.name, def.trigger.kind());
        }

        if registry.param_count() > 0 {
            let count = registry.param_count();
            println!("\n  {} param{}:", count, if count == 1 { "" } else { "s" });
            for param in registry.params() {
                println!("    {}", param.name);
            }
        }

        Ok(())
    }
}
