use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use pyra_module::FunctionsToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct ListCommand {
    /// Path to functions.toml (defaults to ./functions.toml)
    #[arg(default_value = "functions.toml")]
    pub config: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let functions_toml = FunctionsToml::open(&self.config).unwrap_or_exit();
        let registry = functions_toml.registry().unwrap_or_exit();

        if registry.is_empty() {
            println!("No functions declared");
        } else {
            println!("Functions:");
            for def in registry.functions() {
                println!(
                    "  {} ({}) -> {}::{}",
                    def.name,
                    def.trigger.kind(),
                    functions_toml.decl().module.name,
                    def.handler
                );
            }
        }

        if registry.param_count() > 0 {
            println!("\nParams:");
            for param in registry.params() {
                println!("  {} ({})", param.name, param.kind.as_str());
            }
        }

        Ok(())
    }
}
