use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use pyra_manifest::ManifestStack;
use pyra_module::FunctionsToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct ManifestCommand {
    /// Path to functions.toml (defaults to ./functions.toml)
    #[arg(default_value = "functions.toml")]
    pub config: PathBuf,
}

impl ManifestCommand {
    /// Run the manifest command
    pub fn run(&self) -> Result<()> {
        let functions_toml = FunctionsToml::open(&self.config).unwrap_or_exit();
        let registry = functions_toml.registry().unwrap_or_exit();

        let yaml = ManifestStack::from_registry(&registry)
            .to_yaml()
            .wrap_err("Failed to serialize manifest")?;

        print!("{yaml}");

        Ok(())
    }
}
