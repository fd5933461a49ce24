use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use pyra_codegen::Generator;
use pyra_module::FunctionsToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to functions.toml (defaults to ./functions.toml)
    #[arg(default_value = "functions.toml")]
    pub config: PathBuf,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let functions_toml = FunctionsToml::open(&self.config).unwrap_or_exit();
        let registry = functions_toml.registry().unwrap_or_exit();

        let module = &functions_toml.decl().module.name;
        let code = Generator::new(&registry, module)
            .generate()
            .wrap_err("Failed to generate entrypoint")?;

        print!("{code}");

        Ok(())
    }
}
