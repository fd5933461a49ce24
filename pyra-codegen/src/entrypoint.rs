//! The generated entrypoint file.

use pyra_manifest::MANIFEST_PATH;
use pyra_registry::TriggerKind;

use crate::CodeBuilder;

/// One `triggers.<kind>(...)` line in the generated entrypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Endpoint id the runtime routes on.
    pub id: String,
    pub kind: TriggerKind,
    /// Handler path inside the user module.
    pub handler: String,
}

/// The server entrypoint source: one handler binding per registered
/// function, the embedded discovery manifest, and a `main` handing the
/// trigger set to the serving runtime.
pub struct EntrypointRs<'a> {
    /// User module the bindings dispatch into.
    pub module: &'a str,
    pub bindings: Vec<Binding>,
    /// Rendered functions.yaml, embedded verbatim.
    pub manifest_yaml: &'a str,
}

impl EntrypointRs<'_> {
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::rust()
            .line("// This is a generated file, do not edit.")
            .line("// Regenerate with `pyra generate`.")
            .blank()
            .line("use pyra_serving::{Server, TriggerSet};")
            .blank()
            .line(&format!("use {} as functions;", self.module))
            .blank()
            .line("/// Discovery manifest served by the runtime.")
            .raw("static FUNCTIONS_YAML: &str = r##\"")
            .raw(self.manifest_yaml)
            .raw("\"##;\n")
            .blank()
            .line("fn main() -> pyra_serving::Result<()> {")
            .indent()
            .line("let mut triggers = TriggerSet::new();");

        for binding in &self.bindings {
            builder = builder.line(&format!(
                "triggers.{}(\"{}\", functions::{});",
                binding.kind, binding.id, binding.handler
            ));
        }

        builder
            .blank()
            .line("let server = Server::from_env()?;")
            .line(&format!(
                "server.mount_manifest(\"{MANIFEST_PATH}\", FUNCTIONS_YAML);"
            ))
            .line("server.serve(triggers)")
            .dedent()
            .line("}")
            .build()
    }
}
