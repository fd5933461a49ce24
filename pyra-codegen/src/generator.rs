//! The entrypoint generator.

use pyra_manifest::ManifestStack;
use pyra_registry::Registry;

use crate::{
    Error, Result,
    entrypoint::{Binding, EntrypointRs},
};

/// Generates the server entrypoint for a registry.
///
/// Pure text production: file writes belong to the caller. Output is
/// deterministic, so re-running over an unchanged registry yields
/// byte-identical source.
pub struct Generator<'a> {
    registry: &'a Registry,
    module: &'a str,
}

impl<'a> Generator<'a> {
    pub fn new(registry: &'a Registry, module: &'a str) -> Self {
        Self { registry, module }
    }

    /// Render the entrypoint source text.
    pub fn generate(&self) -> Result<String> {
        if self.registry.is_empty() {
            return Err(Error::EmptyRegistry);
        }

        let manifest_yaml = ManifestStack::from_registry(self.registry).to_yaml()?;

        let bindings = self
            .registry
            .functions()
            .map(|def| Binding {
                id: def.endpoint_id(),
                kind: def.trigger.kind(),
                handler: def.handler.clone(),
            })
            .collect();

        let entrypoint = EntrypointRs {
            module: self.module,
            bindings,
            manifest_yaml: &manifest_yaml,
        };

        Ok(entrypoint.render())
    }
}
