//! Function definitions.

use crate::{RuntimeOptions, TriggerSpec, endpoint_id};

/// A declared function: the unit the manifest builder and the entrypoint
/// generator both consume.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    /// Declared name, unique within a registry (on its normalized form).
    pub name: String,
    /// The user function dispatched to; defaults to the declared name.
    pub handler: String,
    /// Trigger configuration.
    pub trigger: TriggerSpec,
    /// Runtime options, already merged with module defaults.
    pub options: RuntimeOptions,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, trigger: TriggerSpec) -> Self {
        let name = name.into();
        Self {
            handler: name.clone(),
            name,
            trigger,
            options: RuntimeOptions::default(),
        }
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = handler.into();
        self
    }

    pub fn with_options(mut self, options: RuntimeOptions) -> Self {
        self.options = options;
        self
    }

    /// The provider endpoint name this function deploys as.
    pub fn endpoint_id(&self) -> String {
        endpoint_id(&self.name)
    }
}
