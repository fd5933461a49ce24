//! The function registry.

use indexmap::IndexMap;
use thiserror::Error;

use crate::{FunctionDefinition, Param, endpoint_id};

/// In-process record of declared functions and params.
///
/// Keyed by normalized endpoint id, preserving registration order.
/// Registrations are append-only for the registry's lifetime.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    functions: IndexMap<String, FunctionDefinition>,
    params: IndexMap<String, Param>,
}

/// Errors produced while populating a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two declared names collapse to the same deployed endpoint.
    #[error("function '{name}' deploys as '{id}', which conflicts with '{existing}'")]
    DuplicateName {
        name: String,
        existing: String,
        id: String,
    },

    #[error("param '{name}' is already declared")]
    DuplicateParam { name: String },
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a function definition.
    ///
    /// Fails when the definition's endpoint id is already taken; the
    /// platform collapses case and underscores, so `my_func` and `myfunc`
    /// conflict even though their declared names differ.
    pub fn register(&mut self, definition: FunctionDefinition) -> Result<(), RegistryError> {
        let id = definition.endpoint_id();
        if let Some(existing) = self.functions.get(&id) {
            return Err(RegistryError::DuplicateName {
                name: definition.name,
                existing: existing.name.clone(),
                id,
            });
        }
        self.functions.insert(id, definition);
        Ok(())
    }

    /// Record a deploy-time param declaration.
    pub fn declare_param(&mut self, param: Param) -> Result<(), RegistryError> {
        if self.params.contains_key(&param.name) {
            return Err(RegistryError::DuplicateParam { name: param.name });
        }
        self.params.insert(param.name.clone(), param);
        Ok(())
    }

    /// All definitions, in registration order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.functions.values()
    }

    /// All params, in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.params.values()
    }

    /// Look up a definition by declared name or endpoint id.
    pub fn get(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.get(&endpoint_id(name))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParamKind, TriggerSpec};

    fn https(name: &str) -> FunctionDefinition {
        FunctionDefinition::new(name, TriggerSpec::Https { invoker: None })
    }

    #[test]
    fn test_register_preserves_order() {
        let mut registry = Registry::new();
        registry.register(https("zeta")).unwrap();
        registry.register(https("alpha")).unwrap();
        registry.register(https("mid")).unwrap();

        let names: Vec<_> = registry.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = Registry::new();
        registry.register(https("greet_user")).unwrap();

        let err = registry.register(https("greet_user")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateName {
                name: "greet_user".to_string(),
                existing: "greet_user".to_string(),
                id: "greetuser".to_string(),
            }
        );
    }

    #[test]
    fn test_normalized_collision_rejected() {
        let mut registry = Registry::new();
        registry.register(https("my_func")).unwrap();

        // Distinct declared names, same deployed endpoint.
        let err = registry.register(https("myfunc")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { id, .. } if id == "myfunc"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_by_either_form() {
        let mut registry = Registry::new();
        registry.register(https("greet_user")).unwrap();

        assert!(registry.get("greet_user").is_some());
        assert!(registry.get("greetuser").is_some());
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn test_duplicate_param_rejected() {
        let mut registry = Registry::new();
        registry
            .declare_param(Param::new("TOPIC", ParamKind::String))
            .unwrap();

        let err = registry
            .declare_param(Param::new("TOPIC", ParamKind::Secret))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateParam {
                name: "TOPIC".to_string()
            }
        );
    }
}
