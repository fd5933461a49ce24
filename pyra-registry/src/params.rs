//! Deploy-time parameters.
//!
//! Params make a functions codebase generic over its environment: their
//! values are resolved by the deploy CLI, not at build time. Here they are
//! declarations only; a param serializes into option fields as a
//! `{{ params.NAME }}` reference.

use serde::{Deserialize, Serialize};

/// A deploy-time parameter declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamDefault>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Label shown when the deploy CLI prompts for a value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            description: None,
            label: None,
        }
    }

    /// The braced reference deploy tooling substitutes at resolution time.
    pub fn reference(&self) -> String {
        format!("{{{{ params.{} }}}}", self.name)
    }
}

/// The value space a param resolves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Int,
    Float,
    Bool,
    /// Resolved from the provider's secret store rather than user input.
    Secret,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Bool => "bool",
            ParamKind::Secret => "secret",
        }
    }
}

/// A literal default for a param.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamDefault {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}
