//! The serde model for `functions.toml`.
//!
//! This is the raw declaration shape as written by the user. The load phase
//! in [`crate::load`] converts it into a [`pyra_registry::Registry`]; the
//! string `"default"` is the reset sentinel wherever a tunable accepts it.

use indexmap::IndexMap;
use pyra_registry::{ParamKind, VpcEgressSettings};
use serde::Deserialize;

/// Root declaration for functions.toml
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDecl {
    /// Module metadata
    pub module: ModuleConfig,

    /// Module-wide runtime option defaults, merged under every function
    #[serde(default)]
    pub defaults: OptionsDecl,

    /// Deploy-time params
    #[serde(default)]
    pub params: IndexMap<String, ParamDecl>,

    /// Function declarations
    #[serde(default)]
    pub functions: IndexMap<String, FunctionDecl>,
}

impl ModuleDecl {
    /// Check if a function is declared (accepts the declared name only)
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

/// Module metadata configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleConfig {
    /// Rust module the generated entrypoint imports
    pub name: String,

    /// Default region for functions that do not pin one
    pub region: Option<String>,
}

/// A single function declaration
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionDecl {
    /// Trigger family
    pub trigger: TriggerKindDecl,

    /// Handler path in the user module; defaults to the declaration key
    pub handler: Option<String>,

    /// Principals allowed to invoke the function (https only)
    pub invoker: Option<Vec<String>>,

    /// Source topic (pubsub only)
    pub topic: Option<String>,

    /// Retry delivery on failure (pubsub only)
    pub retry: Option<bool>,

    /// Schedule expression (schedule only)
    pub schedule: Option<String>,

    /// IANA timezone (schedule only)
    pub timezone: Option<String>,

    /// Retry policy (schedule only)
    pub retry_policy: Option<RetryPolicyDecl>,

    /// Region override for this function
    pub region: Option<String>,

    pub memory: Option<IntSetting>,
    pub timeout_seconds: Option<IntSetting>,
    pub min_instances: Option<IntSetting>,
    pub max_instances: Option<IntSetting>,
    pub concurrency: Option<IntSetting>,
    pub vpc: Option<VpcDecl>,
    pub ingress: Option<String>,
    pub service_account: Option<String>,

    #[serde(default)]
    pub labels: IndexMap<String, String>,

    #[serde(default)]
    pub secrets: Vec<String>,
}

impl FunctionDecl {
    /// The shared runtime option fields, detached from the trigger fields.
    pub fn options(&self) -> OptionsDecl {
        OptionsDecl {
            memory: self.memory.clone(),
            timeout_seconds: self.timeout_seconds.clone(),
            min_instances: self.min_instances.clone(),
            max_instances: self.max_instances.clone(),
            concurrency: self.concurrency.clone(),
            vpc: self.vpc.clone(),
            ingress: self.ingress.clone(),
            service_account: self.service_account.clone(),
            labels: self.labels.clone(),
            secrets: self.secrets.clone(),
        }
    }
}

/// Trigger family names accepted in declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKindDecl {
    Https,
    Callable,
    Pubsub,
    Schedule,
}

impl TriggerKindDecl {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKindDecl::Https => "https",
            TriggerKindDecl::Callable => "callable",
            TriggerKindDecl::Pubsub => "pubsub",
            TriggerKindDecl::Schedule => "schedule",
        }
    }
}

/// Runtime option fields shared by `[defaults]` and function tables.
///
/// Region intentionally lives on `[module]` and the function, not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsDecl {
    pub memory: Option<IntSetting>,
    pub timeout_seconds: Option<IntSetting>,
    pub min_instances: Option<IntSetting>,
    pub max_instances: Option<IntSetting>,
    pub concurrency: Option<IntSetting>,
    pub vpc: Option<VpcDecl>,
    pub ingress: Option<String>,
    pub service_account: Option<String>,

    #[serde(default)]
    pub labels: IndexMap<String, String>,

    #[serde(default)]
    pub secrets: Vec<String>,
}

/// An integer tunable: a literal value or the `"default"` reset sentinel
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntSetting {
    Value(u32),
    /// Only `"default"` is accepted; anything else fails validation
    Keyword(String),
}

/// VPC connector declaration
#[derive(Debug, Clone, Deserialize)]
pub struct VpcDecl {
    pub connector: String,
    pub egress_settings: Option<VpcEgressSettings>,
}

/// Retry policy declaration for scheduled functions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetryPolicyDecl {
    pub retry_count: Option<u32>,
    pub max_retry_duration: Option<String>,
    pub min_backoff_duration: Option<String>,
    pub max_backoff_duration: Option<String>,
    pub max_doublings: Option<u32>,
}

/// A deploy-time param declaration
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDecl {
    /// Param value space
    #[serde(rename = "type")]
    pub kind: ParamKind,

    /// Literal default; must match the declared type
    pub default: Option<toml::Value>,

    /// Description shown by deploy tooling
    pub description: Option<String>,

    /// Label shown when prompting for a value
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_minimal_module() {
        let decl = ModuleDecl::from_str(
            r#"
            [module]
            name = "greeter"

            [functions.greet]
            trigger = "https"
            "#,
        )
        .unwrap();

        assert_eq!(decl.module.name, "greeter");
        assert!(decl.has_function("greet"));
        assert!(!decl.has_function("other"));
    }

    #[test]
    fn test_int_setting_forms() {
        let decl = ModuleDecl::from_str(
            r#"
            [module]
            name = "greeter"

            [functions.greet]
            trigger = "https"
            memory = 512
            max_instances = "default"
            "#,
        )
        .unwrap();

        let func = &decl.functions["greet"];
        assert_eq!(func.memory, Some(IntSetting::Value(512)));
        assert_eq!(
            func.max_instances,
            Some(IntSetting::Keyword("default".to_string()))
        );
    }

    #[test]
    fn test_declaration_order_preserved() {
        let decl = ModuleDecl::from_str(
            r#"
            [module]
            name = "app"

            [functions.zeta]
            trigger = "https"

            [functions.alpha]
            trigger = "callable"
            "#,
        )
        .unwrap();

        let names: Vec<_> = decl.functions.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }
}
