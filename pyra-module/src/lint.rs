//! Non-fatal diagnostics for declaration files.

use crate::decl::{IntSetting, ModuleDecl, TriggerKindDecl};

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A warning that doesn't prevent generation but should be addressed.
    Warning,
    /// Informational message about how the declaration will deploy.
    Info,
}

impl Severity {
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A non-fatal finding about a declaration.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Location in the declaration (e.g., "functions.greet_user").
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            location: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

/// Run all lints over a validated declaration.
pub fn lint(decl: &ModuleDecl) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (name, func) in &decl.functions {
        let location = format!("functions.{name}");

        if func.region.is_none() && decl.module.region.is_none() {
            diagnostics.push(
                Diagnostic::info(format!(
                    "'{name}' has no region and will deploy to {}",
                    pyra_registry::DEFAULT_REGION
                ))
                .at(location.clone()),
            );
        }

        if func.trigger == TriggerKindDecl::Pubsub && func.retry.is_none() {
            diagnostics.push(
                Diagnostic::warning(format!(
                    "'{name}' does not set retry; failed deliveries will not be retried"
                ))
                .at(location.clone()),
            );
        }

        if matches!(func.min_instances, Some(IntSetting::Value(v)) if v > 0) {
            diagnostics.push(
                Diagnostic::info(format!(
                    "'{name}' reserves warm instances, which are billed while idle"
                ))
                .at(location),
            );
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn lint_module(content: &str) -> Vec<Diagnostic> {
        lint(&ModuleDecl::from_str(content).unwrap())
    }

    #[test]
    fn test_clean_module_has_no_findings() {
        let diagnostics = lint_module(
            r#"
            [module]
            name = "app"
            region = "us-central1"

            [functions.greet]
            trigger = "https"
            "#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_missing_region_noted() {
        let diagnostics = lint_module(
            r#"
            [module]
            name = "app"

            [functions.greet]
            trigger = "https"
            "#,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Info);
        assert_eq!(diagnostics[0].location.as_deref(), Some("functions.greet"));
    }

    #[test]
    fn test_pubsub_without_retry_warns() {
        let diagnostics = lint_module(
            r#"
            [module]
            name = "app"
            region = "us-central1"

            [functions.on_event]
            trigger = "pubsub"
            topic = "events"
            "#,
        );
        assert!(diagnostics.iter().any(|d| d.severity.is_warning()));
    }

    #[test]
    fn test_warm_instances_noted() {
        let diagnostics = lint_module(
            r#"
            [module]
            name = "app"
            region = "us-central1"

            [functions.greet]
            trigger = "https"
            min_instances = 2
            "#,
        );
        assert!(
            diagnostics
                .iter()
                .any(|d| d.message.contains("billed while idle"))
        );
    }
}
