//! Validation context and utilities for declaration parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Encapsulates the declaration content, filename, and current path through
/// the declaration hierarchy, so recursive validation can report errors with
/// spans and a readable location.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["functions", "greet_user"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "handler in 'functions.greet_user'" or just "function"
    /// if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Fail with a validation error anchored at `name` when possible.
    pub fn fail(&self, name: &str, message: impl Into<String>) -> Box<crate::Error> {
        self.source.validation_error(message, self.find_span(name))
    }

    /// Validate that a name is a valid identifier.
    ///
    /// Checks for reserved keywords and valid identifier format.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_rust_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }

    /// Validate a `::`-separated handler path segment by segment.
    pub fn validate_handler_path(&self, path: &str) -> Result<()> {
        for segment in path.split("::") {
            self.validate_name(segment, "handler")?;
        }
        Ok(())
    }
}

/// Rust reserved keywords that cannot be used as identifiers
/// Source: https://doc.rust-lang.org/reference/keywords.html
pub(crate) const RUST_KEYWORDS: &[&str] = &[
    // Strict keywords (2021 edition)
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
    // Reserved keywords (may be used in future)
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
    // Weak keywords (context-sensitive, but best to avoid)
    "union", "dyn",
];

/// Check if a name is a Rust reserved keyword
pub(crate) fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Check that a name is a valid identifier; returns the reason when not.
pub(crate) fn validate_identifier(name: &str) -> Option<String> {
    let Some(first) = name.chars().next() else {
        return Some("name is empty".to_string());
    };
    if !first.is_ascii_alphabetic() && first != '_' {
        return Some(format!("name starts with '{first}'"));
    }

    if let Some(bad) = name.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        return Some(format!("name contains '{bad}'"));
    }

    None
}

/// Find the span of a name in the TOML source
///
/// Searches for the patterns a declared name appears in: table headers
/// (`[functions.name]`, `[functions.name.vpc]`), assignments (`name = `),
/// and quoted values (`"name"`).
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    // Table header patterns with leading dot, e.g. [functions.name]
    let patterns_skip_1 = [
        format!(".{name}]"), // [functions.name]
        format!(".{name}."), // [functions.name.vpc]
    ];

    for pattern in &patterns_skip_1 {
        if let Some(pos) = src.find(pattern) {
            // +1 to skip the leading dot
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    // Assignment, e.g. name = "..."
    if let Some(pos) = src.find(&format!("{name} =")) {
        return Some(SourceSpan::from((pos, name.len())));
    }

    // Quoted value, e.g. handler = "name"
    if let Some(pos) = src.find(&format!("\"{name}\"")) {
        return Some(SourceSpan::from((pos + 1, name.len())));
    }

    None
}
