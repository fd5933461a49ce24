// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Parsing, validation, and loading of `functions.toml` declarations.
//!
//! The user's module declares its functions in a TOML file; this crate turns
//! that file into a [`pyra_registry::Registry`] during a defined load phase,
//! reporting problems as span-carrying diagnostics.

mod decl;
mod error;
mod file;
mod lint;
mod load;
mod parse;
mod validate;

pub use decl::{
    FunctionDecl, IntSetting, ModuleConfig, ModuleDecl, OptionsDecl, ParamDecl, RetryPolicyDecl,
    TriggerKindDecl, VpcDecl,
};
pub use error::{Error, Result};
pub use file::FunctionsToml;
pub use lint::{Diagnostic, Severity, lint};
pub use load::build_registry;
pub use parse::parse_module;
pub use validate::ParseContext;
