//! Function definitions and the registration registry for Pyra.
//!
//! This crate provides the unified type definitions used across the Pyra
//! toolchain. A [`Registry`] is the in-process record of every declared
//! function and deploy-time param; the manifest builder and the entrypoint
//! generator both consume it read-only.
//!
//! # Architecture
//!
//! ```text
//! functions.toml → pyra-module (load phase) → pyra-registry (Registry) → generators
//! ```
//!
//! The registry is an explicitly constructed value passed by reference
//! through the pipeline. Registration is append-only: there is no removal
//! operation, and after the load phase the registry is only read.

mod definition;
mod name;
mod options;
mod params;
mod registry;
mod trigger;

pub use definition::FunctionDefinition;
pub use name::endpoint_id;
pub use options::{
    IngressSettings, MemorySize, RuntimeOptions, Setting, VpcEgressSettings, VpcOptions,
};
pub use params::{Param, ParamDefault, ParamKind};
pub use registry::{Registry, RegistryError};
pub use trigger::{PUBSUB_MESSAGE_PUBLISHED, RetryPolicy, TriggerKind, TriggerSpec};

/// Region used when neither the function nor the module pins one.
pub const DEFAULT_REGION: &str = "us-central1";
