//! The discovery manifest served to deployment tooling.
//!
//! A [`ManifestStack`] is derived from a registry, regenerated on each build
//! and never mutated in place. Serialization is YAML; field names follow the
//! deploy contract (camelCase), unset options are omitted, and the reset
//! sentinel becomes an explicit `null`.

mod endpoint;
mod error;
mod stack;

pub use endpoint::{
    CallableTrigger, EventFilter, EventTrigger, HttpsTrigger, ManifestEndpoint, ResetOr,
    ScheduleTrigger, SecretEnv,
};
pub use error::{Error, Result};
pub use stack::{ManifestStack, RequiredApi, SPEC_VERSION};

/// Path the generated entrypoint serves the manifest at.
pub const MANIFEST_PATH: &str = "/__/functions.yaml";
