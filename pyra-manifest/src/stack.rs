//! The manifest document.

use indexmap::IndexMap;
use pyra_registry::{Param, Registry, TriggerKind};
use serde::Serialize;

use crate::{ManifestEndpoint, Result};

/// Contract version deploy tooling expects.
pub const SPEC_VERSION: &str = "v1alpha1";

/// The functions.yaml document: every registered function, in registration
/// order, keyed by endpoint id.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestStack {
    #[serde(rename = "specVersion")]
    pub spec_version: &'static str,

    pub endpoints: IndexMap<String, ManifestEndpoint>,

    #[serde(rename = "requiredApis", skip_serializing_if = "Vec::is_empty")]
    pub required_apis: Vec<RequiredApi>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
}

/// A provider API that must be enabled before deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredApi {
    #[serde(rename = "apiName")]
    pub api_name: String,

    pub reason: String,
}

impl ManifestStack {
    /// Derive the manifest from a registry.
    ///
    /// Deterministic: the same registry contents always produce the same
    /// document, ordered by registration.
    pub fn from_registry(registry: &Registry) -> Self {
        let endpoints = registry
            .functions()
            .map(|def| (def.endpoint_id(), ManifestEndpoint::from_definition(def)))
            .collect();

        Self {
            spec_version: SPEC_VERSION,
            endpoints,
            required_apis: required_apis(registry),
            params: registry.params().cloned().collect(),
        }
    }

    /// Render the document as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// APIs implied by the registered trigger kinds, in first-use order.
fn required_apis(registry: &Registry) -> Vec<RequiredApi> {
    let mut apis = Vec::new();

    for def in registry.functions() {
        let api = match def.trigger.kind() {
            TriggerKind::PubSub => Some(RequiredApi {
                api_name: "pubsub.googleapis.com".to_string(),
                reason: "Needed to receive Pub/Sub messages".to_string(),
            }),
            TriggerKind::Schedule => Some(RequiredApi {
                api_name: "cloudscheduler.googleapis.com".to_string(),
                reason: "Needed to schedule function invocations".to_string(),
            }),
            TriggerKind::Https | TriggerKind::Callable => None,
        };

        if let Some(api) = api
            && !apis.contains(&api)
        {
            apis.push(api);
        }
    }

    apis
}
