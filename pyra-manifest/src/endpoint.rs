//! Endpoint entries as they appear in the manifest.
//!
//! Field names match the deploy contract, so serde renames are explicit
//! throughout rather than Rust-cased.

use pyra_registry::{
    DEFAULT_REGION, FunctionDefinition, IngressSettings, RetryPolicy, Setting, TriggerSpec,
    VpcOptions,
};
use serde::{Serialize, Serializer};

/// A declared option that survived into the manifest: either an explicit
/// value or the reset sentinel, which serializes as `null` so deploy tooling
/// restores the factory default.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetOr<T> {
    Reset,
    Value(T),
}

impl<T: Serialize> Serialize for ResetOr<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ResetOr::Reset => serializer.serialize_none(),
            ResetOr::Value(value) => value.serialize(serializer),
        }
    }
}

/// Convert a registry setting into its manifest field.
fn field<T: Clone>(setting: &Setting<T>) -> Option<ResetOr<T>> {
    match setting {
        Setting::Inherit => None,
        Setting::Restore => Some(ResetOr::Reset),
        Setting::Value(value) => Some(ResetOr::Value(value.clone())),
    }
}

/// A definition of a function as it appears in the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEndpoint {
    #[serde(rename = "entryPoint")]
    pub entry_point: String,

    pub region: String,

    pub platform: &'static str,

    pub cpu: &'static str,

    #[serde(rename = "availableMemoryMb", skip_serializing_if = "Option::is_none")]
    pub available_memory_mb: Option<ResetOr<u32>>,

    #[serde(rename = "timeoutSeconds", skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<ResetOr<u32>>,

    #[serde(rename = "minInstances", skip_serializing_if = "Option::is_none")]
    pub min_instances: Option<ResetOr<u32>>,

    #[serde(rename = "maxInstances", skip_serializing_if = "Option::is_none")]
    pub max_instances: Option<ResetOr<u32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<ResetOr<u32>>,

    #[serde(rename = "serviceAccount", skip_serializing_if = "Option::is_none")]
    pub service_account: Option<ResetOr<String>>,

    #[serde(rename = "ingressSettings", skip_serializing_if = "Option::is_none")]
    pub ingress_settings: Option<ResetOr<IngressSettings>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<ResetOr<VpcOptions>>,

    #[serde(skip_serializing_if = "indexmap::IndexMap::is_empty")]
    pub labels: indexmap::IndexMap<String, String>,

    #[serde(
        rename = "secretEnvironmentVariables",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub secret_environment_variables: Vec<SecretEnv>,

    #[serde(rename = "httpsTrigger", skip_serializing_if = "Option::is_none")]
    pub https_trigger: Option<HttpsTrigger>,

    #[serde(rename = "callableTrigger", skip_serializing_if = "Option::is_none")]
    pub callable_trigger: Option<CallableTrigger>,

    #[serde(rename = "eventTrigger", skip_serializing_if = "Option::is_none")]
    pub event_trigger: Option<EventTrigger>,

    #[serde(rename = "scheduleTrigger", skip_serializing_if = "Option::is_none")]
    pub schedule_trigger: Option<ScheduleTrigger>,
}

/// A secret exposed to the function environment.
#[derive(Debug, Clone, Serialize)]
pub struct SecretEnv {
    pub key: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HttpsTrigger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoker: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CallableTrigger {}

#[derive(Debug, Clone, Serialize)]
pub struct EventTrigger {
    #[serde(rename = "eventType")]
    pub event_type: String,

    #[serde(rename = "eventFilters")]
    pub event_filters: Vec<EventFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventFilter {
    pub attribute: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleTrigger {
    pub schedule: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(rename = "retryConfig", skip_serializing_if = "Option::is_none")]
    pub retry_config: Option<RetryPolicy>,
}

impl ManifestEndpoint {
    /// Build the manifest entry for one definition.
    pub fn from_definition(definition: &FunctionDefinition) -> Self {
        let options = &definition.options;

        let mut endpoint = Self {
            entry_point: definition.handler.clone(),
            region: options
                .region
                .clone()
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            platform: "gcfv2",
            cpu: "gcf_gen1",
            available_memory_mb: field(&options.memory).map(|m| match m {
                ResetOr::Reset => ResetOr::Reset,
                ResetOr::Value(size) => ResetOr::Value(size.mb()),
            }),
            timeout_seconds: field(&options.timeout_seconds),
            min_instances: field(&options.min_instances),
            max_instances: field(&options.max_instances),
            concurrency: field(&options.concurrency),
            service_account: field(&options.service_account),
            ingress_settings: field(&options.ingress),
            vpc: field(&options.vpc),
            labels: options.labels.clone(),
            secret_environment_variables: options
                .secrets
                .iter()
                .map(|key| SecretEnv { key: key.clone() })
                .collect(),
            https_trigger: None,
            callable_trigger: None,
            event_trigger: None,
            schedule_trigger: None,
        };

        match &definition.trigger {
            TriggerSpec::Https { invoker } => {
                endpoint.https_trigger = Some(HttpsTrigger {
                    invoker: invoker.clone(),
                });
            }
            TriggerSpec::Callable => {
                endpoint.callable_trigger = Some(CallableTrigger {});
            }
            TriggerSpec::PubSub { topic, retry } => {
                endpoint.event_trigger = Some(EventTrigger {
                    event_type: pyra_registry::PUBSUB_MESSAGE_PUBLISHED.to_string(),
                    event_filters: vec![EventFilter {
                        attribute: "resource".to_string(),
                        value: topic.clone(),
                    }],
                    retry: *retry,
                });
            }
            TriggerSpec::Schedule {
                schedule,
                timezone,
                retry,
            } => {
                endpoint.schedule_trigger = Some(ScheduleTrigger {
                    schedule: schedule.clone(),
                    timezone: timezone.clone(),
                    retry_config: retry.clone(),
                });
            }
        }

        endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyra_registry::{MemorySize, RuntimeOptions};

    #[test]
    fn test_region_falls_back_to_provider_default() {
        let def = FunctionDefinition::new("greet", TriggerSpec::Https { invoker: None });
        let endpoint = ManifestEndpoint::from_definition(&def);
        assert_eq!(endpoint.region, DEFAULT_REGION);
    }

    #[test]
    fn test_memory_flattens_to_mb() {
        let def = FunctionDefinition::new("greet", TriggerSpec::Callable).with_options(
            RuntimeOptions {
                memory: Setting::Value(MemorySize::Gb1),
                ..Default::default()
            },
        );
        let endpoint = ManifestEndpoint::from_definition(&def);
        assert_eq!(endpoint.available_memory_mb, Some(ResetOr::Value(1024)));
    }

    #[test]
    fn test_restore_becomes_reset() {
        let def = FunctionDefinition::new("greet", TriggerSpec::Callable).with_options(
            RuntimeOptions {
                max_instances: Setting::Restore,
                ..Default::default()
            },
        );
        let endpoint = ManifestEndpoint::from_definition(&def);
        assert_eq!(endpoint.max_instances, Some(ResetOr::Reset));
        assert_eq!(endpoint.min_instances, None);
    }

    #[test]
    fn test_pubsub_event_trigger_shape() {
        let def = FunctionDefinition::new(
            "on_user_created",
            TriggerSpec::PubSub {
                topic: "users".to_string(),
                retry: Some(true),
            },
        );
        let endpoint = ManifestEndpoint::from_definition(&def);

        let trigger = endpoint.event_trigger.unwrap();
        assert_eq!(
            trigger.event_type,
            "google.cloud.pubsub.topic.v1.messagePublished"
        );
        assert_eq!(trigger.event_filters[0].attribute, "resource");
        assert_eq!(trigger.event_filters[0].value, "users");
        assert_eq!(trigger.retry, Some(true));
    }

    #[test]
    fn test_serialized_field_names_and_skips() {
        let def = FunctionDefinition::new(
            "greet_user",
            TriggerSpec::Https {
                invoker: Some(vec!["public".to_string()]),
            },
        )
        .with_options(RuntimeOptions {
            min_instances: Setting::Value(1),
            ..Default::default()
        });

        let value = serde_json::to_value(ManifestEndpoint::from_definition(&def)).unwrap();
        assert_eq!(value["entryPoint"], "greet_user");
        assert_eq!(value["platform"], "gcfv2");
        assert_eq!(value["cpu"], "gcf_gen1");
        assert_eq!(value["minInstances"], 1);
        assert_eq!(value["httpsTrigger"]["invoker"][0], "public");
        // Unset options never appear.
        assert!(value.get("maxInstances").is_none());
        assert!(value.get("labels").is_none());
    }

    #[test]
    fn test_exactly_one_trigger_field() {
        let def = FunctionDefinition::new("greet", TriggerSpec::Callable);
        let endpoint = ManifestEndpoint::from_definition(&def);

        assert!(endpoint.callable_trigger.is_some());
        assert!(endpoint.https_trigger.is_none());
        assert!(endpoint.event_trigger.is_none());
        assert!(endpoint.schedule_trigger.is_none());
    }
}
