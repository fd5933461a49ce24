//! Runtime options shared by all function kinds.
//!
//! Every tunable is a three-state [`Setting`]: left alone, reset to the
//! provider's factory default, or pinned to a value. The distinction matters
//! on the wire: unset options are omitted from the manifest, while a reset
//! serializes as an explicit `null` so deploy tooling clears whatever is
//! currently configured.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A runtime option value as declared by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Setting<T> {
    /// Not declared. The option is omitted from the manifest.
    #[default]
    Inherit,
    /// Reset the option to the provider's factory default.
    Restore,
    /// Pin the option to an explicit value.
    Value(T),
}

impl<T> Setting<T> {
    /// Returns true if the option was not declared.
    pub fn is_inherit(&self) -> bool {
        matches!(self, Setting::Inherit)
    }

    /// The pinned value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Setting::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Fall back to `default` when this setting was not declared.
    pub fn or(self, default: Self) -> Self {
        match self {
            Setting::Inherit => default,
            declared => declared,
        }
    }
}

/// Valid memory sizes, in megabytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u32")]
pub enum MemorySize {
    Mb256,
    Mb512,
    Gb1,
    Gb2,
    Gb4,
    Gb8,
}

impl MemorySize {
    /// All sizes the provider accepts, in ascending order.
    pub const ALL: [MemorySize; 6] = [
        MemorySize::Mb256,
        MemorySize::Mb512,
        MemorySize::Gb1,
        MemorySize::Gb2,
        MemorySize::Gb4,
        MemorySize::Gb8,
    ];

    /// The size in megabytes.
    pub fn mb(self) -> u32 {
        match self {
            MemorySize::Mb256 => 256,
            MemorySize::Mb512 => 512,
            MemorySize::Gb1 => 1 << 10,
            MemorySize::Gb2 => 2 << 10,
            MemorySize::Gb4 => 4 << 10,
            MemorySize::Gb8 => 8 << 10,
        }
    }

    /// Look up a size by its megabyte count.
    pub fn from_mb(mb: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.mb() == mb)
    }
}

impl From<MemorySize> for u32 {
    fn from(size: MemorySize) -> u32 {
        size.mb()
    }
}

/// What kinds of outgoing connections a VPC connector allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VpcEgressSettings {
    PrivateRangesOnly,
    AllTraffic,
}

/// Configuration for routing a function through a virtual private cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpcOptions {
    /// Connector id. Prefer a bare `<id>` over the full
    /// `projects/<project>/locations/<region>/connectors/<id>` form.
    pub connector: String,
    #[serde(rename = "egressSettings", skip_serializing_if = "Option::is_none")]
    pub egress_settings: Option<VpcEgressSettings>,
}

/// What kind of traffic can reach a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngressSettings {
    AllowAll,
    AllowInternalOnly,
    AllowInternalAndGclb,
}

impl IngressSettings {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngressSettings::AllowAll => "ALLOW_ALL",
            IngressSettings::AllowInternalOnly => "ALLOW_INTERNAL_ONLY",
            IngressSettings::AllowInternalAndGclb => "ALLOW_INTERNAL_AND_GCLB",
        }
    }
}

impl std::str::FromStr for IngressSettings {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALLOW_ALL" => Ok(IngressSettings::AllowAll),
            "ALLOW_INTERNAL_ONLY" => Ok(IngressSettings::AllowInternalOnly),
            "ALLOW_INTERNAL_AND_GCLB" => Ok(IngressSettings::AllowInternalAndGclb),
            _ => Err(()),
        }
    }
}

/// Options available for every function kind.
///
/// A module-level `[defaults]` table produces one of these too; function
/// options are merged over it with [`RuntimeOptions::or_defaults`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeOptions {
    /// Region to deploy into. Resolved against the module default and then
    /// the provider default at manifest build.
    pub region: Option<String>,
    /// Memory to allocate.
    pub memory: Setting<MemorySize>,
    /// Seconds before an invocation fails with a timeout.
    pub timeout_seconds: Setting<u32>,
    /// Instance count kept warm at all times.
    pub min_instances: Setting<u32>,
    /// Upper bound on instance count.
    pub max_instances: Setting<u32>,
    /// Concurrent requests per instance.
    pub concurrency: Setting<u32>,
    /// VPC connector configuration.
    pub vpc: Setting<VpcOptions>,
    /// Which traffic may invoke the function.
    pub ingress: Setting<IngressSettings>,
    /// Service account the function runs as.
    pub service_account: Setting<String>,
    /// Deployment labels.
    pub labels: IndexMap<String, String>,
    /// Secret names exposed to the function environment.
    pub secrets: Vec<String>,
}

impl RuntimeOptions {
    /// Merge module-level defaults under this function's options.
    ///
    /// Declared values win; labels union with the function's entries taking
    /// precedence per key; secrets union in first-seen order.
    pub fn or_defaults(self, defaults: &RuntimeOptions) -> Self {
        let mut labels = defaults.labels.clone();
        labels.extend(self.labels);

        let mut secrets = defaults.secrets.clone();
        for secret in self.secrets {
            if !secrets.contains(&secret) {
                secrets.push(secret);
            }
        }

        Self {
            region: self.region.or_else(|| defaults.region.clone()),
            memory: self.memory.or(defaults.memory),
            timeout_seconds: self.timeout_seconds.or(defaults.timeout_seconds),
            min_instances: self.min_instances.or(defaults.min_instances),
            max_instances: self.max_instances.or(defaults.max_instances),
            concurrency: self.concurrency.or(defaults.concurrency),
            vpc: self.vpc.or(defaults.vpc.clone()),
            ingress: self.ingress.or(defaults.ingress),
            service_account: self.service_account.or(defaults.service_account.clone()),
            labels,
            secrets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_or_keeps_declared() {
        assert_eq!(Setting::Value(1).or(Setting::Value(2)), Setting::Value(1));
        assert_eq!(Setting::<u32>::Restore.or(Setting::Value(2)), Setting::Restore);
    }

    #[test]
    fn test_setting_or_falls_back() {
        assert_eq!(Setting::<u32>::Inherit.or(Setting::Value(2)), Setting::Value(2));
        assert_eq!(Setting::<u32>::Inherit.or(Setting::Inherit), Setting::Inherit);
    }

    #[test]
    fn test_memory_size_mb() {
        assert_eq!(MemorySize::Mb256.mb(), 256);
        assert_eq!(MemorySize::Gb1.mb(), 1024);
        assert_eq!(MemorySize::Gb8.mb(), 8192);
    }

    #[test]
    fn test_memory_size_from_mb() {
        assert_eq!(MemorySize::from_mb(512), Some(MemorySize::Mb512));
        assert_eq!(MemorySize::from_mb(2048), Some(MemorySize::Gb2));
        assert_eq!(MemorySize::from_mb(300), None);
    }

    #[test]
    fn test_or_defaults_merges_labels_and_secrets() {
        let defaults = RuntimeOptions {
            labels: IndexMap::from([("team".to_string(), "infra".to_string())]),
            secrets: vec!["API_KEY".to_string()],
            max_instances: Setting::Value(100),
            ..Default::default()
        };
        let declared = RuntimeOptions {
            labels: IndexMap::from([("team".to_string(), "growth".to_string())]),
            secrets: vec!["API_KEY".to_string(), "DB_PASSWORD".to_string()],
            min_instances: Setting::Value(1),
            ..Default::default()
        };

        let merged = declared.or_defaults(&defaults);
        assert_eq!(merged.labels.get("team"), Some(&"growth".to_string()));
        assert_eq!(merged.secrets, vec!["API_KEY", "DB_PASSWORD"]);
        assert_eq!(merged.min_instances, Setting::Value(1));
        assert_eq!(merged.max_instances, Setting::Value(100));
    }
}
