//! Trigger specifications.

use serde::Serialize;

/// Event type emitted when a message is published to a Pub/Sub topic.
pub const PUBSUB_MESSAGE_PUBLISHED: &str = "google.cloud.pubsub.topic.v1.messagePublished";

/// Kind-specific trigger configuration, owned by a function definition.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerSpec {
    /// Raw HTTPS request function.
    Https {
        /// Principals allowed to invoke the function.
        invoker: Option<Vec<String>>,
    },
    /// Callable RPC function.
    Callable,
    /// Event function fired when a message lands on a topic.
    PubSub {
        topic: String,
        /// Whether delivery is retried on failure.
        retry: Option<bool>,
    },
    /// Scheduler-invoked function.
    Schedule {
        /// Schedule expression, e.g. `every 24 hours` or a cron line.
        schedule: String,
        /// IANA timezone; the scheduler assumes UTC when absent.
        timezone: Option<String>,
        retry: Option<RetryPolicy>,
    },
}

impl TriggerSpec {
    pub fn kind(&self) -> TriggerKind {
        match self {
            TriggerSpec::Https { .. } => TriggerKind::Https,
            TriggerSpec::Callable => TriggerKind::Callable,
            TriggerSpec::PubSub { .. } => TriggerKind::PubSub,
            TriggerSpec::Schedule { .. } => TriggerKind::Schedule,
        }
    }
}

/// The trigger families Pyra can deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Https,
    Callable,
    PubSub,
    Schedule,
}

impl TriggerKind {
    /// The name used in declarations and user-facing output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Https => "https",
            TriggerKind::Callable => "callable",
            TriggerKind::PubSub => "pubsub",
            TriggerKind::Schedule => "schedule",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Retry configuration for scheduled functions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetryPolicy {
    #[serde(rename = "retryCount", skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,
    #[serde(rename = "maxRetryDuration", skip_serializing_if = "Option::is_none")]
    pub max_retry_duration: Option<String>,
    #[serde(rename = "minBackoffDuration", skip_serializing_if = "Option::is_none")]
    pub min_backoff_duration: Option<String>,
    #[serde(rename = "maxBackoffDuration", skip_serializing_if = "Option::is_none")]
    pub max_backoff_duration: Option<String>,
    #[serde(rename = "maxDoublings", skip_serializing_if = "Option::is_none")]
    pub max_doublings: Option<u32>,
}
