//! Configuration for the pipeline module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::events::CompletionPolicy;

/// Configuration for the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root under which per-run working directories are allocated.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// Queue name override for deferred conversions.
    #[serde(default)]
    pub queue_name: Option<String>,

    /// Whether completion events fire for conversions that produced no
    /// image artifact (audio media, thumbnail-less video).
    #[serde(default)]
    pub completion_policy: CompletionPolicy,
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir().join("mediaforge")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
            queue_name: None,
            completion_policy: CompletionPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Sets the working-directory root.
    pub fn with_temp_dir(mut self, dir: PathBuf) -> Self {
        self.temp_dir = dir;
        self
    }

    /// Sets the queue name override.
    pub fn with_queue_name(mut self, name: impl Into<String>) -> Self {
        self.queue_name = Some(name.into());
        self
    }

    /// Sets the completion policy.
    pub fn with_completion_policy(mut self, policy: CompletionPolicy) -> Self {
        self.completion_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!(config.queue_name.is_none());
        assert_eq!(config.completion_policy, CompletionPolicy::Attempted);
    }

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::default()
            .with_temp_dir(PathBuf::from("/var/tmp/forge"))
            .with_queue_name("renditions")
            .with_completion_policy(CompletionPolicy::Produced);

        assert_eq!(config.temp_dir, PathBuf::from("/var/tmp/forge"));
        assert_eq!(config.queue_name.as_deref(), Some("renditions"));
        assert_eq!(config.completion_policy, CompletionPolicy::Produced);
    }
}
