use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::bridge::BridgeConfig;
use crate::pipeline::PipelineConfig;
use crate::rasterizer::RasterizerConfig;
use crate::transcoder::TranscoderConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub rasterizer: RasterizerConfig,
    #[serde(default)]
    pub transcoder: TranscoderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            pipeline: PipelineConfig::default(),
            bridge: BridgeConfig::default(),
            rasterizer: RasterizerConfig::default(),
            transcoder: TranscoderConfig::default(),
        }
    }
}

/// Filesystem storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory of the media library.
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("media")
}
