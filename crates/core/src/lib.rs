pub mod bridge;
pub mod config;
pub mod conversion;
pub mod events;
pub mod jobs;
pub mod media;
pub mod metrics;
pub mod pipeline;
pub mod rasterizer;
pub mod retry;
pub mod storage;
pub mod testing;
pub mod transcoder;
pub mod transform;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use conversion::{ConversionDefinition, ConversionRegistry, ConversionSet, Manipulation};
pub use media::{MediaDescriptor, MediaType};
pub use pipeline::{DerivedFileOrchestrator, PipelineConfig, PipelineError, WorkingDirectory};
