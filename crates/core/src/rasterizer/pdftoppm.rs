//! Poppler `pdftoppm`-based rasterizer implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::error::RasterizeError;
use super::traits::PdfRasterizer;

/// Configuration for the `pdftoppm` rasterizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterizerConfig {
    /// Path to the pdftoppm binary.
    #[serde(default = "default_binary")]
    pub binary: PathBuf,

    /// Render resolution in DPI.
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Deadline for one rasterization in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_binary() -> PathBuf {
    PathBuf::from("pdftoppm")
}

fn default_dpi() -> u32 {
    150
}

fn default_timeout() -> u64 {
    120
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            dpi: default_dpi(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Rasterizer shelling out to poppler's `pdftoppm`.
///
/// Arguments are passed as a vector, never through a shell.
pub struct PdftoppmRasterizer {
    config: RasterizerConfig,
}

impl PdftoppmRasterizer {
    /// Creates a rasterizer with the given configuration.
    pub fn new(config: RasterizerConfig) -> Self {
        Self { config }
    }

    /// Creates a rasterizer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RasterizerConfig::default())
    }

    fn build_args(&self, pdf: &Path, output_stem: &Path) -> Vec<String> {
        vec![
            "-jpeg".to_string(),
            "-f".to_string(),
            "1".to_string(),
            "-singlefile".to_string(),
            "-r".to_string(),
            self.config.dpi.to_string(),
            pdf.to_string_lossy().to_string(),
            output_stem.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl PdfRasterizer for PdftoppmRasterizer {
    fn name(&self) -> &str {
        "pdftoppm"
    }

    async fn available(&self) -> bool {
        Command::new(&self.config.binary)
            .arg("-v")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok()
    }

    async fn rasterize_first_page(&self, pdf: &Path) -> Result<PathBuf, RasterizeError> {
        if !pdf.exists() {
            return Err(RasterizeError::InputNotFound {
                path: pdf.to_path_buf(),
            });
        }

        // pdftoppm appends the extension itself; hand it the bare stem.
        let output_stem = pdf.with_extension("");
        let output = output_stem.with_extension("jpg");
        let args = self.build_args(pdf, &output_stem);

        debug!(pdf = %pdf.display(), "rasterizing first page");

        let mut child = Command::new(&self.config.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            // A cancelled run must not leave pdftoppm running.
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RasterizeError::BinaryNotFound {
                        path: self.config.binary.clone(),
                    }
                } else {
                    RasterizeError::Io(e)
                }
            })?;

        let deadline = Duration::from_secs(self.config.timeout_secs);
        let status = match timeout(deadline, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                let _ = child.kill().await;
                return Err(RasterizeError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        };

        if !status.success() {
            return Err(RasterizeError::no_output(format!(
                "pdftoppm exited with code {:?}",
                status.code()
            )));
        }

        if !output.exists() {
            return Err(RasterizeError::no_output("output image missing"));
        }

        Ok(output)
    }
}
