//! Types for the conversion module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output encoding for a [`Manipulation::Format`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }
}

/// One image operation within a conversion's manipulation sequence.
///
/// The pipeline core treats these as opaque kinds; the
/// [`ImageTransformer`](crate::transform::ImageTransformer) collaborator
/// gives them meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Manipulation {
    /// Fit within the given box, preserving aspect ratio.
    Resize { width: u32, height: u32 },
    /// Cut a region out of the image.
    Crop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Crop to the given size, centered on a focal point expressed as
    /// percentages of the source dimensions.
    CropFocal {
        width: u32,
        height: u32,
        focal_x_pct: f32,
        focal_y_pct: f32,
    },
    /// Re-encode into another image format.
    Format(ImageFormat),
    /// Encoding quality, 1-100 (lossy formats only).
    Quality(u8),
    /// Convert to greyscale.
    Greyscale,
    /// Gaussian blur with the given sigma.
    Blur(f32),
    /// Overlay a watermark image at the bottom-right corner.
    Watermark { path: PathBuf },
}

/// A declared derived rendition: a name, an ordered manipulation sequence,
/// an execution mode and a collection filter.
///
/// Definitions are declared once at startup and never mutated during a run.
/// The name must be unique within its collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionDefinition {
    /// Rendition name; becomes the persisted file stem.
    pub name: String,
    /// Manipulations to apply in order.
    pub manipulations: Vec<Manipulation>,
    /// Whether this conversion is deferred to the job queue.
    pub queued: bool,
    /// Collection this conversion applies to.
    pub collection_name: String,
}

impl ConversionDefinition {
    /// Creates a synchronous conversion with no manipulations.
    pub fn new(name: impl Into<String>, collection_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            manipulations: Vec::new(),
            queued: false,
            collection_name: collection_name.into(),
        }
    }

    /// Appends a manipulation step.
    pub fn add(mut self, manipulation: Manipulation) -> Self {
        self.manipulations.push(manipulation);
        self
    }

    /// Marks this conversion as deferred to the job queue.
    pub fn queued(mut self) -> Self {
        self.queued = true;
        self
    }

    /// Extension of the produced artifact given the renderable source's
    /// extension: the last `Format` manipulation wins, otherwise the source
    /// extension carries through.
    pub fn result_extension(&self, source_extension: &str) -> String {
        self.manipulations
            .iter()
            .rev()
            .find_map(|m| match m {
                Manipulation::Format(format) => Some(format.extension().to_string()),
                _ => None,
            })
            .unwrap_or_else(|| source_extension.to_string())
    }

    /// File name of the persisted artifact for the given source extension.
    pub fn result_file_name(&self, source_extension: &str) -> String {
        format!("{}.{}", self.name, self.result_extension(source_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_extension_defaults_to_source() {
        let def = ConversionDefinition::new("thumb", "images").add(Manipulation::Resize {
            width: 100,
            height: 100,
        });
        assert_eq!(def.result_extension("png"), "png");
        assert_eq!(def.result_file_name("png"), "thumb.png");
    }

    #[test]
    fn test_result_extension_last_format_wins() {
        let def = ConversionDefinition::new("thumb", "images")
            .add(Manipulation::Format(ImageFormat::Png))
            .add(Manipulation::Format(ImageFormat::Webp));
        assert_eq!(def.result_extension("jpg"), "webp");
    }

    #[test]
    fn test_queued_flag() {
        let def = ConversionDefinition::new("detail", "images").queued();
        assert!(def.queued);
        assert!(!ConversionDefinition::new("thumb", "images").queued);
    }

    #[test]
    fn test_manipulation_serialization() {
        let m = Manipulation::CropFocal {
            width: 400,
            height: 300,
            focal_x_pct: 50.0,
            focal_y_pct: 25.0,
        };
        let json = serde_json::to_string(&m).unwrap();
        let parsed: Manipulation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }
}
