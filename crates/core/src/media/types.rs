//! Types for the media module.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broad media classification driving the staging pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// Raster image (jpg, png, webp, ...).
    Image,
    /// PDF document.
    Pdf,
    /// Word processing document (doc, docx, odt, rtf).
    Word,
    /// Presentation document (ppt, pptx, odp).
    Ppt,
    /// Video container.
    Video,
    /// Audio file.
    Audio,
    /// Anything the pipeline produces no derivatives for.
    Other,
}

impl MediaType {
    /// Classifies a file extension into a media type.
    ///
    /// Unknown extensions map to [`MediaType::Other`], which short-circuits
    /// derived-file generation entirely.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "tiff" | "tif" => Self::Image,
            "pdf" => Self::Pdf,
            "doc" | "docx" | "odt" | "rtf" => Self::Word,
            "ppt" | "pptx" | "odp" => Self::Ppt,
            "mp4" | "mkv" | "avi" | "mov" | "wmv" | "webm" | "m4v" | "mpg" | "mpeg" => Self::Video,
            "mp3" | "flac" | "wav" | "m4a" | "aac" | "ogg" | "opus" | "wma" => Self::Audio,
            _ => Self::Other,
        }
    }

    /// Whether this type needs the PDF rasterization capability during staging.
    pub fn needs_rasterizer(&self) -> bool {
        matches!(self, Self::Pdf | Self::Word | Self::Ppt)
    }

    /// Stable lowercase name, used as a metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Ppt => "ppt",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }
}

/// Immutable facts about one media item, owned by the caller for the
/// duration of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// Stable identity of the media item.
    pub id: Uuid,
    /// Original file name, without directory components.
    pub file_name: String,
    /// Original file extension, lowercase, without the leading dot.
    pub extension: String,
    /// Media classification.
    pub media_type: MediaType,
    /// Collection the item was uploaded into; selects the applicable
    /// conversion definitions.
    pub collection_name: String,
}

impl MediaDescriptor {
    /// Creates a descriptor, classifying the media type from the extension.
    pub fn new(
        file_name: impl Into<String>,
        extension: impl Into<String>,
        collection_name: impl Into<String>,
    ) -> Self {
        let extension = extension.into().to_ascii_lowercase();
        let media_type = MediaType::from_extension(&extension);
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            extension,
            media_type,
            collection_name: collection_name.into(),
        }
    }

    /// Overrides the classified media type.
    pub fn with_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_from_extension() {
        assert_eq!(MediaType::from_extension("jpg"), MediaType::Image);
        assert_eq!(MediaType::from_extension("JPEG"), MediaType::Image);
        assert_eq!(MediaType::from_extension("pdf"), MediaType::Pdf);
        assert_eq!(MediaType::from_extension("docx"), MediaType::Word);
        assert_eq!(MediaType::from_extension("pptx"), MediaType::Ppt);
        assert_eq!(MediaType::from_extension("mkv"), MediaType::Video);
        assert_eq!(MediaType::from_extension("flac"), MediaType::Audio);
        assert_eq!(MediaType::from_extension("zip"), MediaType::Other);
    }

    #[test]
    fn test_needs_rasterizer() {
        assert!(MediaType::Pdf.needs_rasterizer());
        assert!(MediaType::Word.needs_rasterizer());
        assert!(MediaType::Ppt.needs_rasterizer());
        assert!(!MediaType::Image.needs_rasterizer());
        assert!(!MediaType::Video.needs_rasterizer());
    }

    #[test]
    fn test_descriptor_new_classifies_type() {
        let media = MediaDescriptor::new("report.DOCX", "DOCX", "documents");
        assert_eq!(media.media_type, MediaType::Word);
        assert_eq!(media.extension, "docx");
        assert_eq!(media.collection_name, "documents");
    }

    #[test]
    fn test_descriptor_serialization() {
        let media = MediaDescriptor::new("clip.mp4", "mp4", "videos");
        let json = serde_json::to_string(&media).unwrap();
        let parsed: MediaDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, media);
    }
}
