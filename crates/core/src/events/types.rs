//! Types for the events module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conversion::ConversionDefinition;
use crate::media::MediaDescriptor;

/// What "completed" means for a conversion event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Fire for every requested conversion, even when no image artifact was
    /// produced (audio media, video without a thumbnail frame). This is the
    /// reference behavior.
    #[default]
    Attempted,
    /// Fire only for conversions that produced an actual artifact.
    Produced,
}

/// Published after one conversion of one media item was processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionCompleted {
    /// Media item the conversion belongs to.
    pub media_id: Uuid,
    /// Collection of the media item.
    pub collection_name: String,
    /// Name of the completed conversion.
    pub conversion_name: String,
    /// Whether an image artifact was actually produced and persisted.
    /// `false` on the partial-success paths (audio, thumbnail-less video).
    pub artifact_produced: bool,
    /// When the event was published.
    pub completed_at: DateTime<Utc>,
}

impl ConversionCompleted {
    /// Builds an event for the given media and conversion.
    pub fn new(
        media: &MediaDescriptor,
        conversion: &ConversionDefinition,
        artifact_produced: bool,
    ) -> Self {
        Self {
            media_id: media.id,
            collection_name: media.collection_name.clone(),
            conversion_name: conversion.name.clone(),
            artifact_produced,
            completed_at: Utc::now(),
        }
    }
}

/// Event bus seam: consumers observe completion synchronously, immediately
/// after each artifact is persisted.
#[async_trait]
pub trait EventNotifier: Send + Sync {
    /// Publishes a completion event.
    async fn publish(&self, event: ConversionCompleted);
}
