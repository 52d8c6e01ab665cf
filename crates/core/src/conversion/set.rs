//! Conversion registry and per-media conversion sets.

use serde::{Deserialize, Serialize};

use super::types::ConversionDefinition;

/// All conversion definitions known to the application, in declaration order.
///
/// Declaration order is load-bearing: it determines fan-out order within a
/// run and therefore the order in which completion events fire.
#[derive(Debug, Clone, Default)]
pub struct ConversionRegistry {
    definitions: Vec<ConversionDefinition>,
}

impl ConversionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a conversion definition.
    ///
    /// Replaces an existing definition with the same name in the same
    /// collection, keeping its original position.
    pub fn register(&mut self, definition: ConversionDefinition) {
        if let Some(existing) = self.definitions.iter_mut().find(|d| {
            d.name == definition.name && d.collection_name == definition.collection_name
        }) {
            *existing = definition;
        } else {
            self.definitions.push(definition);
        }
    }

    /// Returns all registered definitions.
    pub fn definitions(&self) -> &[ConversionDefinition] {
        &self.definitions
    }

    /// Builds the conversion set applicable to the given collection,
    /// partitioned into synchronous and queued subsets with declaration
    /// order preserved in each.
    pub fn for_collection(&self, collection_name: &str) -> ConversionSet {
        let (queued, non_queued) = self
            .definitions
            .iter()
            .filter(|d| d.collection_name == collection_name)
            .cloned()
            .partition(|d| d.queued);

        ConversionSet { non_queued, queued }
    }
}

/// The conversions applicable to one media item, split by execution mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionSet {
    /// Conversions run inline on the invoking task, in declaration order.
    pub non_queued: Vec<ConversionDefinition>,
    /// Conversions deferred to the job dispatcher, in declaration order.
    pub queued: Vec<ConversionDefinition>,
}

impl ConversionSet {
    /// Whether neither subset contains any conversions.
    pub fn is_empty(&self) -> bool {
        self.non_queued.is_empty() && self.queued.is_empty()
    }
}
