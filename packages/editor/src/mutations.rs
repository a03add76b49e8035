//! # Store Mutations
//!
//! Serializable form of every entry point the surrounding application calls,
//! so UI events can be queued, logged or replayed from JSON.
//!
//! ## Semantics
//!
//! - `SetCurrentPage` outside `0..page_count` (negative included) is a no-op
//! - `SelectZone` does not check that the zone exists
//! - `CreateZone`/`UpdateZone` either swap in a new document version or fail
//!   with the store unchanged

use facsimile_mei::Annotation;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::EditorError;
use crate::store::DocumentStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    #[serde(rename_all = "camelCase")]
    SetCurrentPage { index: i64 },

    #[serde(rename_all = "camelCase")]
    SelectZone { zone_id: Option<String> },

    CreateZone { annotation: Annotation },

    UpdateZone { annotation: Annotation },

    ToggleMultiZone,

    SetLoading { loading: bool },

    SetProcessing { processing: bool },

    SetModal { modal: Option<String> },
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    /// Store version after the mutation
    pub version: u64,

    /// Zone created or updated
    pub zone_id: Option<String>,

    /// Measure the new zone was linked into
    pub measure_id: Option<String>,
}

impl DocumentStore {
    /// Apply a mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        debug!(mutation = ?mutation, "Applying mutation");

        match mutation {
            Mutation::CreateZone { annotation } => return self.create_zone(annotation),
            Mutation::UpdateZone { annotation } => return self.update_zone(annotation),
            Mutation::SetCurrentPage { index } => match usize::try_from(index) {
                Ok(index) => self.set_current_page(index),
                Err(_) => debug!(index, "Ignoring negative page index"),
            },
            Mutation::SelectZone { zone_id } => self.select_zone(zone_id),
            Mutation::ToggleMultiZone => self.toggle_multi_zone_mode(),
            Mutation::SetLoading { loading } => self.set_loading(loading),
            Mutation::SetProcessing { processing } => self.set_processing(processing),
            Mutation::SetModal { modal } => self.set_modal(modal),
        }

        Ok(MutationResult {
            version: self.version(),
            ..MutationResult::default()
        })
    }

    /// Apply mutations in order, stopping at the first failure
    pub fn apply_all(
        &mut self,
        mutations: impl IntoIterator<Item = Mutation>,
    ) -> Result<Vec<MutationResult>, EditorError> {
        mutations
            .into_iter()
            .map(|mutation| self.apply(mutation))
            .collect()
    }
}
