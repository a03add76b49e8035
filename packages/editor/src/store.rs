//! # Document Store
//!
//! Single source of truth for the loaded MEI document, its page list and
//! the UI state derived from them.
//!
//! The document is held as an `Arc<MeiDocument>` and never edited in place:
//! every mutation works on a copy and swaps it in when it succeeded. A
//! [`DocumentStore::snapshot`] taken before a swap keeps showing the old
//! version.
//!
//! ```text
//! load ─► Arc<v0> ── create_zone ──► Arc<v1> ── update_zone ──► Arc<v2>
//!            ▲                          ▲
//!        snapshot                   snapshot
//! ```

use std::sync::Arc;

use facsimile_mei::{id_generator::document_seed, Annotation, IdGenerator, MeiDocument, Page};
use tracing::{debug, info};

use crate::errors::EditorError;
use crate::mutations::MutationResult;
use crate::navigator::PageNavigator;
use crate::sync::{self, ZoneAttachment};

const DEFAULT_ID_KEY: &str = "facsimile";

#[derive(Debug)]
pub struct DocumentStore {
    pub(crate) document: Option<Arc<MeiDocument>>,
    pub(crate) pages: Vec<Page>,
    pub(crate) navigator: PageNavigator,
    pub(crate) selected_zone_id: Option<String>,
    pub(crate) attachment: ZoneAttachment,
    pub(crate) loading: bool,
    pub(crate) processing: bool,
    pub(crate) active_modal: Option<String>,
    pub(crate) last_ingest_error: Option<String>,
    /// Measure most recently added by `create_zone`
    pub(crate) last_inserted_measure: Option<String>,

    /// Increments on every document swap
    pub(crate) version: u64,

    ids: IdGenerator,
    /// Fixed id seed; otherwise derived from the first page on load
    id_seed: Option<String>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            document: None,
            pages: Vec::new(),
            navigator: PageNavigator::default(),
            selected_zone_id: None,
            attachment: ZoneAttachment::default(),
            loading: false,
            processing: false,
            active_modal: None,
            last_ingest_error: None,
            last_inserted_measure: None,
            version: 0,
            ids: IdGenerator::new(DEFAULT_ID_KEY),
            id_seed: None,
        }
    }

    /// Store whose generated ids use a fixed seed
    pub fn with_id_seed(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        Self {
            ids: IdGenerator::from_seed(seed.clone()),
            id_seed: Some(seed),
            ..Self::new()
        }
    }

    /// Install a document and its pages and point at the first page
    pub fn load_document(&mut self, document: MeiDocument, pages: Vec<Page>) {
        info!(
            pages = pages.len(),
            surfaces = document.index().surface_count(),
            measures = document.index().measures().len(),
            "Loading document"
        );

        self.ids = match &self.id_seed {
            Some(seed) => IdGenerator::from_seed(seed.clone()),
            None => IdGenerator::from_seed(document_seed(
                pages.first().map(|page| page.uri.as_str()).unwrap_or(DEFAULT_ID_KEY),
            )),
        };

        self.navigator.reset(pages.len());
        self.pages = pages;
        self.document = Some(Arc::new(document));
        self.version += 1;
        self.processing = false;
        self.active_modal = None;
        self.last_ingest_error = None;
        self.last_inserted_measure = None;
    }

    /// Move to page `index`; out-of-range requests are ignored
    pub fn set_current_page(&mut self, index: usize) {
        if !self.navigator.go_to(index) {
            debug!(index, pages = self.pages.len(), "Ignoring out-of-range page");
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    pub fn set_modal(&mut self, modal: Option<String>) {
        self.active_modal = modal;
    }

    /// Select a zone by id, or clear the selection. The id is not checked.
    pub fn select_zone(&mut self, zone_id: Option<String>) {
        self.selected_zone_id = zone_id;
    }

    pub fn toggle_multi_zone_mode(&mut self) {
        self.attachment = self
            .attachment
            .toggled(self.last_inserted_measure.as_deref());
        debug!(multi_zone = self.attachment.is_multi(), "Toggled zone attachment");
    }

    /// Persist a newly drawn annotation as a zone on the current page
    pub fn create_zone(&mut self, annotation: Annotation) -> Result<MutationResult, EditorError> {
        let current = self.document.as_ref().ok_or(EditorError::NotLoaded)?;
        let position = self.navigator.one_based().ok_or(EditorError::NotLoaded)?;

        let created = sync::create_zone(
            current,
            position,
            &annotation,
            &self.attachment,
            self.selected_zone_id.as_deref(),
            &mut self.ids,
        )?;

        self.attachment = created.attachment;
        if created.inserted_measure.is_some() {
            self.last_inserted_measure = created.inserted_measure;
        }
        let version = self.swap(created.document);
        Ok(MutationResult {
            version,
            zone_id: Some(created.zone_id),
            measure_id: created.measure_id,
        })
    }

    /// Move or resize an existing zone on the current page
    pub fn update_zone(&mut self, annotation: Annotation) -> Result<MutationResult, EditorError> {
        let current = self.document.as_ref().ok_or(EditorError::NotLoaded)?;
        let position = self.navigator.one_based().ok_or(EditorError::NotLoaded)?;

        let next = sync::update_zone(current, position, &annotation)?;
        let version = self.swap(next);
        Ok(MutationResult {
            version,
            zone_id: annotation.id,
            measure_id: None,
        })
    }

    fn swap(&mut self, document: MeiDocument) -> u64 {
        self.document = Some(Arc::new(document));
        self.version += 1;
        self.version
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
