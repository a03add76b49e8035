//! # Ingestion Boundary
//!
//! Fetching a manifest and converting it to MEI happens outside the store.
//! The store only drives the `loading`/`processing` flags around it and
//! installs the result, so the UI can block edits during the window.
//!
//! ```text
//! loading=true ─► await source ─► loading=false
//!                     │ ok              │ err
//!               processing=true     processing=false
//!               load_document       last_ingest_error, Err(..)
//!               (processing=false)
//! ```

use std::future::Future;

use facsimile_mei::{pages_from_document, MeiDocument, Page};
use tracing::{info, warn};

use crate::errors::{EditorError, IngestError};
use crate::store::DocumentStore;

/// Output of the ingestion step
#[derive(Debug, Clone)]
pub struct Ingested {
    pub document: MeiDocument,
    pub pages: Vec<Page>,
}

impl Ingested {
    /// Pages derived from the document's own surfaces
    pub fn from_document(document: MeiDocument) -> Result<Self, IngestError> {
        let pages = pages_from_document(&document)?;
        Ok(Self { document, pages })
    }

    /// Parse MEI text and derive its pages
    pub fn from_xml(xml: &str) -> Result<Self, IngestError> {
        Self::from_document(MeiDocument::parse(xml)?)
    }
}

impl DocumentStore {
    /// Run an ingestion step and load its result.
    ///
    /// On failure nothing is loaded, both flags are cleared and the error is
    /// returned (and kept in [`DocumentStore::last_ingest_error`]).
    pub async fn ingest<F>(&mut self, source: F) -> Result<(), EditorError>
    where
        F: Future<Output = Result<Ingested, IngestError>>,
    {
        self.set_loading(true);
        let result = source.await;
        self.set_loading(false);

        match result {
            Ok(ingested) => {
                self.set_processing(true);
                self.load_document(ingested.document, ingested.pages);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Ingestion failed");
                self.set_processing(false);
                self.last_ingest_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Load MEI text directly, deriving pages from its surfaces
    pub fn load_xml(&mut self, xml: &str) -> Result<(), EditorError> {
        let ingested = Ingested::from_xml(xml)?;
        info!(pages = ingested.pages.len(), "Loaded MEI text");
        self.load_document(ingested.document, ingested.pages);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEI: &str = r#"<mei><music><facsimile>
        <surface><graphic target="p1.jpg" width="800"/></surface>
    </facsimile></music></mei>"#;

    #[test]
    fn test_load_xml() {
        let mut store = DocumentStore::new();
        store.load_xml(MEI).unwrap();

        assert!(store.is_ready());
        assert_eq!(store.pages(), &[Page::new("p1.jpg", 800)]);
        assert_eq!(store.current_page_zero_based(), Some(0));
    }

    #[test]
    fn test_load_xml_rejects_broken_markup() {
        let mut store = DocumentStore::new();
        let err = store.load_xml("<mei><music></mei>").unwrap_err();
        assert!(matches!(err, EditorError::Ingest(IngestError::Mei(_))));
        assert!(!store.is_ready());
    }
}
