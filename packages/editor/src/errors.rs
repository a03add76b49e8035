//! Error types for the editor

use facsimile_mei::{CodecError, MeiError};
use thiserror::Error;

/// The document and the page on screen disagree about what exists.
///
/// Raised before the working copy is swapped in, so the store keeps its
/// previous document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralLookupError {
    #[error("Surface {position} not found (document has {surfaces} surfaces)")]
    SurfaceNotFound { position: usize, surfaces: usize },

    #[error("Zone {zone_id} not found on surface {position}")]
    ZoneNotFound { zone_id: String, position: usize },
}

/// Failures of the external ingestion step
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Not a IIIF manifest: {0}")]
    NotAManifest(String),

    #[error("Conversion to MEI failed: {0}")]
    Conversion(String),

    #[error("MEI error: {0}")]
    Mei(#[from] MeiError),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No document loaded")]
    NotLoaded,

    #[error("Structural lookup failed: {0}")]
    Structural(#[from] StructuralLookupError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("MEI error: {0}")]
    Mei(#[from] MeiError),

    #[error("Zone id already in use: {0}")]
    DuplicateZoneId(String),

    #[error("Ingestion failed: {0}")]
    Ingest(#[from] IngestError),
}

impl EditorError {
    pub fn is_structural(&self) -> bool {
        matches!(self, EditorError::Structural(_))
    }
}
