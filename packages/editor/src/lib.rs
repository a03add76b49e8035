//! # Facsimile Editor
//!
//! State core of the image-to-score annotation tool.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ ingestion: manifest → MEI + page list       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: DocumentStore                       │
//! │  - page navigation (index ↔ surface)        │
//! │  - zone create/update from annotations      │
//! │  - single / multi-zone measure linking      │
//! │  - derived views for the viewer             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ viewer: annotations over page images        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **MEI is source of truth**: annotations and measure lists are derived
//! 2. **Copy-on-write**: each edit produces a new document version
//! 3. **Ids are stable**: geometry edits never touch a zone's id
//!
//! ## Usage
//!
//! ```rust,ignore
//! use facsimile_editor::DocumentStore;
//! use facsimile_mei::{Annotation, Bounds};
//!
//! let mut store = DocumentStore::new();
//! store.load_xml(&std::fs::read_to_string("score.mei")?)?;
//!
//! store.set_current_page(1);
//! store.create_zone(Annotation::new("z1", Bounds::from_corners(10, 10, 50, 50), uri))?;
//!
//! let mei = store.serialized_document()?;
//! ```

mod errors;
mod ingest;
mod mutations;
mod navigator;
mod store;
mod sync;
mod views;

pub use errors::{EditorError, IngestError, StructuralLookupError};
pub use ingest::Ingested;
pub use mutations::{Mutation, MutationResult};
pub use navigator::{surface_position, PageNavigator};
pub use store::DocumentStore;
pub use sync::{create_zone, update_zone, CreatedZone, ZoneAttachment};
pub use views::RenderablePage;

// Re-export document types for convenience
pub use facsimile_mei::{Annotation, Bounds, Measure, MeiDocument, Page};
