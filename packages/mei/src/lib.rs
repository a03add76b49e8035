//! # Facsimile MEI
//!
//! MEI document model for linking scanned page images to a score.
//!
//! ```text
//! <facsimile>                        <body> … <section>
//!   <surface>  ← one per page          <measure facs="#z1 #z2"/>
//!     <graphic target="page.jpg"/>     <measure facs="#z3"/>
//!     <zone xml:id="z1" ulx uly lrx lry/>
//! ```
//!
//! - [`MeiDocument`]: parsed tree plus a [`DocumentIndex`] for typed lookups
//! - [`codec`]: viewer [`Annotation`]s ↔ `<zone>` elements
//! - [`measure_factory`]: creating and placing `<measure>` elements
//! - [`pages_from_document`]: page list from the surfaces' graphics

pub mod annotation;
pub mod codec;
pub mod document;
pub mod error;
pub mod id_generator;
pub mod index;
pub mod measure;
pub mod measure_factory;
pub mod pages;
mod reader;
pub mod serializer;
pub mod tree;
pub mod zone;

pub use annotation::{Annotation, Bounds, WebAnnotation};
pub use codec::{annotation_to_zone, annotation_to_zone_element, zone_to_annotation};
pub use document::{Declaration, MeiDocument, Misc};
pub use error::{CodecError, MeiError, MeiResult};
pub use id_generator::IdGenerator;
pub use index::{DocumentIndex, SurfaceEntry, ZoneLocation};
pub use measure::{format_facs, parse_facs, Measure};
pub use measure_factory::{
    append_zone_to_last_measure, append_zone_to_measure, create_measure, insert_measure,
    InsertContext,
};
pub use pages::{pages_from_document, Page};
pub use tree::{Element, Node, NodePath, XML_ID};
pub use zone::Zone;
