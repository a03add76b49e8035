//! # Measure Factory
//!
//! Builds `<measure>` elements and places them in the score without
//! reordering the measures already there.

use tracing::debug;

use crate::document::MeiDocument;
use crate::measure::{add_facs_reference, parse_facs, Measure};
use crate::tree::{Element, NodePath, XML_ID};

/// Where the new measure belongs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertContext {
    /// One-based position of the surface currently on screen
    pub surface_position: usize,
}

/// New, empty measure
pub fn create_measure(id: &str) -> Element {
    Element::new("measure").with_attribute(XML_ID, id)
}

/// Insert `measure` into the score and return its path.
///
/// The measure goes after the last measure that depicts something on the
/// current surface or an earlier one. Without such a measure it goes before
/// the first measure, and into the last `<section>` when the score has no
/// measures at all (the `body/mdiv/score/section` chain is created if needed).
/// A missing `n` is set to the measure's ordinal.
pub fn insert_measure(doc: &mut MeiDocument, mut measure: Element, context: InsertContext) -> NodePath {
    let measures = doc.index().measures().to_vec();

    let anchor = measures
        .iter()
        .enumerate()
        .filter(|(_, path)| {
            last_surface_depicted(doc, path)
                .map(|position| position <= context.surface_position)
                .unwrap_or(false)
        })
        .last()
        .map(|(ordinal, path)| (ordinal, path.clone()));

    let (parent, slot, ordinal) = match (anchor, measures.first()) {
        (Some((ordinal, path)), _) => {
            let (parent, slot) = path.split_last().unwrap_or((NodePath::root(), 0));
            (parent, slot + 1, ordinal + 1)
        }
        (None, Some(first)) => {
            let (parent, slot) = first.split_last().unwrap_or((NodePath::root(), 0));
            (parent, slot, 0)
        }
        (None, None) => {
            let section = ensure_section(doc);
            let slot = doc
                .element(&section)
                .map(|section| section.children.len())
                .unwrap_or(0);
            (section, slot, 0)
        }
    };

    if measure.attribute("n").is_none() {
        measure.set_attribute("n", (ordinal + 1).to_string());
    }

    debug!(
        measure_id = measure.id().unwrap_or_default(),
        ordinal = ordinal + 1,
        "Inserting measure"
    );

    let inserted = doc
        .modify(&parent, |parent| parent.insert_child(slot, measure))
        .unwrap_or(slot);
    parent.child(inserted)
}

/// Add a zone reference to the measure with `measure_id`
pub fn append_zone_to_measure(doc: &mut MeiDocument, measure_id: &str, zone_id: &str) -> Option<Measure> {
    let path = doc.index().measure_by_id(doc.root(), measure_id)?;
    append_zone_at(doc, &path, zone_id)
}

/// Add a zone reference to the last measure in document order
pub fn append_zone_to_last_measure(doc: &mut MeiDocument, zone_id: &str) -> Option<Measure> {
    let path = doc.index().measures().last()?.clone();
    append_zone_at(doc, &path, zone_id)
}

fn append_zone_at(doc: &mut MeiDocument, path: &NodePath, zone_id: &str) -> Option<Measure> {
    doc.modify(path, |measure| {
        add_facs_reference(measure, zone_id);
        Measure::from_element(measure)
    })
}

/// Highest surface position among the zones a measure references
fn last_surface_depicted(doc: &MeiDocument, measure: &NodePath) -> Option<usize> {
    let facs = doc.element(measure)?.attribute("facs")?;
    parse_facs(facs)
        .iter()
        .filter_map(|id| doc.index().zone(id))
        .map(|location| location.surface_position)
        .max()
}

/// Path of the last `<section>`, building the chain down from `<music>`
fn ensure_section(doc: &mut MeiDocument) -> NodePath {
    if let Some(section) = doc.index().last_section() {
        return section.clone();
    }

    let body = match doc.index().body().cloned() {
        Some(body) => body,
        None => {
            let music = match doc.index().music().cloned() {
                Some(music) => music,
                None => append_child(doc, &NodePath::root(), Element::new("music")),
            };
            append_child(doc, &music, Element::new("body"))
        }
    };

    let mut parent = body;
    for name in ["mdiv", "score", "section"] {
        parent = match existing_child(doc, &parent, name) {
            Some(path) => path,
            None => append_child(doc, &parent, Element::new(name)),
        };
    }
    parent
}

fn existing_child(doc: &MeiDocument, parent: &NodePath, name: &str) -> Option<NodePath> {
    let element = doc.element(parent)?;
    element
        .child_elements()
        .filter(|(_, child)| child.is(name))
        .last()
        .map(|(i, _)| parent.child(i))
}

fn append_child(doc: &mut MeiDocument, parent: &NodePath, child: Element) -> NodePath {
    let slot = doc
        .modify(parent, |parent| parent.push_child(child))
        .unwrap_or_default();
    parent.child(slot)
}
