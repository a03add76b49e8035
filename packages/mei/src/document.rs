//! # MEI Document
//!
//! An owned MEI document: prolog, root element tree and the index built
//! over it. Every edit goes through [`MeiDocument::modify`], which keeps the
//! index in step with the tree.

use std::sync::Arc;

use crate::index::DocumentIndex;
use crate::measure::Measure;
use crate::tree::{Element, NodePath};
use crate::zone::Zone;

/// XML declaration fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

/// Markup outside the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Misc {
    Declaration(Declaration),
    ProcessingInstruction(String),
    DocType(String),
    Comment(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeiDocument {
    pub(crate) prolog: Vec<Misc>,
    pub(crate) epilog: Vec<Misc>,
    root: Arc<Element>,
    index: DocumentIndex,
}

impl MeiDocument {
    pub fn new(root: Element) -> Self {
        Self::with_misc(vec![Misc::Declaration(Declaration::default())], root, Vec::new())
    }

    pub(crate) fn with_misc(prolog: Vec<Misc>, root: Element, epilog: Vec<Misc>) -> Self {
        let index = DocumentIndex::build(&root);
        Self {
            prolog,
            epilog,
            root: Arc::new(root),
            index,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }

    pub fn prolog(&self) -> &[Misc] {
        &self.prolog
    }

    pub fn element(&self, path: &NodePath) -> Option<&Element> {
        self.root.descendant(path)
    }

    /// Edit the element at `path`; the index is rebuilt afterwards.
    ///
    /// Returns `None` without touching the document when the path does not
    /// resolve to an element.
    pub fn modify<R>(&mut self, path: &NodePath, edit: impl FnOnce(&mut Element) -> R) -> Option<R> {
        self.root.descendant(path)?;
        let element = Arc::make_mut(&mut self.root).descendant_mut(path)?;
        let result = edit(element);
        self.index = DocumentIndex::build(&self.root);
        Some(result)
    }

    /// Zone elements of the surface at a one-based position
    pub fn zones_on_surface(&self, position: usize) -> Option<Vec<&Element>> {
        let surface = self.index.surface(position)?;
        Some(
            surface
                .zones
                .iter()
                .filter_map(|path| self.root.descendant(path))
                .collect(),
        )
    }

    /// Zone element by id
    pub fn zone_element(&self, id: &str) -> Option<&Element> {
        let location = self.index.zone(id)?;
        self.root.descendant(&location.path)
    }

    /// Typed zone by id; `None` when absent or lacking coordinates
    pub fn zone(&self, id: &str) -> Option<Zone> {
        self.zone_element(id)
            .and_then(|element| Zone::from_element(element).ok())
    }

    /// Every measure in document order
    pub fn measures(&self) -> Vec<Measure> {
        self.index
            .measures()
            .iter()
            .filter_map(|path| self.root.descendant(path))
            .map(Measure::from_element)
            .collect()
    }

    pub fn measure(&self, id: &str) -> Option<Measure> {
        let path = self.index.measure_by_id(&self.root, id)?;
        self.root.descendant(&path).map(Measure::from_element)
    }
}
