//! # Document Index
//!
//! Typed addressing for the parts of an MEI document the editor touches.
//! Rebuilt alongside every document version so lookups by surface position
//! or zone id never scan the tree.

use std::collections::{HashMap, HashSet};

use crate::measure::parse_facs;
use crate::tree::{Element, NodePath};

/// A `<surface>` and the zones it contains
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceEntry {
    pub path: NodePath,
    pub id: Option<String>,
    /// Zone paths in document order
    pub zones: Vec<NodePath>,
}

/// Where a zone lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneLocation {
    /// One-based surface position
    pub surface_position: usize,
    pub path: NodePath,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentIndex {
    surfaces: Vec<SurfaceEntry>,
    zones: HashMap<String, ZoneLocation>,
    measures: Vec<NodePath>,
    ids: HashSet<String>,
    sections: Vec<NodePath>,
    body: Option<NodePath>,
    music: Option<NodePath>,
}

impl DocumentIndex {
    pub fn build(root: &Element) -> Self {
        let mut index = Self::default();
        index.visit(root, NodePath::root(), None);
        index
    }

    fn visit(&mut self, element: &Element, path: NodePath, surface: Option<usize>) {
        if let Some(id) = element.id() {
            self.ids.insert(id.to_string());
        }

        let mut surface = surface;
        match element.local_name() {
            "surface" => {
                self.surfaces.push(SurfaceEntry {
                    path: path.clone(),
                    id: element.id().map(str::to_string),
                    zones: Vec::new(),
                });
                surface = Some(self.surfaces.len() - 1);
            }
            "zone" => {
                if let Some(slot) = surface {
                    self.surfaces[slot].zones.push(path.clone());
                    if let Some(id) = element.id() {
                        self.zones.insert(
                            id.to_string(),
                            ZoneLocation {
                                surface_position: slot + 1,
                                path: path.clone(),
                            },
                        );
                    }
                }
            }
            "measure" => self.measures.push(path.clone()),
            "section" => self.sections.push(path.clone()),
            "body" if self.body.is_none() => self.body = Some(path.clone()),
            "music" if self.music.is_none() => self.music = Some(path.clone()),
            _ => {}
        }

        for (i, child) in element.child_elements() {
            self.visit(child, path.child(i), surface);
        }
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Surface at a one-based position
    pub fn surface(&self, position: usize) -> Option<&SurfaceEntry> {
        position
            .checked_sub(1)
            .and_then(|slot| self.surfaces.get(slot))
    }

    pub fn surfaces(&self) -> &[SurfaceEntry] {
        &self.surfaces
    }

    pub fn zone(&self, id: &str) -> Option<&ZoneLocation> {
        self.zones.get(id)
    }

    pub fn measures(&self) -> &[NodePath] {
        &self.measures
    }

    pub fn last_section(&self) -> Option<&NodePath> {
        self.sections.last()
    }

    pub fn body(&self) -> Option<&NodePath> {
        self.body.as_ref()
    }

    pub fn music(&self) -> Option<&NodePath> {
        self.music.as_ref()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Path of the measure carrying `id`
    pub fn measure_by_id(&self, root: &Element, id: &str) -> Option<NodePath> {
        self.measures
            .iter()
            .find(|path| root.descendant(path).and_then(Element::id) == Some(id))
            .cloned()
    }

    /// Paths of measures whose facs references `zone_id`
    pub fn measures_referencing(&self, root: &Element, zone_id: &str) -> Vec<NodePath> {
        self.measures
            .iter()
            .filter(|path| {
                root.descendant(path)
                    .and_then(|measure| measure.attribute("facs"))
                    .map(|facs| parse_facs(facs).iter().any(|id| id == zone_id))
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}
