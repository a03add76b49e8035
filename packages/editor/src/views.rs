//! Read-only views derived from the store on demand

use std::sync::Arc;

use facsimile_mei::{zone_to_annotation, Annotation, Element, Measure, MeiDocument, MeiError, Page};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::DocumentStore;
use crate::sync::ZoneAttachment;

/// Page geometry as the image viewer expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderablePage {
    pub tile_source: String,
    pub width: u32,
    pub x: u32,
    pub y: u32,
}

impl From<&Page> for RenderablePage {
    fn from(page: &Page) -> Self {
        Self {
            tile_source: page.uri.clone(),
            width: page.width,
            x: 0,
            y: 0,
        }
    }
}

impl DocumentStore {
    pub fn is_ready(&self) -> bool {
        self.document.is_some()
    }

    /// Current document version; readers keep it valid across later edits
    pub fn snapshot(&self) -> Option<Arc<MeiDocument>> {
        self.document.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// MEI text of the current document, `None` before a load
    pub fn serialized_document(&self) -> Result<Option<String>, MeiError> {
        self.document
            .as_deref()
            .map(MeiDocument::to_xml_string)
            .transpose()
    }

    pub fn current_page_one_based(&self) -> Option<usize> {
        self.navigator.one_based()
    }

    pub fn current_page_zero_based(&self) -> Option<usize> {
        self.navigator.zero_based()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn renderable_pages(&self) -> Vec<RenderablePage> {
        self.pages.iter().map(RenderablePage::from).collect()
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.navigator
            .zero_based()
            .and_then(|index| self.pages.get(index))
    }

    /// Zones of the current page as annotations, minus the selected zone
    /// (the viewer draws that one in its edit overlay)
    pub fn zones_on_current_page(&self) -> Vec<Annotation> {
        let Some((doc, page)) = self.current_surface_context() else {
            return Vec::new();
        };

        let position = self.navigator.one_based().unwrap_or(0);
        let Some(zones) = doc.zones_on_surface(position) else {
            warn!(position, "No surface for the current page");
            return Vec::new();
        };

        zones
            .into_iter()
            .filter(|zone| zone.id() != self.selected_zone_id.as_deref())
            .filter_map(|zone| to_annotation(zone, &page.uri))
            .collect()
    }

    pub fn all_measures(&self) -> Vec<Measure> {
        self.document
            .as_deref()
            .map(MeiDocument::measures)
            .unwrap_or_default()
    }

    pub fn multi_zone_active(&self) -> bool {
        self.attachment.is_multi()
    }

    pub fn zone_attachment(&self) -> &ZoneAttachment {
        &self.attachment
    }

    pub fn selected_zone_id(&self) -> Option<&str> {
        self.selected_zone_id.as_deref()
    }

    /// The selected zone as an annotation if it is on the current page
    pub fn selected_zone_annotation(&self) -> Option<Annotation> {
        let selected = self.selected_zone_id.as_deref()?;
        let (doc, page) = self.current_surface_context()?;
        let position = self.navigator.one_based()?;

        doc.zones_on_surface(position)?
            .into_iter()
            .find(|zone| zone.id() == Some(selected))
            .and_then(|zone| to_annotation(zone, &page.uri))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn active_modal(&self) -> Option<&str> {
        self.active_modal.as_deref()
    }

    pub fn last_ingest_error(&self) -> Option<&str> {
        self.last_ingest_error.as_deref()
    }

    fn current_surface_context(&self) -> Option<(&MeiDocument, &Page)> {
        let doc = self.document.as_deref()?;
        let page = self.current_page()?;
        Some((doc, page))
    }
}

fn to_annotation(zone: &Element, page_uri: &str) -> Option<Annotation> {
    match zone_to_annotation(zone, page_uri) {
        Ok(annotation) => Some(annotation),
        Err(err) => {
            warn!(zone_id = zone.id().unwrap_or_default(), error = %err, "Skipping unreadable zone");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderable_page() {
        let page = RenderablePage::from(&Page::new("p1.jpg", 1200));
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            serde_json::json!({ "tileSource": "p1.jpg", "width": 1200, "x": 0, "y": 0 })
        );
    }

    #[test]
    fn test_views_before_load() {
        let store = DocumentStore::new();
        assert!(!store.is_ready());
        assert_eq!(store.serialized_document().unwrap(), None);
        assert!(store.zones_on_current_page().is_empty());
        assert!(store.all_measures().is_empty());
        assert!(store.current_page().is_none());
        assert_eq!(store.selected_zone_annotation(), None);
    }
}
