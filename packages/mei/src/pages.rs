use serde::{Deserialize, Serialize};

use crate::document::MeiDocument;
use crate::error::{MeiError, MeiResult};
use crate::tree::Element;

/// One scanned page image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub uri: String,
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Page {
    pub fn new(uri: impl Into<String>, width: u32) -> Self {
        Self {
            uri: uri.into(),
            width,
            height: None,
        }
    }
}

/// Page list derived from each surface's `<graphic>`, in surface order.
///
/// Width falls back to the surface's `lrx` when the graphic has none.
pub fn pages_from_document(doc: &MeiDocument) -> MeiResult<Vec<Page>> {
    doc.index()
        .surfaces()
        .iter()
        .enumerate()
        .map(|(slot, entry)| {
            let position = slot + 1;
            let surface = doc
                .element(&entry.path)
                .ok_or(MeiError::MissingGraphic { position })?;
            page_for_surface(surface, position)
        })
        .collect()
}

fn page_for_surface(surface: &Element, position: usize) -> MeiResult<Page> {
    let graphic = surface
        .child_elements()
        .map(|(_, child)| child)
        .find(|child| child.is("graphic") && child.attribute("target").is_some())
        .ok_or(MeiError::MissingGraphic { position })?;

    let uri = graphic
        .attribute("target")
        .ok_or(MeiError::MissingGraphic { position })?;

    let width = match graphic.attribute("width").or_else(|| surface.attribute("lrx")) {
        Some(raw) => parse_dimension(graphic, "width", raw)?,
        None => 0,
    };
    let height = graphic
        .attribute("height")
        .map(|raw| parse_dimension(graphic, "height", raw))
        .transpose()?;

    Ok(Page {
        uri: uri.to_string(),
        width,
        height,
    })
}

fn parse_dimension(element: &Element, name: &str, raw: &str) -> MeiResult<u32> {
    // Dimensions may carry a unit suffix such as "px"
    raw.trim()
        .trim_end_matches("px")
        .parse::<u32>()
        .map_err(|_| MeiError::invalid_attribute(element.name.as_str(), name, raw))
}
