//! # Annotations
//!
//! Image-space form of a zone as exchanged with the page viewer, plus its
//! W3C Web Annotation JSON shape.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

pub const ANNOTATION_CONTEXT: &str = "http://www.w3.org/ns/anno.jsonld";
pub const MEDIA_FRAGMENTS: &str = "http://www.w3.org/TR/media-frags/";

/// Axis-aligned box in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Bounds {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Box spanning upper-left to lower-right corners
    pub fn from_corners(ulx: u32, uly: u32, lrx: u32, lry: u32) -> Self {
        Self {
            x: ulx,
            y: uly,
            w: lrx.saturating_sub(ulx),
            h: lry.saturating_sub(uly),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Media fragment value, e.g. `xywh=pixel:10,10,40,40`
    pub fn to_fragment(&self) -> String {
        format!("xywh=pixel:{},{},{},{}", self.x, self.y, self.w, self.h)
    }

    pub fn parse_fragment(value: &str) -> Result<Self, CodecError> {
        let malformed = || CodecError::MalformedSelector(value.to_string());

        let fragment = value.trim().strip_prefix("xywh=").ok_or_else(malformed)?;
        let fragment = fragment.strip_prefix("pixel:").unwrap_or(fragment);

        let numbers = fragment
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite() && *n >= 0.0)
                    .map(|n| n.round() as u32)
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(malformed)?;

        match numbers.as_slice() {
            &[x, y, w, h] => Ok(Self::new(x, y, w, h)),
            _ => Err(malformed()),
        }
    }
}

/// A bounding box drawn on a page image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Zone id without `#`; `None` until one is assigned
    pub id: Option<String>,
    pub bounds: Bounds,
    pub page_uri: String,
}

impl Annotation {
    pub fn new(id: impl Into<String>, bounds: Bounds, page_uri: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            bounds,
            page_uri: page_uri.into(),
        }
    }

    pub fn unassigned(bounds: Bounds, page_uri: impl Into<String>) -> Self {
        Self {
            id: None,
            bounds,
            page_uri: page_uri.into(),
        }
    }

    pub fn from_web_annotation(annotation: &WebAnnotation) -> Result<Self, CodecError> {
        let selector = annotation
            .target
            .selector
            .as_ref()
            .ok_or(CodecError::MissingSelector)?;

        Ok(Self {
            id: annotation
                .id
                .as_deref()
                .map(|id| id.trim_start_matches('#').to_string())
                .filter(|id| !id.is_empty()),
            bounds: Bounds::parse_fragment(&selector.value)?,
            page_uri: annotation.target.source.clone(),
        })
    }

    pub fn to_web_annotation(&self) -> WebAnnotation {
        WebAnnotation {
            context: ANNOTATION_CONTEXT.to_string(),
            id: self.id.as_ref().map(|id| format!("#{id}")),
            kind: "Annotation".to_string(),
            body: Vec::new(),
            target: Target {
                source: self.page_uri.clone(),
                selector: Some(Selector {
                    kind: "FragmentSelector".to_string(),
                    conforms_to: Some(MEDIA_FRAGMENTS.to_string()),
                    value: self.bounds.to_fragment(),
                }),
            },
        }
    }
}

/// W3C Web Annotation as produced by the image viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebAnnotation {
    #[serde(rename = "@context", default = "default_context")]
    pub context: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub body: Vec<serde_json::Value>,

    pub target: Target,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selector {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "conformsTo", default, skip_serializing_if = "Option::is_none")]
    pub conforms_to: Option<String>,

    pub value: String,
}

fn default_context() -> String {
    ANNOTATION_CONTEXT.to_string()
}

fn default_kind() -> String {
    "Annotation".to_string()
}
