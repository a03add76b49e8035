use serde::{Deserialize, Serialize};

use crate::annotation::Bounds;
use crate::error::CodecError;
use crate::tree::{Element, XML_ID};

/// Coordinate attributes owned by a zone
pub const COORDINATES: [&str; 4] = ["ulx", "uly", "lrx", "lry"];

/// Rectangular region on a page image, in image pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub ulx: u32,
    pub uly: u32,
    pub lrx: u32,
    pub lry: u32,
}

impl Zone {
    /// Zone covering `bounds`; fails when a lower-right corner exceeds `u32`
    pub fn from_bounds(id: impl Into<String>, bounds: Bounds) -> Result<Self, CodecError> {
        let id = id.into();
        let overflow = |attribute: &'static str| CodecError::CoordinateOverflow {
            zone: id.clone(),
            attribute,
        };
        let lrx = bounds.x.checked_add(bounds.w).ok_or_else(|| overflow("lrx"))?;
        let lry = bounds.y.checked_add(bounds.h).ok_or_else(|| overflow("lry"))?;

        Ok(Self {
            ulx: bounds.x,
            uly: bounds.y,
            lrx,
            lry,
            id,
        })
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.ulx, self.uly, self.lrx, self.lry)
    }

    pub fn from_element(element: &Element) -> Result<Self, CodecError> {
        let id = element.id().ok_or(CodecError::MissingZoneId)?.to_string();
        let [ulx, uly, lrx, lry] = COORDINATES;
        Ok(Self {
            ulx: coordinate(element, &id, ulx)?,
            uly: coordinate(element, &id, uly)?,
            lrx: coordinate(element, &id, lrx)?,
            lry: coordinate(element, &id, lry)?,
            id,
        })
    }

    pub fn to_element(&self) -> Element {
        let mut element = Element::new("zone").with_attribute(XML_ID, self.id.as_str());
        self.write_coordinates(&mut element);
        element
    }

    /// Overwrite the four coordinate attributes, leaving everything else alone
    pub fn write_coordinates(&self, element: &mut Element) {
        element.set_attribute("ulx", self.ulx.to_string());
        element.set_attribute("uly", self.uly.to_string());
        element.set_attribute("lrx", self.lrx.to_string());
        element.set_attribute("lry", self.lry.to_string());
    }
}

fn coordinate(element: &Element, zone: &str, attribute: &'static str) -> Result<u32, CodecError> {
    let raw = element
        .attribute(attribute)
        .ok_or_else(|| CodecError::MissingCoordinate {
            zone: zone.to_string(),
            attribute,
        })?;

    // Some encoders write fractional pixels
    raw.trim()
        .parse::<u32>()
        .ok()
        .or_else(|| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .map(|value| value.round() as u32)
        })
        .ok_or_else(|| CodecError::InvalidCoordinate {
            zone: zone.to_string(),
            attribute,
            value: raw.to_string(),
        })
}
