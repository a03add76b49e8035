//! # Zone Codec
//!
//! Converts between viewer annotations and `<zone>` elements. The two
//! directions are exact inverses on the zone id and its four coordinates;
//! the page uri is not stored on the zone and is supplied when decoding.

use crate::annotation::Annotation;
use crate::error::CodecError;
use crate::tree::Element;
use crate::zone::Zone;

/// Typed zone for an annotation
pub fn annotation_to_zone(annotation: &Annotation) -> Result<Zone, CodecError> {
    let id = annotation
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(CodecError::MissingZoneId)?;

    if annotation.bounds.is_empty() {
        return Err(CodecError::DegenerateBounds {
            width: annotation.bounds.w,
            height: annotation.bounds.h,
        });
    }

    Zone::from_bounds(id, annotation.bounds)
}

/// `<zone>` element for an annotation
pub fn annotation_to_zone_element(annotation: &Annotation) -> Result<Element, CodecError> {
    annotation_to_zone(annotation).map(|zone| zone.to_element())
}

/// Annotation for a `<zone>` element shown on `page_uri`
pub fn zone_to_annotation(zone: &Element, page_uri: &str) -> Result<Annotation, CodecError> {
    let zone = Zone::from_element(zone)?;
    Ok(Annotation::new(zone.id.clone(), zone.bounds(), page_uri))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Bounds;

    #[test]
    fn test_annotation_to_zone_element() {
        let annotation = Annotation::new("z1", Bounds::from_corners(10, 10, 50, 50), "p1");
        let element = annotation_to_zone_element(&annotation).unwrap();

        assert!(element.is("zone"));
        assert_eq!(element.id(), Some("z1"));
        assert_eq!(element.attribute("ulx"), Some("10"));
        assert_eq!(element.attribute("uly"), Some("10"));
        assert_eq!(element.attribute("lrx"), Some("50"));
        assert_eq!(element.attribute("lry"), Some("50"));
    }

    #[test]
    fn test_rejects_degenerate_bounds() {
        let annotation = Annotation::new("z1", Bounds::new(10, 10, 0, 5), "p1");
        assert_eq!(
            annotation_to_zone(&annotation),
            Err(CodecError::DegenerateBounds {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn test_requires_id() {
        let annotation = Annotation::unassigned(Bounds::new(1, 1, 1, 1), "p1");
        assert_eq!(
            annotation_to_zone(&annotation),
            Err(CodecError::MissingZoneId)
        );
    }
}
