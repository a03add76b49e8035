//! # Annotation Sync Engine
//!
//! Turns viewer annotations into zone edits on a working copy of the
//! document. The caller swaps the returned copy in; on error the copy is
//! dropped and the caller's document is untouched.
//!
//! ## Zone attachment
//!
//! ```text
//!            toggle
//!   Single ────────► MultiOpen { open_measure }
//!          ◄────────
//! ```
//!
//! - `Single`: every new zone gets a new measure.
//! - `MultiOpen` with a selected zone: the new zone joins the measure that
//!   references the selected zone.
//! - `MultiOpen` otherwise: the new zone joins the open measure. Toggling
//!   opens the most recently inserted measure; without one (or once it is
//!   gone) the last measure in the score is used. A score without measures
//!   gets a new one.

use facsimile_mei::{
    annotation_to_zone, annotation_to_zone_element, append_zone_to_last_measure,
    append_zone_to_measure, create_measure, insert_measure, Annotation, Element, IdGenerator,
    InsertContext, MeiDocument, Zone,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{EditorError, StructuralLookupError};

/// How new zones attach to measures
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ZoneAttachment {
    #[default]
    Single,
    /// Consecutive zones aggregate onto one measure
    #[serde(rename_all = "camelCase")]
    MultiOpen { open_measure: Option<String> },
}

/// What to do with the measure side of a new zone
#[derive(Debug, Clone, PartialEq, Eq)]
enum MeasurePlan {
    Create,
    JoinMeasure(String),
    JoinLast,
}

impl ZoneAttachment {
    pub fn is_multi(&self) -> bool {
        matches!(self, ZoneAttachment::MultiOpen { .. })
    }

    /// Flip the mode; existing links are left as they are.
    ///
    /// Entering multi-zone mode opens `last_inserted`, the measure most
    /// recently added to the score.
    pub fn toggled(&self, last_inserted: Option<&str>) -> Self {
        match self {
            ZoneAttachment::Single => ZoneAttachment::MultiOpen {
                open_measure: last_inserted.map(str::to_string),
            },
            ZoneAttachment::MultiOpen { .. } => ZoneAttachment::Single,
        }
    }

    fn plan(&self, doc: &MeiDocument, selected_zone: Option<&str>) -> MeasurePlan {
        let ZoneAttachment::MultiOpen { open_measure } = self else {
            return MeasurePlan::Create;
        };

        let selected_measure = selected_zone.and_then(|zone_id| {
            doc.index()
                .measures_referencing(doc.root(), zone_id)
                .last()
                .and_then(|path| doc.element(path))
                .and_then(Element::id)
                .map(str::to_string)
        });
        if let Some(measure_id) = selected_measure {
            return MeasurePlan::JoinMeasure(measure_id);
        }

        match open_measure {
            Some(id) if doc.index().measure_by_id(doc.root(), id).is_some() => {
                MeasurePlan::JoinMeasure(id.clone())
            }
            _ if doc.index().measures().is_empty() => MeasurePlan::Create,
            _ => MeasurePlan::JoinLast,
        }
    }

    fn after_attaching(&self, measure_id: Option<String>) -> Self {
        match self {
            ZoneAttachment::Single => ZoneAttachment::Single,
            ZoneAttachment::MultiOpen { .. } => ZoneAttachment::MultiOpen {
                open_measure: measure_id,
            },
        }
    }
}

/// Result of creating a zone
#[derive(Debug, Clone)]
pub struct CreatedZone {
    pub document: MeiDocument,
    pub zone_id: String,
    /// Measure the zone was linked into
    pub measure_id: Option<String>,
    /// Set when a new measure was added for the zone
    pub inserted_measure: Option<String>,
    pub attachment: ZoneAttachment,
}

/// Append a zone for `annotation` to the surface at `position` and link it
/// into the score.
pub fn create_zone(
    doc: &MeiDocument,
    position: usize,
    annotation: &Annotation,
    attachment: &ZoneAttachment,
    selected_zone: Option<&str>,
    ids: &mut IdGenerator,
) -> Result<CreatedZone, EditorError> {
    let mut next = doc.clone();

    let surface = next
        .index()
        .surface(position)
        .ok_or(StructuralLookupError::SurfaceNotFound {
            position,
            surfaces: next.index().surface_count(),
        })?
        .path
        .clone();

    let mut annotation = annotation.clone();
    let needs_id = match annotation.id.as_deref() {
        Some(id) if next.index().contains_id(id) => {
            return Err(EditorError::DuplicateZoneId(id.to_string()));
        }
        Some(id) => id.is_empty(),
        None => true,
    };
    if needs_id {
        annotation.id = Some(ids.fresh_id("zone", next.index()));
    }

    let zone = annotation_to_zone_element(&annotation)?;
    let zone_id = zone.id().unwrap_or_default().to_string();

    next.modify(&surface, |surface| surface.push_child(zone))
        .ok_or(StructuralLookupError::SurfaceNotFound {
            position,
            surfaces: doc.index().surface_count(),
        })?;

    let plan = attachment.plan(&next, selected_zone);
    debug!(zone_id = %zone_id, position, plan = ?plan, "Creating zone");

    let mut inserted_measure = None;
    let measure_id = match plan {
        MeasurePlan::Create => {
            let measure_id = ids.fresh_id("measure", next.index());
            let mut measure = create_measure(&measure_id);
            measure.set_attribute("facs", format!("#{zone_id}"));
            insert_measure(
                &mut next,
                measure,
                InsertContext {
                    surface_position: position,
                },
            );
            inserted_measure = Some(measure_id.clone());
            Some(measure_id)
        }
        MeasurePlan::JoinMeasure(measure_id) => {
            append_zone_to_measure(&mut next, &measure_id, &zone_id).and_then(|measure| measure.id)
        }
        MeasurePlan::JoinLast => {
            append_zone_to_last_measure(&mut next, &zone_id).and_then(|measure| measure.id)
        }
    };

    Ok(CreatedZone {
        document: next,
        zone_id,
        attachment: attachment.after_attaching(measure_id.clone()),
        measure_id,
        inserted_measure,
    })
}

/// Copy the coordinates of `annotation` onto the zone with the same id on
/// the surface at `position`. The id and every other attribute stay as they
/// are, so measure links survive geometry edits.
pub fn update_zone(
    doc: &MeiDocument,
    position: usize,
    annotation: &Annotation,
) -> Result<MeiDocument, EditorError> {
    let mut next = doc.clone();
    let transient: Zone = annotation_to_zone(annotation)?;

    let surface = next
        .index()
        .surface(position)
        .ok_or(StructuralLookupError::SurfaceNotFound {
            position,
            surfaces: next.index().surface_count(),
        })?;

    let not_found = || StructuralLookupError::ZoneNotFound {
        zone_id: transient.id.clone(),
        position,
    };

    // Only this surface's zones; ids repeated on other surfaces don't interfere
    let path = surface
        .zones
        .iter()
        .find(|path| next.element(path).and_then(Element::id) == Some(transient.id.as_str()))
        .cloned()
        .ok_or_else(not_found)?;

    debug!(zone_id = %transient.id, position, "Updating zone geometry");
    next.modify(&path, |zone| transient.write_coordinates(zone))
        .ok_or_else(not_found)?;

    Ok(next)
}
