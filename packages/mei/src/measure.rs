use serde::{Deserialize, Serialize};

use crate::tree::Element;

/// Read-only view of a `<measure>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    pub id: Option<String>,
    pub n: Option<String>,
    /// Zone ids referenced through `facs`, in attribute order
    pub facs: Vec<String>,
}

impl Measure {
    pub fn from_element(element: &Element) -> Self {
        Self {
            id: element.id().map(str::to_string),
            n: element.attribute("n").map(str::to_string),
            facs: element.attribute("facs").map(parse_facs).unwrap_or_default(),
        }
    }

    pub fn references(&self, zone_id: &str) -> bool {
        self.facs.iter().any(|id| id == zone_id)
    }
}

/// Split a `facs` value into zone ids, dropping the `#` of local references
pub fn parse_facs(value: &str) -> Vec<String> {
    value
        .split_whitespace()
        .map(|reference| reference.trim_start_matches('#').to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

pub fn format_facs<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|id| format!("#{}", id.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Add a zone reference to a measure element; no-op if already referenced
pub fn add_facs_reference(measure: &mut Element, zone_id: &str) {
    let mut ids = measure.attribute("facs").map(parse_facs).unwrap_or_default();
    if !ids.iter().any(|id| id == zone_id) {
        ids.push(zone_id.to_string());
    }
    measure.set_attribute("facs", format_facs(&ids));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_facs() {
        assert_eq!(parse_facs("#z1  #z2 z3"), vec!["z1", "z2", "z3"]);
        assert!(parse_facs("  ").is_empty());
    }

    #[test]
    fn test_add_facs_reference() {
        let mut measure = Element::new("measure");
        add_facs_reference(&mut measure, "z1");
        add_facs_reference(&mut measure, "z2");
        add_facs_reference(&mut measure, "z1");
        assert_eq!(measure.attribute("facs"), Some("#z1 #z2"));
    }
}
