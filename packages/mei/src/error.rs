use thiserror::Error;

pub type MeiResult<T> = Result<T, MeiError>;

#[derive(Error, Debug)]
pub enum MeiError {
    #[error("XML error at byte {pos}: {source}")]
    Xml {
        pos: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Unbalanced markup at byte {pos}: {message}")]
    Unbalanced { pos: usize, message: String },

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Surface {position} has no <graphic> with a target")]
    MissingGraphic { position: usize },

    #[error("Invalid attribute {name}=\"{value}\" on <{element}>")]
    InvalidAttribute {
        element: String,
        name: String,
        value: String,
    },

    #[error("Serialized output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeiError {
    pub fn xml(pos: usize, source: impl Into<quick_xml::Error>) -> Self {
        Self::Xml {
            pos,
            source: source.into(),
        }
    }

    pub fn unbalanced(pos: usize, message: impl Into<String>) -> Self {
        Self::Unbalanced {
            pos,
            message: message.into(),
        }
    }

    pub fn invalid_attribute(
        element: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Failures converting between annotations and zone elements.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Annotation has no fragment selector")]
    MissingSelector,

    #[error("Malformed fragment selector: {0}")]
    MalformedSelector(String),

    #[error("Degenerate bounds: {width}x{height} (zones need a positive width and height)")]
    DegenerateBounds { width: u32, height: u32 },

    #[error("Zone {zone} is missing coordinate attribute {attribute}")]
    MissingCoordinate { zone: String, attribute: &'static str },

    #[error("Zone {zone} has invalid coordinate {attribute}=\"{value}\"")]
    InvalidCoordinate {
        zone: String,
        attribute: &'static str,
        value: String,
    },

    #[error("Zone element has no xml:id")]
    MissingZoneId,

    #[error("Zone {zone} coordinate {attribute} exceeds the pixel range")]
    CoordinateOverflow { zone: String, attribute: &'static str },
}
