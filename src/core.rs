use serde_json::Value;
use thiserror::Error;

/// A bare coordinate pair `[x, y]`, the atom of the canonical nested-array
/// form shared by validation, storage and JSON rendering.
pub type CoordPair = [f64; 2];

/// The closed set of geometry kinds supported by the crate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl GeometryType {
    /// Mixed-case name used in the JSON rendering, e.g. `"LineString"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
        }
    }

    /// Upper-case keyword used in the WKT rendering, e.g. `"LINESTRING"`.
    pub fn wkt_tag(&self) -> &'static str {
        match self {
            Self::Point => "POINT",
            Self::LineString => "LINESTRING",
            Self::Polygon => "POLYGON",
            Self::MultiPoint => "MULTIPOINT",
            Self::MultiLineString => "MULTILINESTRING",
            Self::MultiPolygon => "MULTIPOLYGON",
        }
    }

    /// Resolve an upper-case type keyword to its variant.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "POINT" => Some(Self::Point),
            "LINESTRING" => Some(Self::LineString),
            "POLYGON" => Some(Self::Polygon),
            "MULTIPOINT" => Some(Self::MultiPoint),
            "MULTILINESTRING" => Some(Self::MultiLineString),
            "MULTIPOLYGON" => Some(Self::MultiPolygon),
            _ => None,
        }
    }
}

impl std::fmt::Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type family a spatial column belongs to. Both families share the same
/// concrete geometry kinds; the family only participates in instantiation
/// dispatch and SQL declarations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeFamily {
    Geometry,
    Geography,
}

impl std::fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Geometry => write!(f, "Geometry"),
            Self::Geography => write!(f, "Geography"),
        }
    }
}

/// Errors raised by constructors, validators, parsers and the platform
/// adapter. Every error is a deterministic function of the input; nothing
/// is retried or swallowed.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Malformed coordinate data: wrong arity, non-finite ordinate,
    /// unclosed ring, or a bad element inside a composite.
    #[error("{0}")]
    InvalidValue(String),

    /// No concrete geometry kind is registered for this family + tag pair.
    #[error("unsupported {family} type \"{tag}\"")]
    UnsupportedType { family: TypeFamily, tag: String },

    /// The platform adapter has no mapping for the requested database.
    #[error("database platform \"{0}\" is not supported")]
    UnsupportedPlatform(String),

    /// WKT or WKB input could not be parsed.
    #[error("{0}")]
    ParsingError(String),

    /// Strict JSON encoding failed.
    #[error("JSON encoding failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type GeomResult<T> = Result<T, GeometryError>;

/// Trait with common functionality for all geometric objects
pub trait GeometricObject {
    /// Type tag of the concrete geometry kind.
    fn geometry_type(&self) -> GeometryType;

    /// SRID of this geometry, or `None` if unspecified.
    fn srid(&self) -> Option<i32>;

    /// Assign an SRID. Passing `None` is a no-op: an SRID, once set, can
    /// only be overwritten with another value, never cleared.
    fn set_srid(&mut self, srid: Option<i32>);

    /// Canonical nested-array snapshot of the coordinate data.
    fn to_array(&self) -> Value;

    /// WKT representation, `TYPE(<body>)`.
    fn wkt(&self) -> String;

    /// JSON rendering `{"type": ..., "coordinates": ...}`.
    fn to_json(&self) -> GeomResult<String> {
        let coordinates = self.to_array();
        crate::serialization::render::to_json_string(self.geometry_type(), &coordinates)
    }
}

/// Macro to implement the Display trait for Geometric Object types
macro_rules! display_for_geom {
    ($type:ty) => {
        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.wkt())
            }
        }
    };
}

pub(crate) use display_for_geom;

/// Resolve an element index against a composite of length `len`. The only
/// negative index supported is `-1`, meaning the last element; anything
/// else outside `0..len` is an error.
pub(crate) fn resolve_index(index: isize, len: usize) -> GeomResult<usize> {
    let resolved = if index == -1 {
        len.checked_sub(1)
    } else {
        usize::try_from(index).ok()
    };

    match resolved {
        Some(i) if i < len => Ok(i),
        _ => Err(GeometryError::InvalidValue(format!(
            "index {index} is out of range for a composite with {len} elements"
        ))),
    }
}
