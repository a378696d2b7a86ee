//! Shared formatting helpers for the canonical text and JSON renderings.
//!
//! Text rules by nesting depth: a coordinate pair renders as `x y`, a
//! sequence of pairs joins with commas, and each further composite level
//! wraps its children in one layer of parentheses.

use serde::Serialize;
use serde_json::Value;

use crate::core::{CoordPair, GeomResult, GeometryType};

/// Render a single coordinate pair, two tokens separated by one space.
pub fn fmt_coord(pair: &CoordPair) -> String {
    format!("{} {}", pair[0], pair[1])
}

/// Render a sequence of coordinate pairs (LineString / MultiPoint level).
pub fn fmt_coord_seq(seq: &[CoordPair]) -> String {
    seq.iter().map(fmt_coord).collect::<Vec<_>>().join(",")
}

/// Render a sequence of rings or line strings (Polygon / MultiLineString
/// level), each child in parentheses.
pub fn fmt_ring_seq(seq: &[Vec<CoordPair>]) -> String {
    seq.iter()
        .map(|ring| format!("({})", fmt_coord_seq(ring)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a sequence of polygons (MultiPolygon level), one extra layer of
/// parentheses per child.
pub fn fmt_polygon_seq(seq: &[Vec<Vec<CoordPair>>]) -> String {
    seq.iter()
        .map(|polygon| format!("({})", fmt_ring_seq(polygon)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Canonical JSON number for an ordinate: whole values serialize as
/// integers, matching the interchange form handed over by WKT/WKB parsers.
fn number_value(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() <= i64::MAX as f64 {
        Value::from(v as i64)
    } else {
        Value::from(v)
    }
}

pub fn coord_value(pair: &CoordPair) -> Value {
    Value::Array(vec![number_value(pair[0]), number_value(pair[1])])
}

pub fn coord_seq_value(seq: &[CoordPair]) -> Value {
    Value::Array(seq.iter().map(coord_value).collect())
}

pub fn ring_seq_value(seq: &[Vec<CoordPair>]) -> Value {
    Value::Array(seq.iter().map(|ring| coord_seq_value(ring)).collect())
}

pub fn polygon_seq_value(seq: &[Vec<Vec<CoordPair>>]) -> Value {
    Value::Array(seq.iter().map(|polygon| ring_seq_value(polygon)).collect())
}

#[derive(Serialize)]
struct GeometryJson<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    coordinates: &'a Value,
}

/// Serialize the `{"type": ..., "coordinates": ...}` document. Encoding
/// errors propagate; nothing is truncated.
pub(crate) fn to_json_string(kind: GeometryType, coordinates: &Value) -> GeomResult<String> {
    let doc = GeometryJson {
        kind: kind.as_str(),
        coordinates,
    };
    Ok(serde_json::to_string(&doc)?)
}
