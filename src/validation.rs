//! Validation engine converting loosely-typed canonical values into the
//! internal nested-array form.
//!
//! Each rule is expressed purely in terms of the rule one level below it, so
//! every composite reuses the validators of its elements. All functions are
//! pure: the same input always produces the same output or the same error.

use serde_json::Value;

use crate::core::{CoordPair, GeomResult, GeometryError};
use crate::serialization::render;

/// Human-readable kind of a JSON value, used in error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate a single coordinate pair: a 2-element array of finite numbers.
pub fn validate_point_value(value: &Value) -> GeomResult<CoordPair> {
    let invalid = || {
        GeometryError::InvalidValue(format!(
            "invalid Point value {value}: expected a pair of finite numbers, got {}",
            value_kind(value)
        ))
    };

    let items = value.as_array().ok_or_else(invalid)?;
    if items.len() != 2 {
        return Err(invalid());
    }

    let x = items[0].as_f64().ok_or_else(invalid)?;
    let y = items[1].as_f64().ok_or_else(invalid)?;
    ensure_coord([x, y])?;

    Ok([x, y])
}

/// Validate a sequence of coordinate pairs. Empty sequences are accepted
/// here; closure rules belong to [`validate_ring_value`].
pub fn validate_multi_point_value(value: &Value) -> GeomResult<Vec<CoordPair>> {
    let items = value.as_array().ok_or_else(|| {
        GeometryError::InvalidValue(format!(
            "invalid LineString value: expected an array of points, got {}",
            value_kind(value)
        ))
    })?;

    items.iter().map(validate_point_value).collect()
}

/// A line string follows the same shape rule as a multi point.
pub fn validate_line_string_value(value: &Value) -> GeomResult<Vec<CoordPair>> {
    validate_multi_point_value(value)
}

/// Validate a polygon ring: a line string whose first and last coordinate
/// pairs are identical.
pub fn validate_ring_value(value: &Value) -> GeomResult<Vec<CoordPair>> {
    let ring = validate_line_string_value(value)?;
    ensure_ring_closed(&ring)?;
    Ok(ring)
}

/// Validate a polygon: a sequence of closed rings.
pub fn validate_polygon_value(value: &Value) -> GeomResult<Vec<Vec<CoordPair>>> {
    let rings = value.as_array().ok_or_else(|| {
        GeometryError::InvalidValue(format!(
            "invalid Polygon value: expected an array of rings, got {}",
            value_kind(value)
        ))
    })?;

    rings.iter().map(validate_ring_value).collect()
}

/// Validate a multi line string: a sequence of line strings.
pub fn validate_multi_line_string_value(value: &Value) -> GeomResult<Vec<Vec<CoordPair>>> {
    let lines = value.as_array().ok_or_else(|| {
        GeometryError::InvalidValue(format!(
            "invalid MultiLineString value: expected an array of line strings, got {}",
            value_kind(value)
        ))
    })?;

    lines.iter().map(validate_line_string_value).collect()
}

/// Validate a multi polygon: a sequence of polygons.
pub fn validate_multi_polygon_value(value: &Value) -> GeomResult<Vec<Vec<Vec<CoordPair>>>> {
    let polygons = value.as_array().ok_or_else(|| {
        GeometryError::InvalidValue(format!(
            "invalid MultiPolygon value: expected an array of polygons, got {}",
            value_kind(value)
        ))
    })?;

    polygons.iter().map(validate_polygon_value).collect()
}

/// Reject non-finite ordinates on the statically-typed input path.
pub(crate) fn ensure_coord(pair: CoordPair) -> GeomResult<()> {
    if pair[0].is_finite() && pair[1].is_finite() {
        Ok(())
    } else {
        Err(GeometryError::InvalidValue(format!(
            "invalid Point value ({} {}): ordinates must be finite numbers",
            pair[0], pair[1]
        )))
    }
}

pub(crate) fn ensure_coord_seq(seq: &[CoordPair]) -> GeomResult<()> {
    for pair in seq {
        ensure_coord(*pair)?;
    }
    Ok(())
}

/// Check that a ring starts and ends on the same coordinate pair. The error
/// message embeds the rendered ring for diagnostics.
pub(crate) fn ensure_ring_closed(ring: &[CoordPair]) -> GeomResult<()> {
    let closed = match (ring.first(), ring.last()) {
        (Some(first), Some(last)) => first == last,
        _ => false,
    };

    if closed {
        Ok(())
    } else {
        Err(GeometryError::InvalidValue(format!(
            "invalid polygon, ring \"({})\" is not closed",
            render::fmt_coord_seq(ring)
        )))
    }
}

pub(crate) fn ensure_ring(ring: &[CoordPair]) -> GeomResult<()> {
    ensure_coord_seq(ring)?;
    ensure_ring_closed(ring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_point_valid() {
        assert_eq!(validate_point_value(&json!([0, 0])).unwrap(), [0.0, 0.0]);
        assert_eq!(
            validate_point_value(&json!([-3.5, 7])).unwrap(),
            [-3.5, 7.0]
        );
    }

    #[test]
    fn test_validate_point_invalid() {
        // Wrong arity
        assert!(validate_point_value(&json!([1])).is_err());
        assert!(validate_point_value(&json!([1, 2, 3])).is_err());

        // Non-numeric ordinates
        let err = validate_point_value(&json!(["a", "b"])).unwrap_err();
        assert!(err.to_string().contains("invalid Point value"));

        // Wrong shape entirely
        assert!(validate_point_value(&json!("POINT(0 0)")).is_err());
        assert!(validate_point_value(&json!(null)).is_err());
    }

    #[test]
    fn test_validate_line_string() {
        let coords = validate_line_string_value(&json!([[0, 0], [1, 1], [2, 0]])).unwrap();
        assert_eq!(coords, vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]);

        // Empty sequences are structurally fine at this level
        assert!(validate_line_string_value(&json!([])).unwrap().is_empty());

        // A bad point anywhere fails the whole sequence
        let err = validate_line_string_value(&json!([[0, 0], ["a", "b"]])).unwrap_err();
        assert!(err.to_string().contains("invalid Point value"));
    }

    #[test]
    fn test_validate_ring() {
        let closed = json!([[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]]);
        assert_eq!(validate_ring_value(&closed).unwrap().len(), 5);

        let open = json!([[0, 0], [1, 0], [1, 1]]);
        let err = validate_ring_value(&open).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid polygon, ring \"(0 0,1 0,1 1)\" is not closed"
        );

        // An empty ring cannot be closed
        assert!(validate_ring_value(&json!([])).is_err());
    }

    #[test]
    fn test_validate_polygon() {
        let poly = json!([
            [[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]],
            [[1, 1], [2, 1], [2, 2], [1, 1]]
        ]);
        assert_eq!(validate_polygon_value(&poly).unwrap().len(), 2);

        let bad = json!([[[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]], [[1, 1], [2, 1]]]);
        assert!(validate_polygon_value(&bad).is_err());

        assert!(validate_polygon_value(&json!(12)).is_err());
    }

    #[test]
    fn test_validate_multi_variants() {
        let mls = json!([[[0, 0], [1, 1]], [[2, 2], [3, 3]]]);
        assert_eq!(validate_multi_line_string_value(&mls).unwrap().len(), 2);

        let mp = json!([[[[0, 0], [1, 0], [1, 1], [0, 0]]]]);
        assert_eq!(validate_multi_polygon_value(&mp).unwrap().len(), 1);

        let unclosed = json!([[[[0, 0], [1, 0], [1, 1], [0, 1]]]]);
        assert!(validate_multi_polygon_value(&unclosed).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(ensure_coord([f64::NAN, 0.0]).is_err());
        assert!(ensure_coord([0.0, f64::INFINITY]).is_err());
        assert!(ensure_coord([0.0, 0.0]).is_ok());
    }

    #[test]
    fn test_validation_is_pure() {
        let open = json!([[0, 0], [1, 0], [1, 1]]);
        let first = validate_ring_value(&open).unwrap_err().to_string();
        let second = validate_ring_value(&open).unwrap_err().to_string();
        assert_eq!(first, second);
    }
}
