use serde_json::Value;

use crate::core::{
    GeomResult, GeometricObject, GeometryError, GeometryType, TypeFamily, display_for_geom,
};
use crate::linestring::{LineString, MultiLineString};
use crate::points::{MultiPoint, Point};
use crate::polygons::{MultiPolygon, Polygon};
use crate::validation;

/// Closed variant over every supported geometry kind.
///
/// Examples
/// ```rust
/// use serde_json::json;
/// use spatial::{Geometry, GeometricObject, TypeFamily};
///
/// let value = json!([[[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]]]);
/// let geom = Geometry::instantiate(TypeFamily::Geometry, "POLYGON", &value, Some(4326)).unwrap();
/// assert_eq!(geom.wkt(), "POLYGON((0 0,4 0,4 4,0 4,0 0))");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    /// Construct the concrete geometry matching `tag` from already-parsed
    /// canonical nested-array data. The tag is matched case-insensitively
    /// against the closed set of kinds; anything else is an unsupported-type
    /// error for the given family.
    pub fn instantiate(
        family: TypeFamily,
        tag: &str,
        value: &Value,
        srid: Option<i32>,
    ) -> GeomResult<Geometry> {
        let Some(kind) = GeometryType::from_tag(&tag.to_ascii_uppercase()) else {
            return Err(GeometryError::UnsupportedType {
                family,
                tag: tag.to_string(),
            });
        };
        log::debug!("instantiating {kind} from canonical value (srid {srid:?})");

        let geometry = match kind {
            GeometryType::Point => {
                let [x, y] = validation::validate_point_value(value)?;
                Self::Point(Point::new(x, y, srid)?)
            }
            GeometryType::LineString => Self::LineString(LineString::new(
                validation::validate_line_string_value(value)?,
                srid,
            )?),
            GeometryType::Polygon => {
                Self::Polygon(Polygon::new(validation::validate_polygon_value(value)?, srid)?)
            }
            GeometryType::MultiPoint => Self::MultiPoint(MultiPoint::new(
                validation::validate_multi_point_value(value)?,
                srid,
            )?),
            GeometryType::MultiLineString => Self::MultiLineString(MultiLineString::new(
                validation::validate_multi_line_string_value(value)?,
                srid,
            )?),
            GeometryType::MultiPolygon => Self::MultiPolygon(MultiPolygon::new(
                validation::validate_multi_polygon_value(value)?,
                srid,
            )?),
        };
        Ok(geometry)
    }

    fn inner(&self) -> &dyn GeometricObject {
        match self {
            Self::Point(g) => g,
            Self::LineString(g) => g,
            Self::Polygon(g) => g,
            Self::MultiPoint(g) => g,
            Self::MultiLineString(g) => g,
            Self::MultiPolygon(g) => g,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn GeometricObject {
        match self {
            Self::Point(g) => g,
            Self::LineString(g) => g,
            Self::Polygon(g) => g,
            Self::MultiPoint(g) => g,
            Self::MultiLineString(g) => g,
            Self::MultiPolygon(g) => g,
        }
    }
}

impl GeometricObject for Geometry {
    fn geometry_type(&self) -> GeometryType {
        self.inner().geometry_type()
    }

    fn srid(&self) -> Option<i32> {
        self.inner().srid()
    }

    fn set_srid(&mut self, srid: Option<i32>) {
        self.inner_mut().set_srid(srid);
    }

    fn to_array(&self) -> Value {
        self.inner().to_array()
    }

    fn wkt(&self) -> String {
        self.inner().wkt()
    }
}

display_for_geom!(Geometry);

impl From<Point> for Geometry {
    fn from(g: Point) -> Self {
        Self::Point(g)
    }
}

impl From<LineString> for Geometry {
    fn from(g: LineString) -> Self {
        Self::LineString(g)
    }
}

impl From<Polygon> for Geometry {
    fn from(g: Polygon) -> Self {
        Self::Polygon(g)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(g: MultiPoint) -> Self {
        Self::MultiPoint(g)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(g: MultiLineString) -> Self {
        Self::MultiLineString(g)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(g: MultiPolygon) -> Self {
        Self::MultiPolygon(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn samples() -> Vec<Geometry> {
        vec![
            Point::new(0.5, -7.25, Some(4326)).unwrap().into(),
            LineString::new(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]], None)
                .unwrap()
                .into(),
            Polygon::new(
                vec![vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]],
                Some(3857),
            )
            .unwrap()
            .into(),
            MultiPoint::new(vec![[0.0, 0.0], [0.5, 0.5]], Some(4326))
                .unwrap()
                .into(),
            MultiLineString::new(
                vec![vec![[0.0, 0.0], [1.0, 1.0]], vec![[2.0, 2.0], [3.0, 3.0]]],
                None,
            )
            .unwrap()
            .into(),
            MultiPolygon::new(
                vec![vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]],
                Some(4326),
            )
            .unwrap()
            .into(),
        ]
    }

    #[test]
    fn test_instantiate_round_trip() {
        for family in [TypeFamily::Geometry, TypeFamily::Geography] {
            for geom in samples() {
                let rebuilt = Geometry::instantiate(
                    family,
                    geom.geometry_type().wkt_tag(),
                    &geom.to_array(),
                    geom.srid(),
                )
                .unwrap();

                assert_eq!(rebuilt.geometry_type(), geom.geometry_type());
                assert_eq!(rebuilt.srid(), geom.srid());
                assert_eq!(rebuilt.to_array(), geom.to_array());
            }
        }
    }

    #[test]
    fn test_instantiate_unsupported_tag() {
        let err = Geometry::instantiate(TypeFamily::Geography, "CIRCLE", &json!([]), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "unsupported Geography type \"CIRCLE\"");
    }

    #[test]
    fn test_instantiate_mixed_case_tag() {
        let geom =
            Geometry::instantiate(TypeFamily::Geometry, "Point", &json!([1, 2]), None).unwrap();
        assert_eq!(geom.geometry_type(), GeometryType::Point);
    }

    #[test]
    fn test_instantiate_propagates_validation() {
        let unclosed = json!([[[0, 0], [1, 0], [1, 1]]]);
        let err = Geometry::instantiate(TypeFamily::Geometry, "POLYGON", &unclosed, None)
            .unwrap_err();
        assert!(err.to_string().contains("is not closed"));

        let bad_point = json!([[0, 0], ["a", "b"]]);
        let err =
            Geometry::instantiate(TypeFamily::Geometry, "LINESTRING", &bad_point, None)
                .unwrap_err();
        assert!(err.to_string().contains("invalid Point value"));
    }

    #[test]
    fn test_enum_dispatch() {
        for geom in samples() {
            // The WKT keyword always matches the variant's own tag
            assert!(geom.wkt().starts_with(geom.geometry_type().wkt_tag()));
            let json = geom.to_json().unwrap();
            assert!(json.starts_with(&format!("{{\"type\":\"{}\"", geom.geometry_type())));
        }
    }

    #[test]
    fn test_srid_stickiness_through_enum() {
        let mut geom: Geometry = Point::new(0.0, 0.0, None).unwrap().into();
        geom.set_srid(Some(5));
        geom.set_srid(None);
        assert_eq!(geom.srid(), Some(5));
    }
}
