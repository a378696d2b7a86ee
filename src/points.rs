use serde_json::Value;

use crate::core::{
    CoordPair, GeomResult, GeometricObject, GeometryType, display_for_geom, resolve_index,
};
use crate::serialization::render;
use crate::validation;

/// A single 2D point, optionally tagged with an SRID.
///
/// Examples
/// ```rust
/// use spatial::Point;
/// let my_point = Point::new(0.2, -7.9, Some(4326)).unwrap();
/// let (x, y) = my_point.coords();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    srid: Option<i32>,
}

impl Point {
    /// Instantiate a new point. Non-finite ordinates are rejected.
    pub fn new(x: f64, y: f64, srid: Option<i32>) -> GeomResult<Self> {
        validation::ensure_coord([x, y])?;
        Ok(Self { x, y, srid })
    }

    /// Build a point from an already validated coordinate pair.
    pub(crate) fn from_pair(pair: CoordPair, srid: Option<i32>) -> Self {
        Self {
            x: pair[0],
            y: pair[1],
            srid,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Get coordinates as a tuple
    pub fn coords(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn set_x(&mut self, x: f64) -> GeomResult<()> {
        validation::ensure_coord([x, self.y])?;
        self.x = x;
        Ok(())
    }

    pub fn set_y(&mut self, y: f64) -> GeomResult<()> {
        validation::ensure_coord([self.x, y])?;
        self.y = y;
        Ok(())
    }

    /// Canonical coordinate pair of the point.
    pub fn to_pair(&self) -> CoordPair {
        [self.x, self.y]
    }
}

impl From<Point> for CoordPair {
    fn from(point: Point) -> Self {
        point.to_pair()
    }
}

impl GeometricObject for Point {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Point
    }

    fn srid(&self) -> Option<i32> {
        self.srid
    }

    fn set_srid(&mut self, srid: Option<i32>) {
        if srid.is_some() {
            self.srid = srid;
        }
    }

    fn to_array(&self) -> Value {
        render::coord_value(&[self.x, self.y])
    }

    /// WKT representation of the point
    fn wkt(&self) -> String {
        format!("POINT({})", render::fmt_coord(&[self.x, self.y]))
    }
}

display_for_geom!(Point);

/// An ordered collection of points sharing one SRID.
///
/// Coordinates are stored as bare pairs; `Point` values are materialized on
/// read, each carrying a copy of the collection's SRID.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiPoint {
    points: Vec<CoordPair>,
    srid: Option<i32>,
}

impl MultiPoint {
    /// Instantiate a multipoint collection
    ///
    /// Example
    /// ```rust
    /// use spatial::{MultiPoint, Point};
    /// let from_pairs = MultiPoint::new(vec![[0.0, 0.0], [0.0, 1.0]], None).unwrap();
    /// let from_points = MultiPoint::new(
    ///     vec![Point::new(0.0, 0.0, None).unwrap()],
    ///     Some(4326),
    /// )
    /// .unwrap();
    /// ```
    pub fn new<P: Into<CoordPair>>(points: Vec<P>, srid: Option<i32>) -> GeomResult<Self> {
        let mut collection = Self {
            points: Vec::new(),
            srid: None,
        };
        collection.set_points(points)?;
        collection.set_srid(srid);
        Ok(collection)
    }

    /// Replace all points, revalidating the whole collection.
    pub fn set_points<P: Into<CoordPair>>(&mut self, points: Vec<P>) -> GeomResult<()> {
        let points: Vec<CoordPair> = points.into_iter().map(Into::into).collect();
        validation::ensure_coord_seq(&points)?;
        self.points = points;
        Ok(())
    }

    /// Validate a single point and append it.
    pub fn add_point<P: Into<CoordPair>>(&mut self, point: P) -> GeomResult<()> {
        let pair = point.into();
        validation::ensure_coord(pair)?;
        self.points.push(pair);
        Ok(())
    }

    /// Materialize the point at `index`; `-1` addresses the last point.
    pub fn get_point(&self, index: isize) -> GeomResult<Point> {
        let i = resolve_index(index, self.points.len())?;
        Ok(Point::from_pair(self.points[i], self.srid))
    }

    /// Materialize every point in order.
    pub fn get_points(&self) -> Vec<Point> {
        self.points
            .iter()
            .map(|&pair| Point::from_pair(pair, self.srid))
            .collect()
    }

    /// Get the total number of points in the collection.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<MultiPoint> for Vec<CoordPair> {
    fn from(collection: MultiPoint) -> Self {
        collection.points
    }
}

impl GeometricObject for MultiPoint {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPoint
    }

    fn srid(&self) -> Option<i32> {
        self.srid
    }

    fn set_srid(&mut self, srid: Option<i32>) {
        if srid.is_some() {
            self.srid = srid;
        }
    }

    fn to_array(&self) -> Value {
        render::coord_seq_value(&self.points)
    }

    /// WKT representation of the multipoint collection
    fn wkt(&self) -> String {
        format!("MULTIPOINT({})", render::fmt_coord_seq(&self.points))
    }
}

display_for_geom!(MultiPoint);
