use serde_json::Value;

use crate::core::{
    CoordPair, GeomResult, GeometricObject, GeometryType, display_for_geom, resolve_index,
};
use crate::points::Point;
use crate::serialization::render;
use crate::validation;

/// An ordered sequence of vertices in 2D.
///
/// Vertices are stored as bare coordinate pairs rather than `Point` values
/// so the SRID is kept once on the line string; points materialized through
/// the accessors carry a copy of it.
///
/// Examples
/// ```rust
/// use spatial::{GeometricObject, LineString};
/// let ls = LineString::new(vec![[0.0, 0.0], [1.0, 1.0]], Some(4326)).unwrap();
/// assert_eq!(ls.get_point(-1).unwrap().srid(), Some(4326));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LineString {
    points: Vec<CoordPair>,
    srid: Option<i32>,
}

impl LineString {
    /// Instantiate a new LineString from vertices given as coordinate pairs
    /// or `Point` values.
    pub fn new<P: Into<CoordPair>>(points: Vec<P>, srid: Option<i32>) -> GeomResult<Self> {
        let mut line = Self {
            points: Vec::new(),
            srid: None,
        };
        line.set_points(points)?;
        line.set_srid(srid);
        Ok(line)
    }

    /// Build a line string from an already validated coordinate sequence.
    pub(crate) fn from_seq(points: Vec<CoordPair>, srid: Option<i32>) -> Self {
        Self { points, srid }
    }

    /// Replace all vertices, revalidating the whole sequence.
    pub fn set_points<P: Into<CoordPair>>(&mut self, points: Vec<P>) -> GeomResult<()> {
        let points: Vec<CoordPair> = points.into_iter().map(Into::into).collect();
        validation::ensure_coord_seq(&points)?;
        self.points = points;
        Ok(())
    }

    /// Validate a single vertex and append it.
    pub fn add_point<P: Into<CoordPair>>(&mut self, point: P) -> GeomResult<()> {
        let pair = point.into();
        validation::ensure_coord(pair)?;
        self.points.push(pair);
        Ok(())
    }

    /// Materialize the vertex at `index`; `-1` addresses the last vertex.
    pub fn get_point(&self, index: isize) -> GeomResult<Point> {
        let i = resolve_index(index, self.points.len())?;
        Ok(Point::from_pair(self.points[i], self.srid))
    }

    /// Materialize every vertex in order.
    pub fn get_points(&self) -> Vec<Point> {
        self.points
            .iter()
            .map(|&pair| Point::from_pair(pair, self.srid))
            .collect()
    }

    /// Get the total number of vertices in the linestring.
    pub fn total_vertices(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<LineString> for Vec<CoordPair> {
    fn from(line: LineString) -> Self {
        line.points
    }
}

impl GeometricObject for LineString {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::LineString
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

    /// WKT representation of the LineString
    fn wkt(&self) -> String {
        format!("LINESTRING({})", render::fmt_coord_seq(&self.points))
    }
}

display_for_geom!(LineString);

/// An ordered collection of line strings sharing one SRID.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiLineString {
    line_strings: Vec<Vec<CoordPair>>,
    srid: Option<i32>,
}

impl MultiLineString {
    /// Instantiate a collection from line strings or raw coordinate
    /// sequences.
    pub fn new<L: Into<Vec<CoordPair>>>(
        line_strings: Vec<L>,
        srid: Option<i32>,
    ) -> GeomResult<Self> {
        let mut collection = Self {
            line_strings: Vec::new(),
            srid: None,
        };
        collection.set_line_strings(line_strings)?;
        collection.set_srid(srid);
        Ok(collection)
    }

    /// Replace all line strings, revalidating the whole collection.
    pub fn set_line_strings<L: Into<Vec<CoordPair>>>(
        &mut self,
        line_strings: Vec<L>,
    ) -> GeomResult<()> {
        let line_strings: Vec<Vec<CoordPair>> =
            line_strings.into_iter().map(Into::into).collect();
        for line in &line_strings {
            validation::ensure_coord_seq(line)?;
        }
        self.line_strings = line_strings;
        Ok(())
    }

    /// Validate a single line string and append it.
    pub fn add_line_string<L: Into<Vec<CoordPair>>>(&mut self, line: L) -> GeomResult<()> {
        let line = line.into();
        validation::ensure_coord_seq(&line)?;
        self.line_strings.push(line);
        Ok(())
    }

    /// Materialize the line string at `index`; `-1` addresses the last one.
    pub fn get_line_string(&self, index: isize) -> GeomResult<LineString> {
        let i = resolve_index(index, self.line_strings.len())?;
        Ok(LineString::from_seq(self.line_strings[i].clone(), self.srid))
    }

    /// Materialize every line string in order.
    pub fn get_line_strings(&self) -> Vec<LineString> {
        self.line_strings
            .iter()
            .map(|line| LineString::from_seq(line.clone(), self.srid))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.line_strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_strings.is_empty()
    }
}

impl From<MultiLineString> for Vec<Vec<CoordPair>> {
    fn from(collection: MultiLineString) -> Self {
        collection.line_strings
    }
}

impl GeometricObject for MultiLineString {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiLineString
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
        render::ring_seq_value(&self.line_strings)
    }

    /// WKT representation of the MultiLineString
    fn wkt(&self) -> String {
        format!(
            "MULTILINESTRING({})",
            render::fmt_ring_seq(&self.line_strings)
        )
    }
}

display_for_geom!(MultiLineString);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiation_valid() {
        let ls = LineString::new(
            vec![[0.3, 0.3], [0.34, 0.98], [0.56, -123.6]],
            None,
        )
        .unwrap();
        assert_eq!(ls.total_vertices(), 3);
    }

    #[test]
    fn test_instantiation_from_points() {
        let pts = vec![
            Point::new(0.0, 0.0, None).unwrap(),
            Point::new(1.0, 2.0, None).unwrap(),
        ];
        let ls = LineString::new(pts, Some(4326)).unwrap();
        assert_eq!(ls.total_vertices(), 2);
        assert_eq!(ls.get_point(1).unwrap().coords(), (1.0, 2.0));
    }

    #[test]
    fn test_instantiation_invalid() {
        assert!(LineString::new(vec![[0.0, 0.0], [f64::NAN, 1.0]], None).is_err());
    }

    #[test]
    fn test_point_accessors() {
        let mut ls = LineString::new(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]], Some(3857)).unwrap();

        let last = ls.get_point(-1).unwrap();
        assert_eq!(last.coords(), (2.0, 0.0));
        assert_eq!(last.srid(), Some(3857));
        assert!(ls.get_point(-2).is_err());
        assert!(ls.get_point(5).is_err());

        let points = ls.get_points();
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.srid() == Some(3857)));

        ls.add_point([3.0, 3.0]).unwrap();
        assert_eq!(ls.total_vertices(), 4);

        ls.set_points(vec![[9.0, 9.0]]).unwrap();
        assert_eq!(ls.total_vertices(), 1);
    }

    #[test]
    fn test_wkt_and_array() {
        let ls = LineString::new(vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]], None).unwrap();
        assert_eq!(ls.wkt(), "LINESTRING(0 0,4 0,4 4)");
        assert_eq!(ls.to_array().to_string(), "[[0,0],[4,0],[4,4]]");
        assert_eq!(
            ls.to_json().unwrap(),
            "{\"type\":\"LineString\",\"coordinates\":[[0,0],[4,0],[4,4]]}"
        );
    }

    #[test]
    fn test_multilinestring() {
        let first = LineString::new(vec![[0.0, 0.0], [1.0, 1.0]], None).unwrap();
        let mut mls = MultiLineString::new(vec![first], Some(4326)).unwrap();
        mls.add_line_string(vec![[2.0, 2.0], [3.0, 3.0]]).unwrap();

        assert_eq!(mls.len(), 2);
        assert_eq!(mls.wkt(), "MULTILINESTRING((0 0,1 1),(2 2,3 3))");

        let child = mls.get_line_string(-1).unwrap();
        assert_eq!(child.srid(), Some(4326));
        assert_eq!(child.wkt(), "LINESTRING(2 2,3 3)");
        assert!(mls.get_line_string(2).is_err());
    }

    #[test]
    fn test_derived_child_is_detached() {
        let mls = MultiLineString::new(vec![vec![[0.0, 0.0], [1.0, 1.0]]], None).unwrap();
        let mut child = mls.get_line_string(0).unwrap();
        child.add_point([9.0, 9.0]).unwrap();

        // Mutating the materialized child leaves the parent untouched
        assert_eq!(mls.get_line_string(0).unwrap().total_vertices(), 2);
    }
}
