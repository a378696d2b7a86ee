use serde_json::Value;

use crate::core::{
    CoordPair, GeomResult, GeometricObject, GeometryType, display_for_geom, resolve_index,
};
use crate::linestring::LineString;
use crate::serialization::render;
use crate::validation;

/// A polygon: an ordered sequence of closed rings sharing one SRID. The
/// first ring is the boundary, any further rings are holes.
///
/// Examples
/// ```rust
/// use spatial::{GeometricObject, Polygon};
/// let ring = vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]];
/// let poly = Polygon::new(vec![ring], Some(4326)).unwrap();
/// assert_eq!(poly.get_ring(0).unwrap().srid(), Some(4326));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    rings: Vec<Vec<CoordPair>>,
    srid: Option<i32>,
}

impl Polygon {
    /// Instantiate a polygon from rings given as line strings or raw
    /// coordinate sequences. Every ring must be closed: its first and last
    /// coordinate pairs must be identical.
    pub fn new<R: Into<Vec<CoordPair>>>(rings: Vec<R>, srid: Option<i32>) -> GeomResult<Self> {
        let mut polygon = Self {
            rings: Vec::new(),
            srid: None,
        };
        polygon.set_rings(rings)?;
        polygon.set_srid(srid);
        Ok(polygon)
    }

    /// Build a polygon from already validated rings.
    pub(crate) fn from_rings(rings: Vec<Vec<CoordPair>>, srid: Option<i32>) -> Self {
        Self { rings, srid }
    }

    /// Replace all rings, revalidating the whole polygon.
    pub fn set_rings<R: Into<Vec<CoordPair>>>(&mut self, rings: Vec<R>) -> GeomResult<()> {
        let rings: Vec<Vec<CoordPair>> = rings.into_iter().map(Into::into).collect();
        for ring in &rings {
            validation::ensure_ring(ring)?;
        }
        self.rings = rings;
        Ok(())
    }

    /// Validate a single ring and append it.
    pub fn add_ring<R: Into<Vec<CoordPair>>>(&mut self, ring: R) -> GeomResult<()> {
        let ring = ring.into();
        validation::ensure_ring(&ring)?;
        self.rings.push(ring);
        Ok(())
    }

    /// Materialize the ring at `index` as a line string; `-1` addresses the
    /// last ring.
    pub fn get_ring(&self, index: isize) -> GeomResult<LineString> {
        let i = resolve_index(index, self.rings.len())?;
        Ok(LineString::from_seq(self.rings[i].clone(), self.srid))
    }

    /// Materialize every ring in order.
    pub fn get_rings(&self) -> Vec<LineString> {
        self.rings
            .iter()
            .map(|ring| LineString::from_seq(ring.clone(), self.srid))
            .collect()
    }

    pub fn total_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

impl From<Polygon> for Vec<Vec<CoordPair>> {
    fn from(polygon: Polygon) -> Self {
        polygon.rings
    }
}

impl GeometricObject for Polygon {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Polygon
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
        render::ring_seq_value(&self.rings)
    }

    /// WKT representation of the polygon
    fn wkt(&self) -> String {
        format!("POLYGON({})", render::fmt_ring_seq(&self.rings))
    }
}

display_for_geom!(Polygon);

/// An ordered collection of polygons sharing one SRID.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiPolygon {
    polygons: Vec<Vec<Vec<CoordPair>>>,
    srid: Option<i32>,
}

impl MultiPolygon {
    /// Instantiate a collection from polygons or raw ring sequences. Each
    /// element is validated through the polygon rules.
    pub fn new<P: Into<Vec<Vec<CoordPair>>>>(
        polygons: Vec<P>,
        srid: Option<i32>,
    ) -> GeomResult<Self> {
        let mut collection = Self {
            polygons: Vec::new(),
            srid: None,
        };
        collection.set_polygons(polygons)?;
        collection.set_srid(srid);
        Ok(collection)
    }

    /// Replace all polygons, revalidating the whole collection.
    pub fn set_polygons<P: Into<Vec<Vec<CoordPair>>>>(
        &mut self,
        polygons: Vec<P>,
    ) -> GeomResult<()> {
        let polygons: Vec<Vec<Vec<CoordPair>>> =
            polygons.into_iter().map(Into::into).collect();
        for polygon in &polygons {
            for ring in polygon {
                validation::ensure_ring(ring)?;
            }
        }
        self.polygons = polygons;
        Ok(())
    }

    /// Validate a single polygon and append it.
    pub fn add_polygon<P: Into<Vec<Vec<CoordPair>>>>(&mut self, polygon: P) -> GeomResult<()> {
        let polygon = polygon.into();
        for ring in &polygon {
            validation::ensure_ring(ring)?;
        }
        self.polygons.push(polygon);
        Ok(())
    }

    /// Materialize the polygon at `index`; `-1` addresses the last one.
    pub fn get_polygon(&self, index: isize) -> GeomResult<Polygon> {
        let i = resolve_index(index, self.polygons.len())?;
        Ok(Polygon::from_rings(self.polygons[i].clone(), self.srid))
    }

    /// Materialize every polygon in order.
    pub fn get_polygons(&self) -> Vec<Polygon> {
        self.polygons
            .iter()
            .map(|polygon| Polygon::from_rings(polygon.clone(), self.srid))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

impl From<MultiPolygon> for Vec<Vec<Vec<CoordPair>>> {
    fn from(collection: MultiPolygon) -> Self {
        collection.polygons
    }
}

impl GeometricObject for MultiPolygon {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPolygon
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
        render::polygon_seq_value(&self.polygons)
    }

    /// WKT representation of the MultiPolygon
    fn wkt(&self) -> String {
        format!("MULTIPOLYGON({})", render::fmt_polygon_seq(&self.polygons))
    }
}

display_for_geom!(MultiPolygon);
