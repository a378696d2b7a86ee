//! Reader for the well-known binary representation, covering standard WKB
//! and the PostGIS EWKB extension carrying an embedded SRID. Only 2D
//! geometries are accepted; parsed payloads go through the normal
//! constructors, so every structural invariant holds on the binary path too.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::Cursor;

use crate::core::{CoordPair, GeomResult, GeometryError, GeometryType};
use crate::geometry::Geometry;
use crate::linestring::{LineString, MultiLineString};
use crate::points::{MultiPoint, Point};
use crate::polygons::{MultiPolygon, Polygon};

const EWKB_Z_FLAG: u32 = 0x8000_0000;
const EWKB_M_FLAG: u32 = 0x4000_0000;
const EWKB_SRID_FLAG: u32 = 0x2000_0000;

#[derive(Clone, Copy, Debug)]
enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    fn from_flag(flag: u8) -> GeomResult<Self> {
        match flag {
            0 => Ok(Self::Big),
            1 => Ok(Self::Little),
            other => Err(GeometryError::ParsingError(format!(
                "invalid WKB byte order flag {other}"
            ))),
        }
    }
}

struct Header {
    order: ByteOrder,
    kind: GeometryType,
    srid: Option<i32>,
}

fn truncated() -> GeometryError {
    GeometryError::ParsingError(String::from("unexpected end of WKB payload"))
}

fn read_u8(cur: &mut Cursor<&[u8]>) -> GeomResult<u8> {
    cur.read_u8().map_err(|_| truncated())
}

fn read_u32(cur: &mut Cursor<&[u8]>, order: ByteOrder) -> GeomResult<u32> {
    match order {
        ByteOrder::Big => cur.read_u32::<BigEndian>(),
        ByteOrder::Little => cur.read_u32::<LittleEndian>(),
    }
    .map_err(|_| truncated())
}

fn read_f64(cur: &mut Cursor<&[u8]>, order: ByteOrder) -> GeomResult<f64> {
    match order {
        ByteOrder::Big => cur.read_f64::<BigEndian>(),
        ByteOrder::Little => cur.read_f64::<LittleEndian>(),
    }
    .map_err(|_| truncated())
}

/// Read one geometry header: byte order flag, type code with EWKB flags,
/// and the embedded SRID when flagged.
fn read_header(cur: &mut Cursor<&[u8]>) -> GeomResult<Header> {
    let order = ByteOrder::from_flag(read_u8(cur)?)?;
    let raw = read_u32(cur, order)?;

    if raw & (EWKB_Z_FLAG | EWKB_M_FLAG) != 0 {
        return Err(GeometryError::ParsingError(String::from(
            "only 2D WKB geometries are supported",
        )));
    }

    let srid = if raw & EWKB_SRID_FLAG != 0 {
        Some(read_u32(cur, order)? as i32)
    } else {
        None
    };

    let kind = match raw & 0x0000_FFFF {
        1 => GeometryType::Point,
        2 => GeometryType::LineString,
        3 => GeometryType::Polygon,
        4 => GeometryType::MultiPoint,
        5 => GeometryType::MultiLineString,
        6 => GeometryType::MultiPolygon,
        other => {
            return Err(GeometryError::ParsingError(format!(
                "unsupported WKB geometry type code {other}"
            )));
        }
    };

    Ok(Header { order, kind, srid })
}

fn read_coord(cur: &mut Cursor<&[u8]>, order: ByteOrder) -> GeomResult<CoordPair> {
    let x = read_f64(cur, order)?;
    let y = read_f64(cur, order)?;
    Ok([x, y])
}

fn read_coord_seq(cur: &mut Cursor<&[u8]>, order: ByteOrder) -> GeomResult<Vec<CoordPair>> {
    let total = read_u32(cur, order)?;
    let mut pairs = Vec::new();
    for _ in 0..total {
        pairs.push(read_coord(cur, order)?);
    }
    Ok(pairs)
}

fn read_ring_seq(cur: &mut Cursor<&[u8]>, order: ByteOrder) -> GeomResult<Vec<Vec<CoordPair>>> {
    let total = read_u32(cur, order)?;
    let mut rings = Vec::new();
    for _ in 0..total {
        rings.push(read_coord_seq(cur, order)?);
    }
    Ok(rings)
}

/// Read the header of a collection element and check its type. Each element
/// carries its own byte order flag; an SRID on an element is ignored, the
/// collection's SRID wins.
fn expect_element(cur: &mut Cursor<&[u8]>, expected: GeometryType) -> GeomResult<ByteOrder> {
    let header = read_header(cur)?;
    if header.kind != expected {
        return Err(GeometryError::ParsingError(format!(
            "expected {expected} element in WKB collection, got {}",
            header.kind
        )));
    }
    Ok(header.order)
}

/// Parse a WKB or EWKB payload into a geometry.
pub fn parse_wkb(buf: &[u8]) -> GeomResult<Geometry> {
    let mut cur = Cursor::new(buf);
    let header = read_header(&mut cur)?;
    let srid = header.srid;
    log::debug!("parsing WKB body for {} (srid {srid:?})", header.kind);

    let geom: Geometry = match header.kind {
        GeometryType::Point => {
            let [x, y] = read_coord(&mut cur, header.order)?;
            Point::new(x, y, srid)?.into()
        }
        GeometryType::LineString => {
            LineString::new(read_coord_seq(&mut cur, header.order)?, srid)?.into()
        }
        GeometryType::Polygon => {
            Polygon::new(read_ring_seq(&mut cur, header.order)?, srid)?.into()
        }
        GeometryType::MultiPoint => {
            let total = read_u32(&mut cur, header.order)?;
            let mut points = Vec::new();
            for _ in 0..total {
                let order = expect_element(&mut cur, GeometryType::Point)?;
                points.push(read_coord(&mut cur, order)?);
            }
            MultiPoint::new(points, srid)?.into()
        }
        GeometryType::MultiLineString => {
            let total = read_u32(&mut cur, header.order)?;
            let mut lines = Vec::new();
            for _ in 0..total {
                let order = expect_element(&mut cur, GeometryType::LineString)?;
                lines.push(read_coord_seq(&mut cur, order)?);
            }
            MultiLineString::new(lines, srid)?.into()
        }
        GeometryType::MultiPolygon => {
            let total = read_u32(&mut cur, header.order)?;
            let mut polygons = Vec::new();
            for _ in 0..total {
                let order = expect_element(&mut cur, GeometryType::Polygon)?;
                polygons.push(read_ring_seq(&mut cur, order)?);
            }
            MultiPolygon::new(polygons, srid)?.into()
        }
    };

    if cur.position() != buf.len() as u64 {
        return Err(GeometryError::ParsingError(String::from(
            "trailing bytes after WKB geometry",
        )));
    }
    Ok(geom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeometricObject;
    use byteorder::WriteBytesExt;

    fn header_le(buf: &mut Vec<u8>, type_code: u32, srid: Option<u32>) {
        buf.push(1);
        match srid {
            None => buf.write_u32::<LittleEndian>(type_code).unwrap(),
            Some(srid) => {
                buf.write_u32::<LittleEndian>(type_code | EWKB_SRID_FLAG)
                    .unwrap();
                buf.write_u32::<LittleEndian>(srid).unwrap();
            }
        }
    }

    fn coords_le(buf: &mut Vec<u8>, pairs: &[CoordPair]) {
        for pair in pairs {
            buf.write_f64::<LittleEndian>(pair[0]).unwrap();
            buf.write_f64::<LittleEndian>(pair[1]).unwrap();
        }
    }

    #[test]
    fn test_parse_point_le() {
        let mut buf = Vec::new();
        header_le(&mut buf, 1, None);
        coords_le(&mut buf, &[[1.5, -2.5]]);

        match parse_wkb(&buf).unwrap() {
            Geometry::Point(pt) => {
                assert_eq!(pt.coords(), (1.5, -2.5));
                assert_eq!(pt.srid(), None);
            }
            other => panic!("Expected a point, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_point_be() {
        let mut buf = vec![0u8];
        buf.write_u32::<BigEndian>(1).unwrap();
        buf.write_f64::<BigEndian>(3.0).unwrap();
        buf.write_f64::<BigEndian>(4.0).unwrap();

        match parse_wkb(&buf).unwrap() {
            Geometry::Point(pt) => assert_eq!(pt.coords(), (3.0, 4.0)),
            other => panic!("Expected a point, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_ewkb_polygon_with_srid() {
        let ring = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]];

        let mut buf = Vec::new();
        header_le(&mut buf, 3, Some(4326));
        buf.write_u32::<LittleEndian>(1).unwrap();
        buf.write_u32::<LittleEndian>(ring.len() as u32).unwrap();
        coords_le(&mut buf, &ring);

        let geom = parse_wkb(&buf).unwrap();
        assert_eq!(geom.srid(), Some(4326));
        assert_eq!(geom.wkt(), "POLYGON((0 0,4 0,4 4,0 4,0 0))");
    }

    #[test]
    fn test_parse_unclosed_wkb_polygon() {
        let ring = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];

        let mut buf = Vec::new();
        header_le(&mut buf, 3, None);
        buf.write_u32::<LittleEndian>(1).unwrap();
        buf.write_u32::<LittleEndian>(ring.len() as u32).unwrap();
        coords_le(&mut buf, &ring);

        let err = parse_wkb(&buf).unwrap_err();
        assert!(err.to_string().contains("is not closed"));
    }

    #[test]
    fn test_parse_multipoint_nested_headers() {
        let mut buf = Vec::new();
        header_le(&mut buf, 4, Some(7));
        buf.write_u32::<LittleEndian>(2).unwrap();
        for pair in [[0.0, 0.0], [1.0, 2.0]] {
            header_le(&mut buf, 1, None);
            coords_le(&mut buf, &[pair]);
        }

        match parse_wkb(&buf).unwrap() {
            Geometry::MultiPoint(mp) => {
                assert_eq!(mp.len(), 2);
                assert_eq!(mp.srid(), Some(7));
                assert_eq!(mp.get_point(-1).unwrap().coords(), (1.0, 2.0));
            }
            other => panic!("Expected a multipoint, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_multilinestring() {
        let mut buf = Vec::new();
        header_le(&mut buf, 5, None);
        buf.write_u32::<LittleEndian>(2).unwrap();
        for line in [[[0.0, 0.0], [1.0, 1.0]], [[2.0, 2.0], [3.0, 3.0]]] {
            header_le(&mut buf, 2, None);
            buf.write_u32::<LittleEndian>(2).unwrap();
            coords_le(&mut buf, &line);
        }

        let geom = parse_wkb(&buf).unwrap();
        assert_eq!(geom.wkt(), "MULTILINESTRING((0 0,1 1),(2 2,3 3))");
    }

    #[test]
    fn test_collection_element_type_mismatch() {
        let mut buf = Vec::new();
        header_le(&mut buf, 4, None);
        buf.write_u32::<LittleEndian>(1).unwrap();
        // A linestring where a point element is required
        header_le(&mut buf, 2, None);
        buf.write_u32::<LittleEndian>(0).unwrap();

        let err = parse_wkb(&buf).unwrap_err();
        assert!(err.to_string().contains("expected Point element"));
    }

    #[test]
    fn test_malformed_payloads() {
        // Bad byte order flag
        assert!(parse_wkb(&[9, 1, 0, 0, 0]).is_err());

        // Z-flagged geometry
        let mut buf = Vec::new();
        header_le(&mut buf, 1 | EWKB_Z_FLAG, None);
        assert!(parse_wkb(&buf).is_err());

        // Unknown type code
        let mut buf = Vec::new();
        header_le(&mut buf, 42, None);
        assert!(parse_wkb(&buf).is_err());

        // Truncated coordinate data
        let mut buf = Vec::new();
        header_le(&mut buf, 1, None);
        buf.write_f64::<LittleEndian>(1.0).unwrap();
        assert!(parse_wkb(&buf).is_err());

        // Trailing bytes
        let mut buf = Vec::new();
        header_le(&mut buf, 1, None);
        coords_le(&mut buf, &[[1.0, 2.0]]);
        buf.push(0);
        assert!(parse_wkb(&buf).is_err());

        // Empty payload
        assert!(parse_wkb(&[]).is_err());
    }
}
