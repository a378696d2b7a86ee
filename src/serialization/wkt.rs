use regex::Regex;
use std::sync::OnceLock;

use super::ParserResult;
use crate::core::{CoordPair, GeomResult, GeometryError, GeometryType};
use crate::geometry::Geometry;
use crate::linestring::{LineString, MultiLineString};
use crate::points::{MultiPoint, Point};
use crate::polygons::{MultiPolygon, Polygon};

const COORD_PAIR: &str = r"^\s*(-?\d+\.?\d*)\s+(-?\d+\.?\d*)";
const GEOM_TYPE: &str = r"^\s*[A-Z]+\s*";
const SRID_PREFIX: &str = r"^\s*SRID\s*=\s*(\d+)\s*;";

static COORD_PAIR_RE: OnceLock<Regex> = OnceLock::new();
static GEOM_TYPE_RE: OnceLock<Regex> = OnceLock::new();
static SRID_PREFIX_RE: OnceLock<Regex> = OnceLock::new();

/// Get coordinate pair regex once to avoid recompilation (thread-safe)
fn coord_pair_re() -> &'static Regex {
    COORD_PAIR_RE.get_or_init(|| Regex::new(COORD_PAIR).unwrap())
}

// Get geometry type regex once to avoid recompilation (thread-safe)
fn geom_type_re() -> &'static Regex {
    GEOM_TYPE_RE.get_or_init(|| Regex::new(GEOM_TYPE).unwrap())
}

fn srid_prefix_re() -> &'static Regex {
    SRID_PREFIX_RE.get_or_init(|| Regex::new(SRID_PREFIX).unwrap())
}

/// Parse a WKT string and return the parsed geometry object
///
/// Accepts the canonical rendering of all six geometry kinds, with an
/// optional `SRID=<n>;` prefix. Type keywords must be upper case; the
/// parsed geometry runs through the normal constructors, so structural
/// invariants (finite ordinates, closed rings) are enforced.
///
/// Examples
/// ```rust
/// use spatial::{Geometry, GeometricObject};
/// use spatial::serialization::parse_wkt;
///
/// if let Ok(Geometry::Point(pt)) = parse_wkt("POINT(0 0)") {
///     println!("My point is: {pt:?}");
/// }
///
/// let poly = parse_wkt("SRID=4326;POLYGON((0 0,0 1,1 1,0 0))").unwrap();
/// assert_eq!(poly.srid(), Some(4326));
/// ```
pub fn parse_wkt(raw_str: &str) -> GeomResult<Geometry> {
    let (srid, rest) = parse_srid_prefix(raw_str)?;
    let (kind, rest) = identify_type(rest)?;
    log::debug!("parsing WKT body for {kind}");

    let (geom, trailing): (Geometry, &str) = match kind {
        GeometryType::Point => {
            let ([x, y], tail) = parse_point(rest)?;
            (Point::new(x, y, srid)?.into(), tail)
        }
        GeometryType::LineString => {
            let (coords, tail) = parse_coordinate_list(rest)?;
            (LineString::new(coords, srid)?.into(), tail)
        }
        GeometryType::MultiPoint => {
            let (coords, tail) = parse_coordinate_list(rest)?;
            (MultiPoint::new(coords, srid)?.into(), tail)
        }
        GeometryType::Polygon => {
            let (rings, tail) = parse_ring_list(rest)?;
            (Polygon::new(rings, srid)?.into(), tail)
        }
        GeometryType::MultiLineString => {
            let (lines, tail) = parse_ring_list(rest)?;
            (MultiLineString::new(lines, srid)?.into(), tail)
        }
        GeometryType::MultiPolygon => {
            let (polygons, tail) = parse_polygon_list(rest)?;
            (MultiPolygon::new(polygons, srid)?.into(), tail)
        }
    };

    if !trailing.trim().is_empty() {
        Err(GeometryError::ParsingError(String::from(
            "Trailing characters after geometry!",
        )))
    } else {
        Ok(geom)
    }
}

/// Strip an optional `SRID=<n>;` prefix from the start of a WKT string.
fn parse_srid_prefix(raw_str: &str) -> ParserResult<'_, Option<i32>> {
    let re = srid_prefix_re();
    match re.captures(raw_str) {
        None => Ok((None, raw_str)),
        Some(cap) => {
            let digits = cap.get(1).unwrap().as_str();
            let srid = digits.parse::<i32>().map_err(|_| {
                GeometryError::ParsingError(format!("SRID value {digits} is out of range"))
            })?;
            Ok((Some(srid), &raw_str[cap.get(0).unwrap().end()..]))
        }
    }
}

/// Identifies the type of geometry at the start of a WKT string
fn identify_type(raw_str: &str) -> ParserResult<'_, GeometryType> {
    let re = geom_type_re();
    if let Some(m) = re.find(raw_str) {
        let trimmed = m.as_str().trim();
        match GeometryType::from_tag(trimmed) {
            Some(kind) => Ok((kind, &raw_str[m.end()..])),
            None => Err(GeometryError::ParsingError(format!(
                "Unsupported Geometry: {trimmed}"
            ))),
        }
    } else {
        Err(GeometryError::ParsingError(String::from(
            "Could not parse shape type",
        )))
    }
}

/// Parse a point coordinates (after removing the type prefix from the string)
fn parse_point(raw: &str) -> ParserResult<'_, CoordPair> {
    let re = coord_pair_re();
    let mut trimmed = raw.trim();
    trimmed = match trimmed.strip_prefix("(") {
        Some(s) => s,
        None => {
            return Err(GeometryError::ParsingError(String::from(
                "Expected '(' to introduce coordinates",
            )));
        }
    };

    if let Some(cap) = re.captures(trimmed) {
        let x_str = cap.get(1).unwrap().as_str();
        let y_str = cap.get(2).unwrap().as_str();
        trimmed = &trimmed[cap.get(0).unwrap().end()..];

        match trimmed.strip_prefix(")") {
            None => Err(GeometryError::ParsingError(String::from(
                "Expected ')' to close coordinates",
            ))),
            Some(s) => {
                let pair = [x_str.parse::<f64>().unwrap(), y_str.parse::<f64>().unwrap()];
                Ok((pair, s))
            }
        }
    } else {
        Err(GeometryError::ParsingError(String::from(
            "Could not parse coordinates",
        )))
    }
}

/// Parse a list of coordinate pairs (points) from the start of a string
fn parse_coordinate_list(raw_str: &str) -> ParserResult<'_, Vec<CoordPair>> {
    let re = coord_pair_re();

    let mut trimmed = match raw_str.trim().strip_prefix("(") {
        None => {
            return Err(GeometryError::ParsingError(String::from(
                "Expected '(' to start list of coordinates",
            )));
        }
        Some(s) => s,
    };
    let mut pairs = Vec::new();
    while let Some(cap) = re.captures(trimmed) {
        let x = cap.get(1).unwrap().as_str().parse::<f64>().unwrap();
        let y = cap.get(2).unwrap().as_str().parse::<f64>().unwrap();
        pairs.push([x, y]);

        trimmed = &trimmed[cap.get(0).unwrap().end()..];
        match trimmed.strip_prefix(",") {
            None => break,
            Some(s) => {
                trimmed = s;
            }
        }
    }
    match trimmed.trim_start().strip_prefix(")") {
        None => Err(GeometryError::ParsingError(String::from(
            "Expected ')' to close coordinates",
        ))),
        Some(s) => Ok((pairs, s)),
    }
}

/// Parse a parenthesized list of coordinate lists (Polygon or
/// MultiLineString body) from the start of a string.
fn parse_ring_list(raw_str: &str) -> ParserResult<'_, Vec<Vec<CoordPair>>> {
    let mut rest = match raw_str.trim().strip_prefix("(") {
        None => {
            return Err(GeometryError::ParsingError(String::from(
                "Expected '(' to start list of rings",
            )));
        }
        Some(s) => s,
    };

    let mut rings = Vec::new();
    loop {
        let (ring, tail) = parse_coordinate_list(rest)?;
        rings.push(ring);
        rest = tail.trim_start();

        if let Some(s) = rest.strip_prefix(",") {
            rest = s;
            continue;
        }
        return match rest.strip_prefix(")") {
            Some(s) => Ok((rings, s)),
            None => Err(GeometryError::ParsingError(String::from(
                "Expected ')' to close list of rings",
            ))),
        };
    }
}

/// Parse a parenthesized list of polygons (MultiPolygon body) from the
/// start of a string.
fn parse_polygon_list(raw_str: &str) -> ParserResult<'_, Vec<Vec<Vec<CoordPair>>>> {
    let mut rest = match raw_str.trim().strip_prefix("(") {
        None => {
            return Err(GeometryError::ParsingError(String::from(
                "Expected '(' to start list of polygons",
            )));
        }
        Some(s) => s,
    };

    let mut polygons = Vec::new();
    loop {
        let (polygon, tail) = parse_ring_list(rest)?;
        polygons.push(polygon);
        rest = tail.trim_start();

        if let Some(s) = rest.strip_prefix(",") {
            rest = s;
            continue;
        }
        return match rest.strip_prefix(")") {
            Some(s) => Ok((polygons, s)),
            None => Err(GeometryError::ParsingError(String::from(
                "Expected ')' to close list of polygons",
            ))),
        };
    }
}
