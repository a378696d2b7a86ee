use std::fs::File;
use std::io::Write;

use crate::core::GeometricObject;
use crate::geometry::Geometry;
use crate::serialization::parse_wkt;

/// Parse an input string and print some details about the shape
pub fn parse_show_detail(input: &str) -> Result<(), String> {
    let geom = parse_wkt(input).map_err(|e| format!("Failed to parse WKT: {e}"))?;

    println!("Parsed a Geometry of Type {}!", geom.geometry_type());
    if let Some(srid) = geom.srid() {
        println!("SRID: {srid}");
    }

    match &geom {
        Geometry::Point(pt) => {
            let (x, y) = pt.coords();
            println!("The point coordinates are: ({x}, {y})");
        }
        Geometry::LineString(ls) => {
            println!("The linestring contains {} total vertices.", ls.total_vertices());
        }
        Geometry::Polygon(poly) => {
            println!("The polygon contains {} rings.", poly.total_rings());
        }
        Geometry::MultiPoint(mp) => {
            println!("The multipoint contains {} total points.", mp.len());
        }
        Geometry::MultiLineString(mls) => {
            println!("The multilinestring contains {} linestrings.", mls.len());
        }
        Geometry::MultiPolygon(mp) => {
            println!("The multipolygon contains {} polygons.", mp.len());
        }
    }
    println!("Canonical form: {geom}");
    Ok(())
}

/// Parse the given input string, render it as JSON, and optionally save the result
pub fn convert_to_json(input: &str, output_path: Option<String>) -> Result<(), String> {
    let geom = parse_wkt(input).map_err(|e| format!("Failed to parse WKT: {e}"))?;
    let json = geom
        .to_json()
        .map_err(|e| format!("Failed to render JSON: {e}"))?;

    match output_path {
        None => {
            println!("{json}");
            Ok(())
        }
        Some(ref fp) => {
            let mut file = match File::create(fp) {
                Ok(f) => f,
                Err(e) => return Err(format!("Failed to create file: {e}")),
            };
            match file.write_all(json.as_bytes()) {
                Err(_) => Err(String::from("Failed to write to file!")),
                Ok(_) => {
                    println!("Geometry saved to file: '{fp}'");
                    Ok(())
                }
            }
        }
    }
}
