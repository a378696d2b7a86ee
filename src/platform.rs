//! Database platform adapter: maps geometry kinds to SQL column
//! declarations and converts raw column payloads to and from the core
//! geometry model through the instantiation contract.

use crate::core::{GeomResult, GeometricObject, GeometryError, GeometryType, TypeFamily};
use crate::geometry::Geometry;
use crate::serialization::{parse_wkb, parse_wkt};

/// The closed set of supported database platforms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Platform {
    MySql,
    PostgreSql,
}

impl Platform {
    /// Resolve a platform by name. Anything without a mapping is an
    /// `UnsupportedPlatform` error.
    pub fn from_name(name: &str) -> GeomResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "postgresql" | "postgres" => Ok(Self::PostgreSql),
            _ => Err(GeometryError::UnsupportedPlatform(name.to_string())),
        }
    }

    /// SQL column type declaration for a spatial column of the given kind.
    pub fn sql_declaration(&self, kind: GeometryType, family: TypeFamily) -> String {
        let sql_type = kind.wkt_tag().to_ascii_lowercase();
        match family {
            TypeFamily::Geography => format!("geography({sql_type})"),
            TypeFamily::Geometry => sql_type,
        }
    }

    /// Text literal bound into database statements.
    pub fn to_database_value(&self, geometry: &Geometry) -> String {
        geometry.wkt()
    }

    /// SQL expression converting a bound text literal into the platform's
    /// native spatial value.
    pub fn from_text_expression(&self, family: TypeFamily) -> &'static str {
        match (self, family) {
            (Self::PostgreSql, TypeFamily::Geography) => "ST_GeographyFromText(?)",
            _ => "ST_GeomFromText(?)",
        }
    }

    /// Convert a raw database payload back into a geometry. A payload whose
    /// first byte is alphabetic takes the text (WKT) path; anything else is
    /// treated as binary (WKB). The parsed `{type, value, srid}` tuple is
    /// handed through [`Geometry::instantiate`].
    pub fn from_database_value(
        &self,
        family: TypeFamily,
        payload: &[u8],
    ) -> GeomResult<Geometry> {
        let parsed = match payload.first() {
            Some(b) if b.is_ascii_alphabetic() => {
                let text = std::str::from_utf8(payload).map_err(|_| {
                    GeometryError::ParsingError(String::from(
                        "spatial text payload is not valid UTF-8",
                    ))
                })?;
                parse_wkt(text)?
            }
            Some(_) => parse_wkb(payload)?,
            None => {
                return Err(GeometryError::ParsingError(String::from(
                    "empty spatial payload",
                )));
            }
        };

        Geometry::instantiate(
            family,
            parsed.geometry_type().wkt_tag(),
            &parsed.to_array(),
            parsed.srid(),
        )
    }
}
