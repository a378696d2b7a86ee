pub mod render;
pub mod wkb;
pub mod wkt;

pub use wkb::parse_wkb;
pub use wkt::parse_wkt;

use crate::core::GeomResult;

/// Result of an incremental parse step: the parsed value plus the unread
/// remainder of the input.
type ParserResult<'a, T> = GeomResult<(T, &'a str)>;
