pub mod cli_commands;
pub mod core;
mod geometry;
mod linestring;
pub mod platform;
mod points;
mod polygons;
pub mod serialization;
pub mod validation;

pub use self::core::*;
pub use self::geometry::*;
pub use self::linestring::*;
pub use self::points::*;
pub use self::polygons::*;
