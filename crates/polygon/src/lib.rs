//! Polygon value type.
//!
//! A `Polygon` is an ordered, closed sequence of 2D vertices stored in one
//! contiguous, exclusively owned buffer. It is the primitive consumed by
//! collision and geometry code, which only ever reads its vertices.
//!
//! Layers
//! - `data`: `PolygonData`, the owned flat buffer with bounds-checked access.
//! - `value` / `coerce`: the loose `Value` model hosts convert into, and the
//!   numeric coercions applied to it.
//! - `input`: the construction protocol (tagged input shapes + dispatch).
//! - `polygon`: the value surface (construction, indexing, membership, copy,
//!   text form).
//!
//! Index policy: negative indices wrap once (`i + len`); anything outside
//! `[0, len)` afterwards is an index error, including `i == len`.

pub mod coerce;
pub mod data;
pub mod error;
pub mod input;
pub mod polygon;
pub mod value;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use data::{PolygonData, MIN_VERTICES};
pub use error::{ErrorKind, PolygonError, POLYGON_STYLE_REQUIRED};
pub use input::{normalize, PolygonInput};
pub use nalgebra::Vector2 as Vec2;
pub use polygon::{Polygon, Vertices};
pub use value::{AsPolygon, Value};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::{AsPolygon, ErrorKind, Polygon, PolygonError, Value, Vec2};
}
