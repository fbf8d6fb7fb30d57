//! Error type shared by the buffer, the coercion helpers, and the constructors.
//!
//! Every variant maps onto one of four kinds (`ErrorKind`) so callers and
//! bindings can branch on the category without matching the full enum.

use std::fmt;

/// Message used for every rejected construction, whichever branch failed.
pub const POLYGON_STYLE_REQUIRED: &str = "argument must be a polygon-style object";

/// Coarse error category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Type,
    Index,
    Allocation,
}

/// Errors surfaced by polygon construction, access, and coercion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolygonError {
    /// A construction boundary saw fewer than 3 vertices.
    TooFewVertices { count: usize },
    /// A flat coordinate buffer does not hold exactly `2 * count` values.
    BufferLength { count: usize, len: usize },
    /// A value could not be coerced to a number or a numeric pair.
    Coercion { reason: String },
    /// The input shape is not accepted by the construction protocol.
    Unsupported { reason: String },
    /// Uniform construction failure reported by the public constructors.
    NotPolygon,
    /// Vertex index outside the wrapped range `[0, len)`.
    IndexOutOfRange { index: isize, len: usize },
    /// The allocator refused the vertex buffer.
    Allocation { count: usize },
}

impl PolygonError {
    pub(crate) fn coercion(reason: impl Into<String>) -> Self {
        Self::Coercion {
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooFewVertices { .. } | Self::BufferLength { .. } => ErrorKind::Validation,
            Self::Coercion { .. } | Self::Unsupported { .. } | Self::NotPolygon => ErrorKind::Type,
            Self::IndexOutOfRange { .. } => ErrorKind::Index,
            Self::Allocation { .. } => ErrorKind::Allocation,
        }
    }
}

impl fmt::Display for PolygonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewVertices { count } => {
                write!(f, "a polygon needs at least 3 vertices, got {count}")
            }
            Self::BufferLength { count, len } => write!(
                f,
                "flat buffer for {count} vertices must hold {} values, got {len}",
                2 * count
            ),
            Self::Coercion { reason } => write!(f, "type error: {reason}"),
            Self::Unsupported { reason } => write!(f, "type error: {reason}"),
            Self::NotPolygon => write!(f, "type error: {POLYGON_STYLE_REQUIRED}"),
            Self::IndexOutOfRange { index, len } => {
                if *len == 0 {
                    write!(f, "invalid vertex index {index}: polygon has no vertices")
                } else {
                    write!(
                        f,
                        "invalid vertex index {index}: expected {} <= index < {len}",
                        -(*len as isize)
                    )
                }
            }
            Self::Allocation { count } => {
                write!(f, "could not allocate a buffer for {count} vertices")
            }
        }
    }
}

impl std::error::Error for PolygonError {}
