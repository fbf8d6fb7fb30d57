//! The user-facing polygon value.
//!
//! A `Polygon` is either unconstructed (no vertices, no allocation; the
//! `Default` state) or constructed with at least 3 vertices. Construction
//! either succeeds completely or resets the value to unconstructed.
//!
//! `Clone` and `copy()` are deep: two live polygons never share storage.

use std::fmt;

use nalgebra::Vector2;
use tracing::debug;

use crate::coerce;
use crate::data::{PolygonData, MIN_VERTICES};
use crate::error::{ErrorKind, PolygonError};
use crate::input::{normalize, PolygonInput};
use crate::value::Value;

/// Ordered, closed sequence of 2D vertices.
///
/// Vertex `i` connects to vertex `(i + 1) % len`.
#[derive(Clone, Default, PartialEq)]
pub struct Polygon {
    data: PolygonData,
}

impl Polygon {
    /// Build a polygon from any accepted input shape.
    pub fn new(input: &Value) -> Result<Self, PolygonError> {
        let mut p = Self::default();
        p.construct(input)?;
        Ok(p)
    }

    /// Build a polygon from positional arguments (one vertex per argument, or
    /// a single polygon-like argument).
    pub fn from_args(args: &[Value]) -> Result<Self, PolygonError> {
        let mut p = Self::default();
        p.construct_args(args)?;
        Ok(p)
    }

    /// Build a polygon from an already normalized flat buffer
    /// `[x0, y0, x1, y1, ...]` holding exactly `count` vertices.
    pub fn from_flat(vertices: &[f64], count: usize) -> Result<Self, PolygonError> {
        if count < MIN_VERTICES {
            return Err(PolygonError::TooFewVertices { count });
        }
        if Some(vertices.len()) != count.checked_mul(2) {
            return Err(PolygonError::BufferLength {
                count,
                len: vertices.len(),
            });
        }
        let mut data = PolygonData::default();
        data.assign(vertices)?;
        Ok(Self { data })
    }

    /// Non-failing probe: `Some` iff `input` can be read as a polygon.
    pub fn probe(input: &Value) -> Option<Self> {
        Self::new(input).ok()
    }

    /// (Re)initialize in place from any accepted input shape.
    ///
    /// Reuses the current allocation when it fits. On failure the value is
    /// left unconstructed and a uniform type error is returned (allocation
    /// failures are passed through unchanged).
    pub fn construct(&mut self, input: &Value) -> Result<(), PolygonError> {
        let res = PolygonInput::classify(input).and_then(|i| normalize(i, &mut self.data));
        self.finish(res)
    }

    /// (Re)initialize in place from positional arguments.
    pub fn construct_args(&mut self, args: &[Value]) -> Result<(), PolygonError> {
        let res = PolygonInput::classify_args(args).and_then(|i| normalize(i, &mut self.data));
        self.finish(res)
    }

    fn finish(&mut self, res: Result<(), PolygonError>) -> Result<(), PolygonError> {
        match res {
            Ok(()) => Ok(()),
            Err(err) => {
                debug!(cause = %err, "polygon construction rejected");
                self.data.free();
                if err.kind() == ErrorKind::Allocation {
                    Err(err)
                } else {
                    Err(PolygonError::NotPolygon)
                }
            }
        }
    }

    /// Deep copy; the result owns an independent buffer.
    #[inline]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Number of vertices (0 while unconstructed).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Alias of `len`, named after the vertex-count property.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.data.len()
    }

    /// Freshly materialized list of vertices, in order.
    pub fn vertices(&self) -> Vec<Vector2<f64>> {
        self.iter().collect()
    }

    /// Freshly materialized flat buffer `[x0, y0, x1, y1, ...]`.
    pub fn to_flat(&self) -> Vec<f64> {
        self.data.as_flat().to_vec()
    }

    /// Read-only vertex enumeration; the count is known up front.
    pub fn iter(&self) -> Vertices<'_> {
        Vertices {
            chunks: self.data.as_flat().chunks_exact(2),
        }
    }

    /// Borrow the underlying buffer (read-only).
    #[inline]
    pub fn data(&self) -> &PolygonData {
        &self.data
    }

    /// Vertex at `index`; negative indices count from the end.
    #[inline]
    pub fn get(&self, index: isize) -> Result<Vector2<f64>, PolygonError> {
        self.data.get(index)
    }

    /// Assign a loosely typed point to vertex `index`.
    ///
    /// The index is checked first; a right-hand side that is not a numeric
    /// pair is a type error.
    pub fn set(&mut self, index: isize, point: &Value) -> Result<(), PolygonError> {
        self.data.get(index)?;
        let v = coerce::pair(point)
            .map_err(|_| PolygonError::coercion("must assign a pair of numeric values"))?;
        self.data.set(index, v.x, v.y)
    }

    /// Assign an already typed point to vertex `index`.
    #[inline]
    pub fn set_vertex(&mut self, index: isize, v: Vector2<f64>) -> Result<(), PolygonError> {
        self.data.set(index, v.x, v.y)
    }

    /// Exact vertex membership (no tolerance). This is not interior
    /// containment.
    pub fn contains_point(&self, point: &Value) -> Result<bool, PolygonError> {
        let p = coerce::pair(point)?;
        Ok(self.contains_vertex(p))
    }

    #[inline]
    pub fn contains_vertex(&self, p: Vector2<f64>) -> bool {
        self.iter().any(|v| v == p)
    }
}

/// Iterator over the vertices of a `Polygon`.
#[derive(Clone, Debug)]
pub struct Vertices<'a> {
    chunks: std::slice::ChunksExact<'a, f64>,
}

impl Iterator for Vertices<'_> {
    type Item = Vector2<f64>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(|c| Vector2::new(c[0], c[1]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Vertices<'_> {}

impl<'a> IntoIterator for &'a Polygon {
    type Item = Vector2<f64>;
    type IntoIter = Vertices<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Value> for Polygon {
    type Error = PolygonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl TryFrom<&[Vector2<f64>]> for Polygon {
    type Error = PolygonError;

    fn try_from(points: &[Vector2<f64>]) -> Result<Self, Self::Error> {
        let mut data = PolygonData::default();
        data.fill_with(points.len(), |i| Ok(points[i]))?;
        Ok(Self { data })
    }
}

/// `Polygon(<count>, [(x0, y0), (x1, y1), ...])`
impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({}, [", self.len())?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({:?}, {:?})", v.x, v.y)?;
        }
        f.write_str("])")
    }
}

impl fmt::Debug for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
