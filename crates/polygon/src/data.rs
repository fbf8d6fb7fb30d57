//! Owned vertex buffer (`PolygonData`).
//!
//! Coordinates are stored flat as `x0, y0, x1, y1, ...`; the vertex count is
//! always `coords.len() / 2`, so the buffer can never disagree with its count.
//! All (re)initialization goes through `ensure_capacity`, which reuses an
//! existing allocation whenever it is large enough.

use nalgebra::Vector2;

use crate::error::PolygonError;

/// Smallest vertex count a constructed polygon may have.
pub const MIN_VERTICES: usize = 3;

/// Contiguous vertex storage exclusively owned by one `Polygon`.
///
/// Invariants:
/// - Either empty (no vertices) or fully populated for every vertex.
/// - `coords.len()` is even.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonData {
    coords: Vec<f64>,
}

impl PolygonData {
    /// Number of vertices currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Vertex capacity of the current allocation (0 when nothing is allocated).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.coords.capacity() / 2
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.coords.capacity() > 0
    }

    /// Read-only view of the flat coordinate buffer.
    #[inline]
    pub fn as_flat(&self) -> &[f64] {
        &self.coords
    }

    /// Empty the buffer and make room for `count` vertices.
    ///
    /// Reuses the current allocation when it already fits; otherwise reserves
    /// exactly what is needed. The allocator refusing maps to `Allocation`.
    pub fn ensure_capacity(&mut self, count: usize) -> Result<(), PolygonError> {
        let needed = count
            .checked_mul(2)
            .ok_or(PolygonError::Allocation { count })?;
        self.coords.clear();
        if self.coords.capacity() < needed {
            self.coords
                .try_reserve_exact(needed)
                .map_err(|_| PolygonError::Allocation { count })?;
        }
        Ok(())
    }

    /// Populate `count` vertices from `vertex(i)`, all or nothing.
    ///
    /// The first failing vertex aborts the fill and leaves the buffer empty
    /// (allocation kept), so a half-written polygon is never observable.
    pub fn fill_with<F>(&mut self, count: usize, mut vertex: F) -> Result<(), PolygonError>
    where
        F: FnMut(usize) -> Result<Vector2<f64>, PolygonError>,
    {
        if count < MIN_VERTICES {
            return Err(PolygonError::TooFewVertices { count });
        }
        self.ensure_capacity(count)?;
        for i in 0..count {
            match vertex(i) {
                Ok(v) => {
                    self.coords.push(v.x);
                    self.coords.push(v.y);
                }
                Err(err) => {
                    self.coords.clear();
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Copy an already normalized flat buffer verbatim.
    pub fn assign(&mut self, flat: &[f64]) -> Result<(), PolygonError> {
        let count = flat.len() / 2;
        if flat.len() % 2 != 0 {
            return Err(PolygonError::BufferLength {
                count,
                len: flat.len(),
            });
        }
        if count < MIN_VERTICES {
            return Err(PolygonError::TooFewVertices { count });
        }
        self.ensure_capacity(count)?;
        self.coords.extend_from_slice(flat);
        Ok(())
    }

    /// Vertex at `index`; negative indices count from the end.
    pub fn get(&self, index: isize) -> Result<Vector2<f64>, PolygonError> {
        let i = self.wrap(index)?;
        Ok(Vector2::new(self.coords[2 * i], self.coords[2 * i + 1]))
    }

    /// Overwrite the vertex at `index` in place; same index rules as `get`.
    pub fn set(&mut self, index: isize, x: f64, y: f64) -> Result<(), PolygonError> {
        let i = self.wrap(index)?;
        self.coords[2 * i] = x;
        self.coords[2 * i + 1] = y;
        Ok(())
    }

    /// Drop every vertex but keep the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.coords.clear();
    }

    /// Release the allocation. Calling it again is a no-op.
    pub fn free(&mut self) {
        self.coords = Vec::new();
    }

    /// Map a possibly negative index onto `[0, len)`.
    fn wrap(&self, index: isize) -> Result<usize, PolygonError> {
        let len = self.len();
        let wrapped = if index < 0 {
            index + len as isize
        } else {
            index
        };
        // strict upper bound: index == len is out of range
        if wrapped < 0 || wrapped as usize >= len {
            return Err(PolygonError::IndexOutOfRange { index, len });
        }
        Ok(wrapped as usize)
    }
}
