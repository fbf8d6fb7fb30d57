//! `Polygon` Python class.

use polygon::Polygon;
use pyo3::prelude::*;
use pyo3::types::PyTuple;

use crate::common::{map_polygon_err, to_tuple, value_from_py};

#[pyclass(name = "Polygon", module = "polygon_native", weakref, subclass)]
#[derive(Clone)]
pub struct PyPolygon {
    pub inner: Polygon,
}

#[pymethods]
impl PyPolygon {
    /// `Polygon(p1, p2, p3, ...)`, `Polygon([p1, p2, p3, ...])`,
    /// `Polygon(other_polygon)` or `Polygon(obj_with_polygon_attr)`.
    #[new]
    #[pyo3(signature = (*args))]
    fn new(args: &PyTuple) -> PyResult<Self> {
        let values: Vec<_> = args.iter().map(value_from_py).collect();
        Polygon::from_args(&values)
            .map(|inner| Self { inner })
            .map_err(map_polygon_err)
    }

    /// Number of vertices of the polygon.
    #[getter]
    fn verts_num(&self) -> usize {
        self.inner.vertex_count()
    }

    /// Vertices of the polygon, as a fresh list of `(x, y)` tuples.
    #[getter]
    fn vertices(&self) -> Vec<(f64, f64)> {
        self.inner.iter().map(to_tuple).collect()
    }

    fn copy(&self) -> Self {
        Self {
            inner: self.inner.copy(),
        }
    }

    fn __copy__(&self) -> Self {
        self.copy()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __getitem__(&self, index: isize) -> PyResult<(f64, f64)> {
        self.inner
            .get(index)
            .map(to_tuple)
            .map_err(map_polygon_err)
    }

    fn __setitem__(&mut self, index: isize, value: &PyAny) -> PyResult<()> {
        // index errors win over conversion errors
        self.inner.get(index).map_err(map_polygon_err)?;
        self.inner
            .set(index, &value_from_py(value))
            .map_err(map_polygon_err)
    }

    fn __contains__(&self, point: &PyAny) -> PyResult<bool> {
        self.inner
            .contains_point(&value_from_py(point))
            .map_err(map_polygon_err)
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
}
