//! PyO3 bindings for the `polygon` crate.
//!
//! Notes
//! - Python objects are converted into `polygon::Value` at the boundary; the
//!   construction protocol itself lives in Rust.
//! - Objects exposing a `polygon` attribute or method are wrapped lazily and
//!   only read when construction reaches them.

use polygon::Polygon;
use pyo3::prelude::*;

mod common;
mod poly;

use crate::common::value_from_py;
use crate::poly::PyPolygon;

/// `True` iff `obj` can be read as a polygon. Never raises for
/// non-polygon input.
#[pyfunction]
fn is_polygon_like(obj: &PyAny) -> bool {
    Polygon::probe(&value_from_py(obj)).is_some()
}

#[pymodule]
fn polygon_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyPolygon>()?;
    m.add_function(wrap_pyfunction!(is_polygon_like, m)?)?;
    m.add("__version__", polygon::VERSION)?;
    Ok(())
}
