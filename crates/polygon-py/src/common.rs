//! Python → `polygon::Value` conversion and error mapping.

use nalgebra::Vector2;
use polygon::input::MAX_NESTING;
use polygon::{AsPolygon, ErrorKind, PolygonError, Value};
use pyo3::exceptions::{PyIndexError, PyMemoryError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyFloat, PyList, PyLong, PySequence, PyString, PyTuple};

use crate::poly::PyPolygon;

pub fn map_polygon_err(err: PolygonError) -> PyErr {
    let msg = err.to_string();
    match err.kind() {
        ErrorKind::Validation => PyValueError::new_err(msg),
        ErrorKind::Type => PyTypeError::new_err(msg),
        ErrorKind::Index => PyIndexError::new_err(msg),
        ErrorKind::Allocation => PyMemoryError::new_err(msg),
    }
}

#[inline]
pub fn to_tuple(v: Vector2<f64>) -> (f64, f64) {
    (v.x, v.y)
}

/// Convert an arbitrary Python object into the loose value model.
///
/// Order: `Polygon` instances, strings, numbers, lists/tuples, other
/// sequences, objects exposing `polygon`, objects convertible to float.
/// Capability objects are kept by reference and only read on demand.
///
/// Never raises. Anything Python refuses to hand over becomes
/// `Value::Opaque`, which construction rejects uniformly; so do containers
/// nested past `MAX_NESTING` or holding more than `MAX_ITEMS` objects in
/// total (self-referencing lists).
pub fn value_from_py(obj: &PyAny) -> Value {
    let mut budget = MAX_ITEMS;
    convert(obj, 0, &mut budget)
}

const MAX_ITEMS: usize = 1 << 20;

fn convert(obj: &PyAny, depth: usize, budget: &mut usize) -> Value {
    if depth > MAX_NESTING || *budget == 0 {
        return opaque(obj);
    }
    *budget -= 1;
    if let Ok(p) = obj.extract::<PyRef<PyPolygon>>() {
        return Value::Polygon(p.inner.clone());
    }
    if let Ok(s) = obj.downcast::<PyString>() {
        return Value::Str(s.to_string_lossy().into_owned());
    }
    if obj.is_instance_of::<PyLong>() {
        return match obj.extract::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => obj.extract::<f64>().map_or_else(|_| opaque(obj), Value::Float),
        };
    }
    if obj.is_instance_of::<PyFloat>() {
        return obj.extract::<f64>().map_or_else(|_| opaque(obj), Value::Float);
    }
    // fast paths for the common containers
    if let Ok(list) = obj.downcast::<PyList>() {
        return Value::Seq(list.iter().map(|item| convert(item, depth + 1, budget)).collect());
    }
    if let Ok(tuple) = obj.downcast::<PyTuple>() {
        return Value::Seq(tuple.iter().map(|item| convert(item, depth + 1, budget)).collect());
    }
    if is_sequence_like(obj) {
        return items(obj, depth, budget).unwrap_or_else(|_| opaque(obj));
    }
    if obj.hasattr("polygon").unwrap_or(false) {
        return Value::object(PyCapability(obj.into()));
    }
    obj.extract::<f64>().map_or_else(|_| opaque(obj), Value::Float)
}

/// Registered `Sequence` types, plus anything indexable by position with a
/// length (numpy arrays, hand-written classes). Mappings are not sequences.
fn is_sequence_like(obj: &PyAny) -> bool {
    if obj.downcast::<PySequence>().is_ok() {
        return true;
    }
    !obj.is_instance_of::<PyDict>()
        && obj.hasattr("__len__").unwrap_or(false)
        && obj.hasattr("__getitem__").unwrap_or(false)
}

fn items(obj: &PyAny, depth: usize, budget: &mut usize) -> PyResult<Value> {
    let len = obj.len()?;
    let mut items = Vec::with_capacity(len.min(*budget));
    for i in 0..len {
        items.push(convert(obj.get_item(i)?, depth + 1, budget));
    }
    Ok(Value::Seq(items))
}

fn opaque(obj: &PyAny) -> Value {
    let name = obj
        .get_type()
        .name()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "object".to_string());
    Value::Opaque(name)
}

/// A Python object with a `polygon` attribute or zero-argument method.
///
/// A raising attribute or call reads as "no polygon data".
#[derive(Debug)]
struct PyCapability(PyObject);

impl AsPolygon for PyCapability {
    fn as_polygon(&self) -> Option<Value> {
        Python::with_gil(|py| {
            let obj = self.0.as_ref(py);
            let attr = obj.getattr("polygon").ok()?;
            let data = if attr.is_callable() {
                attr.call0().ok()?
            } else {
                attr
            };
            Some(value_from_py(data))
        })
    }
}
