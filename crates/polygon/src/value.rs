//! Loosely typed input values.
//!
//! `Value` is the common currency between hosts (Python bindings, JSON on the
//! command line) and the construction protocol. Hosts convert their native
//! objects once; the protocol then only ever looks at this closed set of
//! shapes.

use std::fmt;
use std::sync::Arc;

use nalgebra::Vector2;

use crate::polygon::Polygon;

/// Opt-in capability: "I can describe myself as polygon data".
///
/// Returning `None` means the object cannot produce polygon data right now;
/// construction treats that, and any failure while reading the returned data,
/// as "not applicable" instead of a hard error.
pub trait AsPolygon: fmt::Debug + Send + Sync {
    fn as_polygon(&self) -> Option<Value>;
}

/// A host value handed to the construction protocol or the coercion helpers.
#[derive(Clone, Debug)]
pub enum Value {
    Float(f64),
    Int(i64),
    Str(String),
    /// Any host sequence (lists, tuples, generic sequences).
    Seq(Vec<Value>),
    Polygon(Polygon),
    /// Object exposing the `AsPolygon` capability.
    Object(Arc<dyn AsPolygon>),
    /// Anything else; carries the host type name for diagnostics.
    Opaque(String),
}

impl Value {
    /// Wrap a capability object.
    pub fn object<T: AsPolygon + 'static>(obj: T) -> Self {
        Value::Object(Arc::new(obj))
    }

    /// Host-neutral type name used in error messages.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Float(_) => "float",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::Seq(_) => "sequence",
            Value::Polygon(_) => "Polygon",
            Value::Object(_) => "object",
            Value::Opaque(name) => name,
        }
    }

    /// Capability lookup; `None` for every value that did not opt in.
    #[inline]
    pub fn as_capability(&self) -> Option<&dyn AsPolygon> {
        match self {
            Value::Object(obj) => Some(obj.as_ref()),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Int(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Seq(vec![a.into(), b.into()])
    }
}

impl From<Vector2<f64>> for Value {
    fn from(v: Vector2<f64>) -> Self {
        Value::Seq(vec![Value::Float(v.x), Value::Float(v.y)])
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl From<Polygon> for Value {
    fn from(p: Polygon) -> Self {
        Value::Polygon(p)
    }
}
