//! Construction protocol: classify a loose input, then normalize it into a
//! `PolygonData` buffer.
//!
//! Classification is a pure function returning the first matching shape in a
//! fixed priority order:
//!
//! 1. `ValueCopy`: already a polygon; its buffer is copied verbatim.
//! 2. `Sequence`: a sequence of at least 3 items, one vertex per item.
//! 3. `Singleton`: a 1-item sequence; the item is classified again.
//! 4. Sequences of 0 or 2 items are rejected (a bare pair reads as a point).
//! 5. `Variadic`: positional arguments; 1 argument is a `Singleton`, 3 or
//!    more are vertices, 0 or 2 are rejected.
//! 6. `Capability`: objects implementing `AsPolygon`; failures below this
//!    point are downgraded to "not applicable".
//! 7. Everything else is a type error.
//!
//! Singleton unwrapping and capability hops share a nesting budget of
//! `MAX_NESTING`; inputs that exceed it (a capability yielding itself, say)
//! are rejected like any other unsupported shape.

use tracing::trace;

use crate::coerce;
use crate::data::{PolygonData, MIN_VERTICES};
use crate::error::{ErrorKind, PolygonError};
use crate::polygon::Polygon;
use crate::value::{AsPolygon, Value};

/// Deepest chain of singleton and capability hops followed before giving up.
pub const MAX_NESTING: usize = 64;

/// The accepted input shapes, tagged.
#[derive(Clone, Copy, Debug)]
pub enum PolygonInput<'a> {
    ValueCopy(&'a Polygon),
    Sequence(&'a [Value]),
    Singleton(&'a Value),
    Variadic(&'a [Value]),
    Capability(&'a dyn AsPolygon),
}

impl<'a> PolygonInput<'a> {
    /// Classify a single input value.
    pub fn classify(value: &'a Value) -> Result<Self, PolygonError> {
        match value {
            Value::Polygon(p) => Ok(Self::ValueCopy(p)),
            Value::Seq(items) => match items.len() {
                1 => Ok(Self::Singleton(&items[0])),
                n if n >= MIN_VERTICES => Ok(Self::Sequence(items)),
                n => Err(PolygonError::unsupported(format!(
                    "sequences of {n} items cannot describe a polygon"
                ))),
            },
            Value::Str(_) => Err(PolygonError::unsupported("strings are not polygon-shaped")),
            Value::Object(obj) => Ok(Self::Capability(obj.as_ref())),
            other => Err(PolygonError::unsupported(format!(
                "{} is not polygon-shaped",
                other.type_name()
            ))),
        }
    }

    /// Classify a positional argument list.
    pub fn classify_args(args: &'a [Value]) -> Result<Self, PolygonError> {
        match args.len() {
            1 => Ok(Self::Singleton(&args[0])),
            n if n >= MIN_VERTICES => Ok(Self::Variadic(args)),
            n => Err(PolygonError::unsupported(format!(
                "{n} positional arguments cannot describe a polygon"
            ))),
        }
    }
}

/// Run the protocol for `input`, writing the result into `out`.
///
/// On error `out` holds no vertices (its allocation is kept for reuse).
pub fn normalize(input: PolygonInput<'_>, out: &mut PolygonData) -> Result<(), PolygonError> {
    let res = dispatch(input, out, 0);
    if res.is_err() {
        out.clear();
    }
    res
}

fn dispatch(
    input: PolygonInput<'_>,
    out: &mut PolygonData,
    depth: usize,
) -> Result<(), PolygonError> {
    match input {
        PolygonInput::ValueCopy(p) => out.assign(p.data().as_flat()),
        PolygonInput::Sequence(items) | PolygonInput::Variadic(items) => {
            out.fill_with(items.len(), |i| coerce::pair(&items[i]))
        }
        PolygonInput::Singleton(_) | PolygonInput::Capability(_) if depth >= MAX_NESTING => {
            Err(PolygonError::unsupported("input nested too deeply"))
        }
        PolygonInput::Singleton(inner) => dispatch(PolygonInput::classify(inner)?, out, depth + 1),
        PolygonInput::Capability(obj) => normalize_capability(obj, out, depth + 1),
    }
}

fn normalize_capability(
    obj: &dyn AsPolygon,
    out: &mut PolygonData,
    depth: usize,
) -> Result<(), PolygonError> {
    let Some(data) = obj.as_polygon() else {
        trace!(?obj, "capability yielded no polygon data");
        return Err(PolygonError::NotPolygon);
    };
    PolygonInput::classify(&data)
        .and_then(|input| dispatch(input, out, depth))
        .map_err(|err| {
            if err.kind() != ErrorKind::Allocation {
                trace!(?obj, cause = %err, "capability data rejected");
            }
            not_applicable(err)
        })
}

/// Capability failures mean "not a polygon", except running out of memory.
fn not_applicable(err: PolygonError) -> PolygonError {
    match err.kind() {
        ErrorKind::Allocation => err,
        _ => PolygonError::NotPolygon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn tri() -> Value {
        Value::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])
    }

    #[derive(Debug)]
    struct Shape(Option<Value>);

    impl AsPolygon for Shape {
        fn as_polygon(&self) -> Option<Value> {
            self.0.clone()
        }
    }

    #[test]
    fn classify_picks_first_matching_shape() {
        let p = Polygon::new(&tri()).unwrap();
        assert!(matches!(
            PolygonInput::classify(&Value::Polygon(p)),
            Ok(PolygonInput::ValueCopy(_))
        ));
        assert!(matches!(
            PolygonInput::classify(&tri()),
            Ok(PolygonInput::Sequence(items)) if items.len() == 3
        ));
        assert!(matches!(
            PolygonInput::classify(&Value::Seq(vec![tri()])),
            Ok(PolygonInput::Singleton(_))
        ));
        assert!(matches!(
            PolygonInput::classify(&Value::object(Shape(None))),
            Ok(PolygonInput::Capability(_))
        ));
    }

    #[test]
    fn classify_rejects_zero_and_two_items() {
        for v in [
            Value::Seq(vec![]),
            Value::from(vec![(0.0, 0.0), (1.0, 1.0)]),
            Value::from((1.0, 2.0)),
        ] {
            let err = PolygonInput::classify(&v).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Type);
        }
    }

    #[test]
    fn classify_rejects_scalars_and_strings() {
        assert!(PolygonInput::classify(&Value::Float(1.0)).is_err());
        assert!(PolygonInput::classify(&Value::from("abc")).is_err());
        assert!(PolygonInput::classify(&Value::Opaque("dict".into())).is_err());
    }

    #[test]
    fn classify_args_by_count() {
        let args = [
            Value::from((0.0, 0.0)),
            Value::from((1.0, 0.0)),
            Value::from((1.0, 1.0)),
        ];
        assert!(matches!(
            PolygonInput::classify_args(&args),
            Ok(PolygonInput::Variadic(_))
        ));
        assert!(matches!(
            PolygonInput::classify_args(&args[..1]),
            Ok(PolygonInput::Singleton(_))
        ));
        assert!(PolygonInput::classify_args(&args[..2]).is_err());
        assert!(PolygonInput::classify_args(&[]).is_err());
    }

    #[test]
    fn nested_singletons_unwrap() {
        let nested = Value::Seq(vec![Value::Seq(vec![Value::Seq(vec![tri()])])]);
        let mut out = PolygonData::default();
        normalize(PolygonInput::classify(&nested).unwrap(), &mut out).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.get(2).unwrap(), vector![1.0, 1.0]);
    }

    #[test]
    fn bad_element_aborts_whole_sequence() {
        let v = Value::Seq(vec![
            Value::from((0.0, 0.0)),
            Value::from((1.0, 0.0)),
            Value::from("oops"),
            Value::from((1.0, 1.0)),
        ]);
        let mut out = PolygonData::default();
        let err = normalize(PolygonInput::classify(&v).unwrap(), &mut out).unwrap_err();
        assert!(matches!(err, PolygonError::Coercion { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn capability_is_followed() {
        let obj = Value::object(Shape(Some(tri())));
        let mut out = PolygonData::default();
        normalize(PolygonInput::classify(&obj).unwrap(), &mut out).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn capability_failures_are_soft() {
        let mut out = PolygonData::default();
        for obj in [
            Value::object(Shape(None)),
            Value::object(Shape(Some(Value::from((1.0, 2.0))))),
            Value::object(Shape(Some(Value::from(vec!["a", "b", "c"])))),
        ] {
            let err = normalize(PolygonInput::classify(&obj).unwrap(), &mut out).unwrap_err();
            assert_eq!(err, PolygonError::NotPolygon);
            assert!(out.is_empty());
        }
    }

    #[derive(Debug)]
    struct Mirror;

    impl AsPolygon for Mirror {
        fn as_polygon(&self) -> Option<Value> {
            Some(Value::object(Mirror))
        }
    }

    #[test]
    fn self_yielding_capability_is_not_applicable() {
        let mut out = PolygonData::default();
        let obj = Value::object(Mirror);
        let err = normalize(PolygonInput::classify(&obj).unwrap(), &mut out).unwrap_err();
        assert_eq!(err, PolygonError::NotPolygon);
        assert!(out.is_empty());
    }

    #[test]
    fn nesting_budget_is_bounded() {
        let mut ok = tri();
        for _ in 0..MAX_NESTING {
            ok = Value::Seq(vec![ok]);
        }
        let mut out = PolygonData::default();
        normalize(PolygonInput::classify(&ok).unwrap(), &mut out).unwrap();
        assert_eq!(out.len(), 3);

        let too_deep = Value::Seq(vec![ok]);
        let err = normalize(PolygonInput::classify(&too_deep).unwrap(), &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(out.is_empty());
    }

    #[test]
    fn allocation_failures_survive_capability_downgrade() {
        let oom = PolygonError::Allocation { count: usize::MAX };
        assert_eq!(not_applicable(oom.clone()), oom);
        assert_eq!(
            not_applicable(PolygonError::TooFewVertices { count: 2 }),
            PolygonError::NotPolygon
        );
        assert_eq!(
            not_applicable(PolygonError::unsupported("nested")),
            PolygonError::NotPolygon
        );
    }
}
