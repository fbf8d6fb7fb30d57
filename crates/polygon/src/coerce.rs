//! Numeric coercion of loose values.

use nalgebra::Vector2;

use crate::error::PolygonError;
use crate::value::Value;

/// Coerce a single scalar (floats and integers).
pub fn scalar(value: &Value) -> Result<f64, PolygonError> {
    match value {
        Value::Float(x) => Ok(*x),
        Value::Int(n) => Ok(*n as f64),
        other => Err(PolygonError::coercion(format!(
            "expected a number, got {}",
            other.type_name()
        ))),
    }
}

/// Coerce a 2-number pair.
///
/// Accepts a 2-element sequence of numbers, or a 1-element sequence wrapping
/// such a pair (`[[x, y]]`).
pub fn pair(value: &Value) -> Result<Vector2<f64>, PolygonError> {
    match value {
        Value::Seq(items) if items.len() == 2 => {
            Ok(Vector2::new(scalar(&items[0])?, scalar(&items[1])?))
        }
        Value::Seq(items) if items.len() == 1 => pair(&items[0]),
        Value::Seq(items) => Err(PolygonError::coercion(format!(
            "expected a sequence of 2 numbers, got {} items",
            items.len()
        ))),
        other => Err(PolygonError::coercion(format!(
            "expected a sequence of 2 numbers, got {}",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn scalars_accept_ints_and_floats() {
        assert_eq!(scalar(&Value::Int(-3)).unwrap(), -3.0);
        assert_eq!(scalar(&Value::Float(2.5)).unwrap(), 2.5);
        assert!(scalar(&Value::from("2.5")).is_err());
        assert!(scalar(&Value::from((1.0, 2.0))).is_err());
    }

    #[test]
    fn pairs_from_mixed_numbers() {
        assert_eq!(pair(&Value::from((1i64, 2.5))).unwrap(), vector![1.0, 2.5]);
        assert_eq!(
            pair(&Value::from(vector![3.0, 4.0])).unwrap(),
            vector![3.0, 4.0]
        );
    }

    #[test]
    fn single_element_wrapping_is_unwrapped() {
        let wrapped = Value::Seq(vec![Value::from((5.0, 6.0))]);
        assert_eq!(pair(&wrapped).unwrap(), vector![5.0, 6.0]);
    }

    #[test]
    fn wrong_shapes_are_type_errors() {
        for bad in [
            Value::Seq(vec![]),
            Value::from(vec![1.0, 2.0, 3.0]),
            Value::Float(1.0),
            Value::Opaque("NoneType".into()),
            Value::from(("a", 1.0)),
        ] {
            let err = pair(&bad).unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::Type, "{bad:?}");
        }
    }
}
