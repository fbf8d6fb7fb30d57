//! JSON front end: loose JSON → `polygon::Value`, plus the on-disk document.
//!
//! A JSON object carrying a `polygon` key is treated as a capability object:
//! its `polygon` entry is only read when the construction protocol asks.

use anyhow::{Context, Result};
use polygon::{AsPolygon, Polygon, Value};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use std::path::Path;

/// Saved polygon: `{"verts_num": N, "polygon": [[x, y], ...]}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonDoc {
    pub verts_num: usize,
    pub polygon: Vec<[f64; 2]>,
}

impl PolygonDoc {
    pub fn from_polygon(p: &Polygon) -> Self {
        Self {
            verts_num: p.vertex_count(),
            polygon: p.iter().map(|v| [v.x, v.y]).collect(),
        }
    }

    pub fn to_polygon(&self) -> Result<Polygon> {
        let flat: Vec<f64> = self.polygon.iter().flatten().copied().collect();
        Polygon::from_flat(&flat, self.verts_num)
            .with_context(|| format!("document declares {} vertices", self.verts_num))
    }
}

#[derive(Debug)]
struct JsonRecord(Map<String, Json>);

impl AsPolygon for JsonRecord {
    fn as_polygon(&self) -> Option<Value> {
        self.0.get("polygon").map(to_value)
    }
}

/// Convert parsed JSON into the loose value model.
pub fn to_value(json: &Json) -> Value {
    match json {
        Json::Null => Value::Opaque("null".into()),
        Json::Bool(_) => Value::Opaque("bool".into()),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::Str(s.clone()),
        Json::Array(items) => Value::Seq(items.iter().map(to_value).collect()),
        Json::Object(map) if map.contains_key("polygon") => {
            Value::object(JsonRecord(map.clone()))
        }
        Json::Object(_) => Value::Opaque("object".into()),
    }
}

/// Accept either a path to a JSON file or inline JSON text.
pub fn read_json(arg: &str) -> Result<Json> {
    let path = Path::new(arg);
    let text = if path.is_file() {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    } else {
        arg.to_string()
    };
    serde_json::from_str(&text).with_context(|| format!("parsing JSON from {arg}"))
}

/// Load a polygon: strict documents first, then any polygon-shaped JSON.
pub fn load_polygon(json: &Json) -> Result<Polygon> {
    if let Ok(doc) = PolygonDoc::deserialize(json) {
        return doc.to_polygon();
    }
    Polygon::new(&to_value(json)).context("input is not polygon-shaped")
}

#[cfg(test)]
mod tests {
    use super::*;
    use polygon::{PolygonError, Vec2};
    use serde_json::json;

    #[test]
    fn arrays_of_pairs_load() {
        let p = load_polygon(&json!([[0, 0], [1.5, 0], [1, 1]])).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.get(1).unwrap(), Vec2::new(1.5, 0.0));
    }

    #[test]
    fn objects_with_polygon_key_are_capabilities() {
        let p = load_polygon(&json!({"name": "roof", "polygon": [[0, 0], [2, 0], [1, 2]]})).unwrap();
        assert_eq!(p.get(-1).unwrap(), Vec2::new(1.0, 2.0));
        let err = load_polygon(&json!({"polygon": [[0, 0], [2, 0]]})).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PolygonError>(),
            Some(&PolygonError::NotPolygon)
        );
    }

    #[test]
    fn documents_round_trip() {
        let p = load_polygon(&json!([[0, 0], [4, 0], [4, 4], [0, 4]])).unwrap();
        let doc = PolygonDoc::from_polygon(&p);
        assert_eq!(doc.verts_num, 4);
        let text = serde_json::to_string(&doc).unwrap();
        let back = load_polygon(&serde_json::from_str(&text).unwrap()).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn documents_with_wrong_count_are_rejected() {
        let err = load_polygon(&json!({"verts_num": 4, "polygon": [[0, 0], [1, 0], [1, 1]]}))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PolygonError>(),
            Some(PolygonError::BufferLength { count: 4, len: 6 })
        ));
    }

    #[test]
    fn scalars_and_nulls_are_not_polygons() {
        assert!(load_polygon(&json!(3)).is_err());
        assert!(load_polygon(&json!(null)).is_err());
        assert!(load_polygon(&json!("abc")).is_err());
    }

    #[test]
    fn inline_text_is_parsed() {
        let v = read_json("[[0, 0], [1, 0], [1, 1]]").unwrap();
        assert!(v.is_array());
    }

    #[test]
    fn files_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.json");
        std::fs::write(&path, "[[0, 0], [1, 0], [1, 1]]").unwrap();
        let v = read_json(path.to_str().unwrap()).unwrap();
        assert_eq!(load_polygon(&v).unwrap().len(), 3);
    }
}
