use super::{layout, GridSource, IngestConfig, IngestError, Ingested};
use crate::cell::role;
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Keys holding tile-map metadata that never contains the data layer.
const IGNORED_KEYS: [&str; 2] = ["canvas", "tilesets"];

#[derive(Clone, Debug)]
enum Origin {
    Path(PathBuf),
    Text(String),
}

/// Reads a tile-map JSON document and builds a grid from its `"data"` layer, as in
///
/// ```json
/// { "canvas": { "width": 96, "height": 96 },
///   "layers": [ { "name": "ground", "data": [0, -1, -1, 3, 8, -1] } ],
///   "tilesets": [] }
/// ```
///
/// Layers are found anywhere in the document: an object with a `"data"` array is a layer, and
/// when an array holds several such objects their data is concatenated in order.
#[derive(Clone, Debug)]
pub struct JsonSource {
    origin: Origin,
    config: IngestConfig,
}

impl JsonSource {
    pub fn from_path(path: impl Into<PathBuf>) -> JsonSource {
        JsonSource {
            origin: Origin::Path(path.into()),
            config: IngestConfig::default(),
        }
    }

    pub fn from_text(text: impl Into<String>) -> JsonSource {
        JsonSource {
            origin: Origin::Text(text.into()),
            config: IngestConfig::default(),
        }
    }

    pub fn with_config(mut self, config: IngestConfig) -> JsonSource {
        self.config = config;
        self
    }

    /// Extracts the raw codes of the data layers without normalizing them.
    pub fn read_codes(&self) -> Result<Vec<i32>, IngestError> {
        let document: Value = match &self.origin {
            Origin::Path(path) => {
                info!("Reading tile map {}", path.display());
                serde_json::from_str(&fs::read_to_string(path)?)?
            }
            Origin::Text(text) => serde_json::from_str(text)?,
        };
        extract_codes(&document, self.config.max_entries())
    }
}

impl GridSource for JsonSource {
    fn ingest(&mut self) -> Result<Ingested, IngestError> {
        let codes = self.read_codes()?;
        layout::build(codes, &self.config)
    }
}

/// Collects the codes of the first data layers found in `document`, failing if any single layer
/// or their concatenation exceeds `max_entries`.
pub fn extract_codes(document: &Value, max_entries: usize) -> Result<Vec<i32>, IngestError> {
    let layers = find_layers(document).ok_or(IngestError::NoDataLayer)?;
    let mut codes = Vec::new();
    for layer in layers {
        if codes.len() + layer.len() > max_entries {
            return Err(IngestError::Oversized {
                len: codes.len() + layer.len(),
                max: max_entries,
            });
        }
        codes.extend(layer.iter().map(code_of));
    }
    debug!("Extracted {} codes from data layers", codes.len());
    Ok(codes)
}

fn find_layers(value: &Value) -> Option<Vec<&Vec<Value>>> {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(data)) = map.get("data") {
                return Some(vec![data]);
            }
            map.iter()
                .filter(|(key, _)| !IGNORED_KEYS.contains(&key.as_str()))
                .find_map(|(_, v)| find_layers(v))
        }
        Value::Array(items) => {
            let layers = items
                .iter()
                .filter_map(|item| item.get("data")?.as_array())
                .collect::<Vec<_>>();
            if layers.is_empty() {
                items.iter().find_map(find_layers)
            } else {
                Some(layers)
            }
        }
        _ => None,
    }
}

/// Integral numbers are taken as-is and integers outside the `i32` range read as walkable;
/// anything else reads as 0, as lenient tile-map readers do.
fn code_of(value: &Value) -> i32 {
    if let Some(v) = value.as_i64() {
        return i32::try_from(v).unwrap_or(role::WALKABLE);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 => {
            if (i32::MIN as f64..=i32::MAX as f64).contains(&f) {
                f as i32
            } else {
                role::WALKABLE
            }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_util::point::Point;
    use serde_json::json;

    #[test]
    fn finds_layer_under_layers_key() {
        let doc = json!({
            "canvas": {"data": [1, 2, 3]},
            "layers": [{"name": "ground", "data": [0, -1, 3, 8]}],
            "tilesets": [{"data": [9]}]
        });
        assert_eq!(extract_codes(&doc, 2500).unwrap(), vec![0, -1, 3, 8]);
    }

    #[test]
    fn concatenates_sibling_layers() {
        let doc = json!({"layers": [{"data": [1, 2]}, {"name": "empty"}, {"data": [3]}]});
        assert_eq!(extract_codes(&doc, 2500).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn finds_nested_and_top_level_data() {
        let nested = json!({"map": {"levels": [[{"data": [8, 0]}]]}});
        assert_eq!(extract_codes(&nested, 2500).unwrap(), vec![8, 0]);
        let top = json!({"data": [3, 3]});
        assert_eq!(extract_codes(&top, 2500).unwrap(), vec![3, 3]);
    }

    #[test]
    fn non_integral_entries_read_as_zero() {
        let doc = json!({"data": [2.0, 2.5, "x", null, 7]});
        assert_eq!(extract_codes(&doc, 2500).unwrap(), vec![2, 0, 0, 0, 7]);
    }

    #[test]
    fn out_of_range_entries_read_as_walkable() {
        // 2^32 + 3 and 2^32 must not wrap around to the blocked and start codes
        let doc = json!({"data": [
            0,
            4294967299i64,
            4294967296i64,
            -4294967293i64,
            1e12,
            18446744073709551615u64,
            8
        ]});
        let mut codes = extract_codes(&doc, 2500).unwrap();
        assert_eq!(codes, vec![0, -1, -1, -1, -1, -1, 8]);
        layout::normalize_roles(&mut codes);
        assert_eq!(codes, vec![0, -1, -1, -1, -1, -1, 8]);
        let edges = json!({"data": [i32::MAX, i32::MIN, 2147483648i64]});
        assert_eq!(
            extract_codes(&edges, 2500).unwrap(),
            vec![i32::MAX, i32::MIN, -1]
        );
    }

    #[test]
    fn missing_layer_and_oversize() {
        assert!(matches!(
            extract_codes(&json!({"layers": []}), 2500),
            Err(IngestError::NoDataLayer)
        ));
        assert!(matches!(
            extract_codes(&json!({"data": [1, 2, 3]}), 2),
            Err(IngestError::Oversized { len: 3, max: 2 })
        ));
        assert!(matches!(
            extract_codes(&json!([{"data": [1, 2]}, {"data": [3]}]), 2),
            Err(IngestError::Oversized { len: 3, max: 2 })
        ));
    }

    #[test]
    fn ingest_from_text() {
        let mut source = JsonSource::from_text(r#"{"layers":[{"data":[0,-1,-1,-1,3,-1,-1,-1,8]}]}"#);
        let ingested = source.ingest().unwrap();
        assert_eq!((ingested.grid.width(), ingested.grid.height()), (3, 3));
        assert_eq!(ingested.start, Point::new(0, 0));
        assert_eq!(ingested.goal, Point::new(2, 2));
        assert_eq!(ingested.grid[Point::new(1, 1)].role, role::BLOCKED);
    }

    #[test]
    fn unreadable_and_unparsable_sources_fail() {
        let mut missing = JsonSource::from_path("/nonexistent/dir/map.json");
        assert!(matches!(missing.ingest(), Err(IngestError::Io(_))));
        let mut broken = JsonSource::from_text("{\"layers\": [");
        assert!(matches!(broken.ingest(), Err(IngestError::Parse(_))));
    }
}
