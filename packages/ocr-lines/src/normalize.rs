//! Turns whatever shape the detector emitted into a flat list of [`Fragment`]s.
//!
//! Two shapes are understood: a list of per-fragment entries
//! (`[region, [text, confidence]]` pairs or `{region, text, confidence}` objects) and a
//! columnar object with parallel `regions`/`texts`/`confidences` arrays. Anything
//! malformed is dropped here and reported through `tracing`, so a partially garbled
//! detector response still yields the fragments that could be read.
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::region::{Fragment, Point, Region};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("region has {0} points, expected 4")]
    PointCount(usize),
    #[error("flat region has an odd number of coordinates ({0})")]
    OddCoordinates(usize),
    #[error("invalid region: {0}")]
    InvalidRegion(String),
    #[error("invalid entry: {0}")]
    InvalidEntry(String),
}

/// Columnar detector output: parallel arrays zipped entry by entry.
///
/// The `rec_*` aliases are the key names PaddleOCR-style engines use.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnarDetection {
    #[serde(default, alias = "rec_boxes")]
    pub regions: Vec<Value>,
    #[serde(default, alias = "rec_texts")]
    pub texts: Vec<Value>,
    #[serde(default, alias = "rec_scores")]
    pub confidences: Vec<Value>,
}

const COLUMN_KEYS: &[&str] = &[
    "regions",
    "texts",
    "confidences",
    "rec_boxes",
    "rec_texts",
    "rec_scores",
];

/// Detector output for a single image, classified by shape.
#[derive(Debug, Clone)]
pub enum RawDetection {
    Pairs(Vec<Value>),
    Columns(ColumnarDetection),
    /// Top-level shape nobody knows how to read; carries the JSON kind for logging.
    Unrecognized(&'static str),
}

impl RawDetection {
    pub fn empty() -> Self {
        RawDetection::Pairs(Vec::new())
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::empty(),
            Value::Array(entries) => RawDetection::Pairs(entries.clone()),
            Value::Object(map) if map.is_empty() => RawDetection::Columns(ColumnarDetection::default()),
            Value::Object(map) if COLUMN_KEYS.iter().any(|key| map.contains_key(*key)) => {
                match ColumnarDetection::deserialize(value) {
                    Ok(columns) => RawDetection::Columns(columns),
                    Err(e) => {
                        warn!(error = %e, "columnar detector output could not be decoded");
                        RawDetection::Unrecognized("object")
                    }
                }
            }
            other => RawDetection::Unrecognized(kind_of(other)),
        }
    }

    /// Reads a per-image batch and keeps the first image's result.
    pub fn from_batch(value: &Value) -> Self {
        match value {
            Value::Null => Self::empty(),
            Value::Array(images) => match images.first() {
                Some(first) => Self::from_value(first),
                None => Self::empty(),
            },
            other => RawDetection::Unrecognized(kind_of(other)),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalizes classified detector output. Never fails; bad entries are skipped.
pub fn normalize(raw: &RawDetection) -> Vec<Fragment> {
    match raw {
        RawDetection::Pairs(entries) => {
            debug!(entries = entries.len(), "normalizing list-of-pairs detector output");
            collect_fragments(entries.iter().map(parse_entry))
        }
        RawDetection::Columns(columns) => {
            debug!(
                regions = columns.regions.len(),
                texts = columns.texts.len(),
                confidences = columns.confidences.len(),
                "normalizing columnar detector output"
            );
            collect_fragments(
                columns
                    .regions
                    .iter()
                    .zip(&columns.texts)
                    .zip(&columns.confidences)
                    .map(|((region, text), confidence)| build_fragment(region, text, Some(confidence))),
            )
        }
        RawDetection::Unrecognized(kind) => {
            warn!(kind = *kind, "unrecognized detector output shape, treating as no text");
            Vec::new()
        }
    }
}

pub fn normalize_value(value: &Value) -> Vec<Fragment> {
    normalize(&RawDetection::from_value(value))
}

fn collect_fragments<I>(results: I) -> Vec<Fragment>
where
    I: Iterator<Item = Result<Fragment, NormalizeError>>,
{
    results
        .enumerate()
        .filter_map(|(index, result)| match result {
            Ok(fragment) => Some(fragment),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed fragment");
                None
            }
        })
        .collect()
}

fn parse_entry(entry: &Value) -> Result<Fragment, NormalizeError> {
    match entry {
        Value::Array(parts) => match parts.as_slice() {
            [region, Value::Array(label)] => match label.as_slice() {
                [text, confidence] => build_fragment(region, text, Some(confidence)),
                [text] => build_fragment(region, text, None),
                _ => Err(NormalizeError::InvalidEntry(format!(
                    "expected [text, confidence], got {} values",
                    label.len()
                ))),
            },
            _ => Err(NormalizeError::InvalidEntry(
                "expected [region, [text, confidence]]".into(),
            )),
        },
        Value::Object(map) => {
            let region = ["region", "box", "points"]
                .iter()
                .find_map(|key| map.get(*key))
                .ok_or_else(|| NormalizeError::InvalidEntry("missing region".into()))?;
            let text = map
                .get("text")
                .ok_or_else(|| NormalizeError::InvalidEntry("missing text".into()))?;
            let confidence = map.get("confidence").or_else(|| map.get("score"));
            build_fragment(region, text, confidence)
        }
        other => Err(NormalizeError::InvalidEntry(format!(
            "expected array or object, got {}",
            kind_of(other)
        ))),
    }
}

/// Confidence is informational only, so an absent or non-numeric one becomes `0.0`.
fn build_fragment(region: &Value, text: &Value, confidence: Option<&Value>) -> Result<Fragment, NormalizeError> {
    let region = parse_region(region)?;
    let text = text
        .as_str()
        .ok_or_else(|| NormalizeError::InvalidEntry(format!("text is a {}", kind_of(text))))?;
    let confidence = match confidence.and_then(Value::as_f64) {
        Some(confidence) => confidence,
        None => {
            debug!(text, "fragment has no numeric confidence, using 0.0");
            0.0
        }
    };
    Ok(Fragment::new(region, text, confidence))
}

/// Parses one region: four `[x, y]` pairs, four `{x, y}` objects, or a flat number list.
pub fn parse_region(value: &Value) -> Result<Region, NormalizeError> {
    let items = value
        .as_array()
        .ok_or_else(|| NormalizeError::InvalidRegion(format!("expected an array, got {}", kind_of(value))))?;

    match items.first() {
        None => Err(NormalizeError::PointCount(0)),
        Some(Value::Number(_)) => {
            let coords = items
                .iter()
                .map(|item| {
                    item.as_f64().ok_or_else(|| {
                        NormalizeError::InvalidRegion(format!("flat region contains a {}", kind_of(item)))
                    })
                })
                .collect::<Result<Vec<f64>, _>>()?;
            Region::from_flat(&coords)
        }
        Some(_) => {
            let points = items.iter().map(parse_point).collect::<Result<Vec<Point>, _>>()?;
            Region::from_points(&points)
        }
    }
}

fn parse_point(value: &Value) -> Result<Point, NormalizeError> {
    let coord = |v: Option<&Value>| v.and_then(Value::as_f64);
    let parsed = match value {
        Value::Array(xy) if xy.len() == 2 => coord(xy.first()).zip(coord(xy.get(1))),
        Value::Object(map) => coord(map.get("x")).zip(coord(map.get("y"))),
        _ => None,
    };
    parsed
        .map(|(x, y)| Point::new(x, y))
        .ok_or_else(|| NormalizeError::InvalidRegion(format!("bad point {value}")))
}
