//! @dose
//! purpose: The read-only document interface the extractor consumes, the raw style/geometry
//!     records it yields, and DocumentSnapshot, a JSON export of a design document that
//!     implements it.
//!
//! when-editing:
//!     - !Collections decode item by item so one malformed style never hides the others
//!     - Field names follow the design tool's plugin API (camelCase, SOLID/DROP_SHADOW tags)
//!
//! invariants:
//!     - A missing collection is empty; a collection that is not an array is a Collection error
//!     - Nothing here mutates the source document
//!
//! gotchas:
//!     - lineHeight/letterSpacing come either as bare numbers or as {unit, value} objects
//!     - Geometry fields can be the plugin API's "mixed" marker; those read as None

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Collection '{collection}' is unreadable: {reason}")]
    Collection {
        collection: &'static str,
        reason: String,
    },
    #[error("Malformed item #{index} in '{collection}': {reason}")]
    Item {
        collection: &'static str,
        index: usize,
        reason: String,
    },
}

/// Items of one collection; each decodes (or fails) on its own.
pub type Items<T> = Vec<Result<T, DocumentError>>;

/// Read-only access to the named style collections and the current selection.
pub trait StyleDocument {
    fn paint_styles(&self) -> Result<Items<PaintStyle>, DocumentError>;

    fn text_styles(&self) -> Result<Items<TextStyle>, DocumentError>;

    fn effect_styles(&self) -> Result<Items<EffectStyle>, DocumentError>;

    /// Geometry of the currently selected nodes
    fn selection(&self) -> Result<Items<NodeGeometry>, DocumentError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Paint {
    #[serde(rename = "SOLID")]
    Solid { color: Rgb },
    /// Gradients, images, video
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaintStyle {
    pub name: String,
    /// Kept raw; only the first entry is ever decoded
    #[serde(default)]
    pub paints: Vec<Value>,
}

impl PaintStyle {
    pub fn first_paint(&self) -> Option<Result<Paint, serde_json::Error>> {
        self.paints.first().map(Paint::deserialize)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeasureUnit {
    Pixels,
    Percent,
    Auto,
}

/// A number, or the plugin API's `{unit, value}` form.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(f64),
    Unit {
        unit: MeasureUnit,
        #[serde(default)]
        value: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub name: String,
    pub font_name: FontName,
    pub font_size: f64,
    #[serde(default)]
    pub line_height: Option<Measure>,
    #[serde(default)]
    pub letter_spacing: Option<Measure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    #[serde(rename = "DROP_SHADOW")]
    DropShadow {
        offset: Offset,
        radius: f64,
        #[serde(default)]
        spread: Option<f64>,
        color: Rgba,
    },
    /// Inner shadows and blurs
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EffectStyle {
    pub name: String,
    /// Kept raw; only the first entry is ever decoded
    #[serde(default)]
    pub effects: Vec<Value>,
}

impl EffectStyle {
    pub fn first_effect(&self) -> Option<Result<Effect, serde_json::Error>> {
        self.effects.first().map(Effect::deserialize)
    }
}

/// Layout fields of a selected node. Absent or non-numeric fields (a mixed corner radius
/// arrives as a string) are `None`; the other fields still count.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGeometry {
    #[serde(default, deserialize_with = "number_or_none")]
    pub padding_left: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub padding_right: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub padding_top: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub padding_bottom: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub item_spacing: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub corner_radius: Option<f64>,
}

fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

impl NodeGeometry {
    /// Padding and gap values, in field order
    pub fn spacing_values(&self) -> impl Iterator<Item = f64> {
        [
            self.padding_left,
            self.padding_right,
            self.padding_top,
            self.padding_bottom,
            self.item_spacing,
        ]
        .into_iter()
        .flatten()
    }
}

/// A design document exported as JSON.
///
/// Collections are kept as raw JSON so each item can be decoded independently.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    #[serde(default)]
    paint_styles: Option<Value>,
    #[serde(default)]
    text_styles: Option<Value>,
    #[serde(default)]
    effect_styles: Option<Value>,
    #[serde(default)]
    selection: Option<Value>,
}

impl DocumentSnapshot {
    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

fn decode_collection<T: for<'de> Deserialize<'de>>(
    raw: Option<&Value>,
    collection: &'static str,
) -> Result<Items<T>, DocumentError> {
    let items = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(DocumentError::Collection {
                collection,
                reason: format!("expected an array, found {}", json_kind(other)),
            })
        }
    };

    Ok(items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|e| DocumentError::Item {
                collection,
                index,
                reason: e.to_string(),
            })
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl StyleDocument for DocumentSnapshot {
    fn paint_styles(&self) -> Result<Items<PaintStyle>, DocumentError> {
        decode_collection(self.paint_styles.as_ref(), "paintStyles")
    }

    fn text_styles(&self) -> Result<Items<TextStyle>, DocumentError> {
        decode_collection(self.text_styles.as_ref(), "textStyles")
    }

    fn effect_styles(&self) -> Result<Items<EffectStyle>, DocumentError> {
        decode_collection(self.effect_styles.as_ref(), "effectStyles")
    }

    fn selection(&self) -> Result<Items<NodeGeometry>, DocumentError> {
        decode_collection(self.selection.as_ref(), "selection")
    }
}
