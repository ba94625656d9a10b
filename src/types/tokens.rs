//! @dose
//! purpose: The normalized design token model produced by the extractor and consumed by the
//!     flattener. Colors, spacing, typography, effects and radius each live in their own
//!     ordered map keyed by the normalized token name.
//!
//! when-editing:
//!     - !The JSON shape written by Serialize must flatten to the same entries as the typed
//!         flattener in formatter::flatten (there is a test for this)
//!     - Token objects carry a string "type" member so the JSON flattener treats "type"/"name"
//!         as metadata instead of values
//!
//! invariants:
//!     - A Themed color only exists when both a light and a dark source resolved to one base name
//!     - Keys are unique per category; re-inserting a key keeps its original position
//!
//! gotchas:
//!     - LineHeight::Auto serializes as the string "auto", not as a number

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A color token: either one value, or a light/dark pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ColorToken {
    #[serde(rename = "color")]
    Solid {
        value: String,
        #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    #[serde(rename = "themedColor")]
    Themed {
        light: String,
        dark: String,
        #[serde(rename = "name")]
        display_name: String,
    },
}

impl ColorToken {
    pub fn solid(value: impl Into<String>, display_name: Option<String>) -> Self {
        ColorToken::Solid {
            value: value.into(),
            display_name,
        }
    }
}

/// Which scale a scalar token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Spacing,
    Radius,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalarToken {
    #[serde(rename = "type")]
    pub unit_kind: UnitKind,
    pub value: f64,
}

impl ScalarToken {
    pub fn spacing(value: f64) -> Self {
        Self {
            unit_kind: UnitKind::Spacing,
            value,
        }
    }

    pub fn radius(value: f64) -> Self {
        Self {
            unit_kind: UnitKind::Radius,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineHeight {
    Auto,
    Value(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypographyToken {
    pub font_family: String,
    pub font_weight: String,
    pub font_size: f64,
    pub line_height: LineHeight,
    pub letter_spacing: f64,
    pub display_name: String,
}

/// A drop shadow. Other effect kinds never make it into the model.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectToken {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur_radius: f64,
    pub spread_radius: f64,
    pub color: String,
    /// Alpha of the shadow color, 0..=1
    pub opacity: f64,
    pub display_name: String,
}

/// The complete token set for one extraction or upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenModel {
    pub colors: IndexMap<String, ColorToken>,
    pub spacing: IndexMap<String, ScalarToken>,
    pub typography: IndexMap<String, TypographyToken>,
    pub effects: IndexMap<String, EffectToken>,
    pub radius: IndexMap<String, ScalarToken>,
}

impl TokenModel {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.spacing.is_empty()
            && self.typography.is_empty()
            && self.effects.is_empty()
            && self.radius.is_empty()
    }

    /// Total number of tokens across all categories
    pub fn len(&self) -> usize {
        self.colors.len()
            + self.spacing.len()
            + self.typography.len()
            + self.effects.len()
            + self.radius.len()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `{"value": .., "type": ..}` wrapper used for the individual token fields.
#[derive(Serialize)]
struct Wrapped<'a, T: Serialize> {
    value: T,
    #[serde(rename = "type")]
    kind: &'a str,
}

fn wrap<T: Serialize>(value: T, kind: &str) -> Wrapped<'_, T> {
    Wrapped { value, kind }
}

impl Serialize for LineHeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LineHeight::Auto => serializer.serialize_str("auto"),
            LineHeight::Value(v) => serializer.serialize_f64(*v),
        }
    }
}

impl Serialize for TypographyToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        map.serialize_entry("type", "typography")?;
        map.serialize_entry("name", &self.display_name)?;
        map.serialize_entry("fontFamily", &wrap(&self.font_family, "fontFamily"))?;
        map.serialize_entry("fontWeight", &wrap(&self.font_weight, "fontWeight"))?;
        map.serialize_entry("fontSize", &wrap(self.font_size, "fontSize"))?;
        map.serialize_entry("lineHeight", &wrap(self.line_height, "lineHeight"))?;
        map.serialize_entry("letterSpacing", &wrap(self.letter_spacing, "letterSpacing"))?;
        map.end()
    }
}

impl Serialize for EffectToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8))?;
        map.serialize_entry("type", "shadow")?;
        map.serialize_entry("name", &self.display_name)?;
        map.serialize_entry("offsetX", &wrap(self.offset_x, "dimension"))?;
        map.serialize_entry("offsetY", &wrap(self.offset_y, "dimension"))?;
        map.serialize_entry("blurRadius", &wrap(self.blur_radius, "dimension"))?;
        map.serialize_entry("spreadRadius", &wrap(self.spread_radius, "dimension"))?;
        map.serialize_entry("color", &wrap(&self.color, "color"))?;
        map.serialize_entry("opacity", &wrap(self.opacity, "opacity"))?;
        map.end()
    }
}
