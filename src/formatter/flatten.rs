//! @dose
//! purpose: Turns a token tree into a flat `dashed-name -> scalar` mapping. Works on the typed
//!     TokenModel (pattern-matching each token kind) and on arbitrary uploaded JSON.
//!
//! when-editing:
//!     - !flatten_model and flatten_json(serde_json::to_value(model)) must agree
//!     - Objects with a `value` member are wrappers: they contribute a single entry
//!
//! invariants:
//!     - Depth-first, left-to-right, in the input's own key order
//!     - `type`/`name` inside an object with a string `type` are metadata, never entries
//!     - A later duplicate path overwrites the earlier entry in place
//!
//! gotchas:
//!     - Booleans and null become text ("true", "null"), so generators quote them

use crate::types::{ColorToken, FlatTokens, FlatValue, LineHeight, TokenModel};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlattenError {
    #[error("Token tree nests deeper than {limit} levels (at '{path}')")]
    TooDeep { limit: usize, path: String },
    #[error("Token tree has more than {limit} entries")]
    TooManyEntries { limit: usize },
}

/// Guards against pathological uploaded documents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlattenLimits {
    pub max_depth: usize,
    pub max_entries: usize,
}

impl Default for FlattenLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_entries: 10_000,
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}-{}", prefix, key)
    }
}

/// Flatten a typed model. Total: the model's shape is bounded.
pub fn flatten_model(model: &TokenModel) -> FlatTokens {
    let mut out = FlatTokens::new();

    for (name, token) in &model.colors {
        let path = join("colors", name);
        match token {
            ColorToken::Solid { value, .. } => {
                out.insert(path, FlatValue::from(value.as_str()));
            }
            ColorToken::Themed { light, dark, .. } => {
                out.insert(join(&path, "light"), FlatValue::from(light.as_str()));
                out.insert(join(&path, "dark"), FlatValue::from(dark.as_str()));
            }
        }
    }

    for (name, token) in &model.spacing {
        out.insert(join("spacing", name), FlatValue::Number(token.value));
    }

    for (name, token) in &model.typography {
        let path = join("typography", name);
        let line_height = match token.line_height {
            LineHeight::Auto => FlatValue::from("auto"),
            LineHeight::Value(v) => FlatValue::Number(v),
        };
        out.insert(join(&path, "fontFamily"), FlatValue::from(token.font_family.as_str()));
        out.insert(join(&path, "fontWeight"), FlatValue::from(token.font_weight.as_str()));
        out.insert(join(&path, "fontSize"), FlatValue::Number(token.font_size));
        out.insert(join(&path, "lineHeight"), line_height);
        out.insert(join(&path, "letterSpacing"), FlatValue::Number(token.letter_spacing));
    }

    for (name, token) in &model.effects {
        let path = join("effects", name);
        out.insert(join(&path, "offsetX"), FlatValue::Number(token.offset_x));
        out.insert(join(&path, "offsetY"), FlatValue::Number(token.offset_y));
        out.insert(join(&path, "blurRadius"), FlatValue::Number(token.blur_radius));
        out.insert(join(&path, "spreadRadius"), FlatValue::Number(token.spread_radius));
        out.insert(join(&path, "color"), FlatValue::from(token.color.as_str()));
        out.insert(join(&path, "opacity"), FlatValue::Number(token.opacity));
    }

    for (name, token) in &model.radius {
        out.insert(join("radius", name), FlatValue::Number(token.value));
    }

    out
}

/// Flatten arbitrary JSON (an uploaded token file).
pub fn flatten_json(value: &Value, limits: &FlattenLimits) -> Result<FlatTokens, FlattenError> {
    let mut walker = JsonWalker {
        limits,
        out: FlatTokens::new(),
    };
    match value {
        Value::Object(_) | Value::Array(_) => walker.visit("", value, 0)?,
        _ => tracing::debug!("Token document root is a scalar, nothing to flatten"),
    }
    Ok(walker.out)
}

struct JsonWalker<'a> {
    limits: &'a FlattenLimits,
    out: FlatTokens,
}

impl JsonWalker<'_> {
    fn visit(&mut self, path: &str, value: &Value, depth: usize) -> Result<(), FlattenError> {
        if depth > self.limits.max_depth {
            return Err(FlattenError::TooDeep {
                limit: self.limits.max_depth,
                path: path.to_string(),
            });
        }

        match value {
            Value::Object(map) => {
                if let Some(inner) = map.get("value") {
                    return self.visit(path, inner, depth + 1);
                }
                let is_token = matches!(map.get("type"), Some(Value::String(_)));
                for (key, child) in map {
                    if is_token && (key == "type" || key == "name") {
                        continue;
                    }
                    self.visit(&join(path, key), child, depth + 1)?;
                }
                Ok(())
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    self.visit(&join(path, &index.to_string()), child, depth + 1)?;
                }
                Ok(())
            }
            Value::Number(n) => self.insert(path, FlatValue::Number(n.as_f64().unwrap_or(0.0))),
            Value::String(s) => self.insert(path, FlatValue::Text(s.clone())),
            Value::Bool(b) => self.insert(path, FlatValue::Text(b.to_string())),
            Value::Null => self.insert(path, FlatValue::from("null")),
        }
    }

    fn insert(&mut self, path: &str, value: FlatValue) -> Result<(), FlattenError> {
        let key = if path.is_empty() { "value" } else { path };
        if self.out.len() >= self.limits.max_entries && !self.out.contains_key(key) {
            return Err(FlattenError::TooManyEntries {
                limit: self.limits.max_entries,
            });
        }
        self.out.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EffectToken, ScalarToken, TypographyToken};
    use serde_json::json;

    fn sample_model() -> TokenModel {
        let mut model = TokenModel::default();
        model.colors.insert(
            "Brand".to_string(),
            ColorToken::solid("#007aff", Some("Brand".to_string())),
        );
        model.colors.insert(
            "Surface".to_string(),
            ColorToken::Themed {
                light: "#ffffff".to_string(),
                dark: "#000000".to_string(),
                display_name: "Surface".to_string(),
            },
        );
        model.spacing.insert("xs".to_string(), ScalarToken::spacing(4.0));
        model.typography.insert(
            "Body".to_string(),
            TypographyToken {
                font_family: "Inter".to_string(),
                font_weight: "Regular".to_string(),
                font_size: 16.0,
                line_height: LineHeight::Auto,
                letter_spacing: 0.5,
                display_name: "Body".to_string(),
            },
        );
        model.effects.insert(
            "Card".to_string(),
            EffectToken {
                offset_x: 0.0,
                offset_y: 2.0,
                blur_radius: 4.0,
                spread_radius: 0.0,
                color: "#000000".to_string(),
                opacity: 0.25,
                display_name: "Shadow/Card".to_string(),
            },
        );
        model.radius.insert("sm".to_string(), ScalarToken::radius(4.0));
        model
    }

    #[test]
    fn test_flatten_model_paths() {
        let flat = flatten_model(&sample_model());
        let keys: Vec<&str> = flat.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "colors-Brand",
                "colors-Surface-light",
                "colors-Surface-dark",
                "spacing-xs",
                "typography-Body-fontFamily",
                "typography-Body-fontWeight",
                "typography-Body-fontSize",
                "typography-Body-lineHeight",
                "typography-Body-letterSpacing",
                "effects-Card-offsetX",
                "effects-Card-offsetY",
                "effects-Card-blurRadius",
                "effects-Card-spreadRadius",
                "effects-Card-color",
                "effects-Card-opacity",
                "radius-sm",
            ]
        );
        assert_eq!(flat["colors-Surface-dark"], FlatValue::from("#000000"));
        assert_eq!(flat["typography-Body-lineHeight"], FlatValue::from("auto"));
        assert_eq!(flat["effects-Card-opacity"], FlatValue::Number(0.25));
    }

    #[test]
    fn test_typed_and_json_flattening_agree() {
        let model = sample_model();
        let json = serde_json::to_value(&model).unwrap();
        let from_json = flatten_json(&json, &FlattenLimits::default()).unwrap();
        assert_eq!(flatten_model(&model), from_json);
    }

    #[test]
    fn test_flatten_json_wrappers_and_groups() {
        let doc = json!({
            "color": {
                "primary": {"value": "#007AFF", "type": "color"},
                "text": {"muted": {"value": "#888888"}}
            },
            "size": {"base": 16, "scale": [1, 1.5]},
            "flags": {"dense": true, "note": null}
        });
        let flat = flatten_json(&doc, &FlattenLimits::default()).unwrap();

        assert_eq!(flat["color-primary"], FlatValue::from("#007AFF"));
        assert_eq!(flat["color-text-muted"], FlatValue::from("#888888"));
        assert_eq!(flat["size-base"], FlatValue::Number(16.0));
        assert_eq!(flat["size-scale-1"], FlatValue::Number(1.5));
        assert_eq!(flat["flags-dense"], FlatValue::from("true"));
        assert_eq!(flat["flags-note"], FlatValue::from("null"));
        assert_eq!(flat.len(), 7);
    }

    #[test]
    fn test_wrapper_with_structured_value_keeps_path() {
        let doc = json!({"lineHeight": {"value": {"unit": "PIXELS", "value": 24}}});
        let flat = flatten_json(&doc, &FlattenLimits::default()).unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["lineHeight"], FlatValue::Number(24.0));
    }

    #[test]
    fn test_metadata_only_skipped_inside_typed_objects() {
        // A group without a string `type` keeps a token literally called "name"
        let doc = json!({"font": {"name": "Inter"}});
        let flat = flatten_json(&doc, &FlattenLimits::default()).unwrap();
        assert_eq!(flat["font-name"], FlatValue::from("Inter"));
    }

    #[test]
    fn test_depth_limit() {
        let mut doc = json!(1);
        for _ in 0..10 {
            doc = json!({ "n": doc });
        }
        let limits = FlattenLimits {
            max_depth: 5,
            max_entries: 100,
        };
        let err = flatten_json(&doc, &limits).unwrap_err();
        assert!(matches!(err, FlattenError::TooDeep { limit: 5, .. }));

        assert!(flatten_json(&doc, &FlattenLimits::default()).is_ok());
    }

    #[test]
    fn test_entry_limit() {
        let doc = json!({"a": 1, "b": 2, "c": 3});
        let limits = FlattenLimits {
            max_depth: 8,
            max_entries: 2,
        };
        assert_eq!(
            flatten_json(&doc, &limits),
            Err(FlattenError::TooManyEntries { limit: 2 })
        );
    }

    #[test]
    fn test_scalar_root_is_empty() {
        let flat = flatten_json(&json!("tokens"), &FlattenLimits::default()).unwrap();
        assert!(flat.is_empty());
    }
}
