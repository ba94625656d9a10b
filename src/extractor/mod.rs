//! @dose
//! purpose: Builds a TokenModel from any StyleDocument. Paint styles become colors (with
//!     light/dark variants merged into themed tokens), text styles become typography, the first
//!     drop shadow of each effect style becomes an effect, and the current selection's padding,
//!     gap and corner radius values become the spacing and radius scales.
//!
//! when-editing:
//!     - !Per-item problems are logged and counted, never returned as errors
//!     - !A collection-level error stops extraction and returns the partial model with a warning
//!     - Fallback defaults are only seeded after a complete, successful pass
//!
//! invariants:
//!     - Spacing keeps at most six values (xs..xxl), radius at most five (xs..xl)
//!     - A key present in both light and dark buckets becomes exactly one Themed token
//!     - Within a category, later duplicates overwrite earlier ones
//!
//! gotchas:
//!     - Light/dark classification looks at the raw style label, but the base name is the
//!         normalized name with "light"/"dark" removed (so "Highlight" is a light "High")
//!     - Only the first paint or effect of a style is decoded; whatever follows it is ignored,
//!         malformed or not
//!
//! flows:
//!     - extract_tokens: colors -> typography -> effects -> spacing -> radius -> fallback

mod color;
mod document;
mod naming;

pub use color::{parse_hex, rgb_to_hex};
pub use document::*;
pub use naming::{normalize_name, Variant};

use crate::types::{
    ColorToken, EffectToken, LineHeight, ScalarToken, TokenModel, TypographyToken,
};
use indexmap::IndexMap;

pub const SPACING_LABELS: [&str; 6] = ["xs", "sm", "md", "lg", "xl", "xxl"];
pub const RADIUS_LABELS: [&str; 5] = ["xs", "sm", "md", "lg", "xl"];

const DEFAULT_COLORS: [(&str, &str); 2] = [("primary", "#007aff"), ("secondary", "#5856d6")];
const DEFAULT_SPACING: [(&str, f64); 4] = [("xs", 4.0), ("sm", 8.0), ("md", 16.0), ("lg", 24.0)];

#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Seed default colors/spacing when none were found
    pub fallback: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { fallback: true }
    }
}

/// Result of one extraction request. Extraction itself never fails.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub tokens: TokenModel,
    /// Set when extraction stopped early; `tokens` then holds whatever was assembled
    pub warning: Option<String>,
    /// Styles or nodes that could not be used
    pub skipped: usize,
}

pub fn extract_tokens<D: StyleDocument + ?Sized>(doc: &D, options: &ExtractOptions) -> Extraction {
    let mut builder = ModelBuilder::default();

    match builder.run(doc) {
        Ok(()) => {
            if options.fallback {
                apply_fallback(&mut builder.tokens);
            }
            tracing::debug!(
                tokens = builder.tokens.len(),
                skipped = builder.skipped,
                "Extraction complete"
            );
            Extraction {
                tokens: builder.tokens,
                warning: None,
                skipped: builder.skipped,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Extraction stopped early");
            Extraction {
                tokens: builder.tokens,
                warning: Some(format!("Error extracting tokens: {}", e)),
                skipped: builder.skipped,
            }
        }
    }
}

#[derive(Default)]
struct ModelBuilder {
    tokens: TokenModel,
    skipped: usize,
}

impl ModelBuilder {
    fn run<D: StyleDocument + ?Sized>(&mut self, doc: &D) -> Result<(), DocumentError> {
        self.colors(doc)?;
        self.typography(doc)?;
        self.effects(doc)?;
        self.geometry(doc)?;
        Ok(())
    }

    fn skip(&mut self, reason: &dyn std::fmt::Display) {
        tracing::warn!("Skipping item: {}", reason);
        self.skipped += 1;
    }

    fn colors<D: StyleDocument + ?Sized>(&mut self, doc: &D) -> Result<(), DocumentError> {
        let mut light: IndexMap<String, String> = IndexMap::new();
        let mut dark: IndexMap<String, String> = IndexMap::new();

        for item in doc.paint_styles()? {
            let style = match item {
                Ok(style) => style,
                Err(e) => {
                    self.skip(&e);
                    continue;
                }
            };

            let color = match style.first_paint() {
                Some(Ok(Paint::Solid { color })) => color,
                Some(Err(e)) => {
                    self.skip(&format!("paint style '{}' has a malformed fill: {}", style.name, e));
                    continue;
                }
                _ => {
                    tracing::debug!(style = %style.name, "No solid fill, skipping paint style");
                    self.skipped += 1;
                    continue;
                }
            };
            let hex = rgb_to_hex(color.r, color.g, color.b);

            let Some(name) = normalize_name(&style.name) else {
                self.skip(&format!("paint style '{}' has no usable name", style.name));
                continue;
            };

            let variant = Variant::classify(&style.name);
            match variant {
                Variant::Plain => {
                    self.tokens
                        .colors
                        .insert(name, ColorToken::solid(hex, Some(style.name.clone())));
                }
                Variant::Light | Variant::Dark => {
                    let Some(base) = variant.base_name(&name) else {
                        self.skip(&format!(
                            "paint style '{}' has no base name besides its variant",
                            style.name
                        ));
                        continue;
                    };
                    let bucket = if variant == Variant::Light {
                        &mut light
                    } else {
                        &mut dark
                    };
                    bucket.insert(base, hex);
                }
            }
        }

        let names: Vec<String> = light
            .keys()
            .chain(dark.keys().filter(|k| !light.contains_key(*k)))
            .cloned()
            .collect();

        for name in names {
            let token = match (light.get(&name), dark.get(&name)) {
                (Some(l), Some(d)) => ColorToken::Themed {
                    light: l.clone(),
                    dark: d.clone(),
                    display_name: name.clone(),
                },
                (Some(l), None) => ColorToken::solid(l.clone(), Some(annotate(&name, Variant::Light))),
                (None, Some(d)) => ColorToken::solid(d.clone(), Some(annotate(&name, Variant::Dark))),
                (None, None) => continue,
            };
            self.tokens.colors.insert(name, token);
        }

        Ok(())
    }

    fn typography<D: StyleDocument + ?Sized>(&mut self, doc: &D) -> Result<(), DocumentError> {
        for item in doc.text_styles()? {
            let style = match item {
                Ok(style) => style,
                Err(e) => {
                    self.skip(&e);
                    continue;
                }
            };
            let Some(name) = normalize_name(&style.name) else {
                self.skip(&format!("text style '{}' has no usable name", style.name));
                continue;
            };

            let token = TypographyToken {
                font_family: style.font_name.family,
                font_weight: style.font_name.style,
                font_size: style.font_size,
                line_height: line_height(style.line_height, style.font_size),
                letter_spacing: letter_spacing(style.letter_spacing, style.font_size),
                display_name: style.name,
            };
            self.tokens.typography.insert(name, token);
        }
        Ok(())
    }

    fn effects<D: StyleDocument + ?Sized>(&mut self, doc: &D) -> Result<(), DocumentError> {
        for item in doc.effect_styles()? {
            let style = match item {
                Ok(style) => style,
                Err(e) => {
                    self.skip(&e);
                    continue;
                }
            };

            let (offset, radius, spread, color) = match style.first_effect() {
                Some(Ok(Effect::DropShadow {
                    offset,
                    radius,
                    spread,
                    color,
                })) => (offset, radius, spread, color),
                Some(Err(e)) => {
                    self.skip(&format!("effect style '{}' has a malformed effect: {}", style.name, e));
                    continue;
                }
                _ => {
                    tracing::debug!(style = %style.name, "First effect is not a drop shadow, skipping");
                    self.skipped += 1;
                    continue;
                }
            };
            let Some(name) = normalize_name(&style.name) else {
                self.skip(&format!("effect style '{}' has no usable name", style.name));
                continue;
            };

            let token = EffectToken {
                offset_x: offset.x,
                offset_y: offset.y,
                blur_radius: radius,
                spread_radius: spread.unwrap_or(0.0),
                color: rgb_to_hex(color.r, color.g, color.b),
                opacity: color.a,
                display_name: style.name.clone(),
            };
            self.tokens.effects.insert(name, token);
        }
        Ok(())
    }

    fn geometry<D: StyleDocument + ?Sized>(&mut self, doc: &D) -> Result<(), DocumentError> {
        let mut spacing = Vec::new();
        let mut radius = Vec::new();

        for item in doc.selection()? {
            match item {
                Ok(node) => {
                    spacing.extend(node.spacing_values());
                    radius.extend(node.corner_radius);
                }
                Err(e) => self.skip(&e),
            }
        }

        for (label, value) in assign_scale(spacing, &SPACING_LABELS) {
            self.tokens
                .spacing
                .insert(label.to_string(), ScalarToken::spacing(value));
        }
        for (label, value) in assign_scale(radius, &RADIUS_LABELS) {
            self.tokens
                .radius
                .insert(label.to_string(), ScalarToken::radius(value));
        }
        Ok(())
    }
}

fn annotate(name: &str, variant: Variant) -> String {
    format!("{} ({})", name, variant.annotation())
}

fn line_height(measure: Option<Measure>, font_size: f64) -> LineHeight {
    match measure {
        None
        | Some(Measure::Unit {
            unit: MeasureUnit::Auto,
            ..
        }) => LineHeight::Auto,
        Some(Measure::Number(v))
        | Some(Measure::Unit {
            unit: MeasureUnit::Pixels,
            value: v,
        }) => LineHeight::Value(v),
        Some(Measure::Unit {
            unit: MeasureUnit::Percent,
            value,
        }) => LineHeight::Value(font_size * value / 100.0),
    }
}

fn letter_spacing(measure: Option<Measure>, font_size: f64) -> f64 {
    match measure {
        None
        | Some(Measure::Unit {
            unit: MeasureUnit::Auto,
            ..
        }) => 0.0,
        Some(Measure::Number(v))
        | Some(Measure::Unit {
            unit: MeasureUnit::Pixels,
            value: v,
        }) => v,
        Some(Measure::Unit {
            unit: MeasureUnit::Percent,
            value,
        }) => font_size * value / 100.0,
    }
}

/// Distinct positive values, ascending, zipped with the labels. Extra values are dropped.
fn assign_scale<'a>(mut values: Vec<f64>, labels: &[&'a str]) -> Vec<(&'a str, f64)> {
    values.retain(|v| v.is_finite() && *v > 0.0);
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();

    if values.len() > labels.len() {
        tracing::debug!(
            dropped = values.len() - labels.len(),
            "More distinct values than scale labels"
        );
    }

    labels.iter().copied().zip(values).collect()
}

fn apply_fallback(tokens: &mut TokenModel) {
    if tokens.colors.is_empty() {
        tracing::debug!("No color styles found, seeding defaults");
        for (name, hex) in DEFAULT_COLORS {
            tokens
                .colors
                .insert(name.to_string(), ColorToken::solid(hex, None));
        }
    }
    if tokens.spacing.is_empty() {
        tracing::debug!("No spacing found in selection, seeding defaults");
        for (label, value) in DEFAULT_SPACING {
            tokens
                .spacing
                .insert(label.to_string(), ScalarToken::spacing(value));
        }
    }
}
