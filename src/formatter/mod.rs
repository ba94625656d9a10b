//! @dose
//! purpose: Output generation. Flattens token trees and renders the flat mapping into one
//!     source file per requested format (CSS custom properties, SwiftUI, Jetpack Compose,
//!     Flutter) through the FormatGenerator trait and the GeneratorRegistry.
//!
//! when-editing:
//!     - !When adding a new format, add it to types::Format and register it in
//!         GeneratorRegistry::new()
//!     - All generators classify values through ValueKind so the color/number/text decision is
//!         made in exactly one place
//!
//! invariants:
//!     - Output files follow the order of the requested formats; duplicates are dropped
//!     - Generators are pure: same flat mapping and options, same text
//!
//! flows:
//!     - convert: flatten (typed or JSON) -> for each format -> generator.generate -> GeneratedFile

mod casing;
mod css;
mod dart;
pub mod flatten;
mod kotlin;
mod swift;

pub use casing::{to_camel_case, to_kebab_case};
pub use css::CssGenerator;
pub use dart::DartGenerator;
pub use flatten::{flatten_json, flatten_model, FlattenError, FlattenLimits};
pub use kotlin::KotlinGenerator;
pub use swift::SwiftGenerator;

use crate::types::{FlatTokens, FlatValue, Format, GeneratedFile};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Error reading JSON file. Please check the file format. ({0})")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Please select at least one format")]
    NoFormats,
    #[error("No tokens loaded. Extract from a document or load a JSON file first")]
    NoTokens,
    #[error("{0}")]
    UnknownFormat(String),
    #[error(transparent)]
    Flatten(#[from] FlattenError),
}

/// Options shared by every generator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// Name of the emitted struct/object/class
    pub type_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            type_name: "DesignTokens".to_string(),
        }
    }
}

/// How a flat value should be rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind<'a> {
    Color(&'a str),
    Number(f64),
    Text(&'a str),
}

impl<'a> ValueKind<'a> {
    pub fn of(value: &'a FlatValue) -> Self {
        match value {
            FlatValue::Number(n) => ValueKind::Number(*n),
            FlatValue::Text(s) if s.starts_with('#') => ValueKind::Color(s),
            FlatValue::Text(s) => ValueKind::Text(s),
        }
    }
}

/// Double-quoted string literal. `escape_dollar` is for languages with `$` templates.
pub(crate) fn quote(text: &str, escape_dollar: bool) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '$' if escape_dollar => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `#007aff` -> `Color(0xFF007AFF)`
pub(crate) fn argb_color_literal(hex: &str) -> String {
    format!("Color(0xFF{})", hex.trim_start_matches('#').to_uppercase())
}

/// Trait for format-specific generators
pub trait FormatGenerator: Send + Sync {
    fn format(&self) -> Format;

    /// Render the whole file for the given flat mapping
    fn generate(&self, tokens: &FlatTokens, options: &GenerateOptions) -> String;
}

/// Registry of generators, keyed by format
pub struct GeneratorRegistry {
    generators: HashMap<Format, Arc<dyn FormatGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        let mut generators: HashMap<Format, Arc<dyn FormatGenerator>> = HashMap::new();

        let all: [Arc<dyn FormatGenerator>; 4] = [
            Arc::new(CssGenerator),
            Arc::new(SwiftGenerator),
            Arc::new(KotlinGenerator),
            Arc::new(DartGenerator),
        ];
        for generator in all {
            generators.insert(generator.format(), generator);
        }

        Self { generators }
    }

    pub fn get(&self, format: Format) -> Option<Arc<dyn FormatGenerator>> {
        self.generators.get(&format).cloned()
    }

    /// Generate one file per requested format, in request order.
    pub fn generate_files(
        &self,
        tokens: &FlatTokens,
        formats: &[Format],
        options: &GenerateOptions,
    ) -> Result<Vec<GeneratedFile>, ConvertError> {
        if formats.is_empty() {
            return Err(ConvertError::NoFormats);
        }

        let mut files: Vec<GeneratedFile> = Vec::with_capacity(formats.len());
        for &format in formats {
            if files.iter().any(|f| f.format == format) {
                continue;
            }
            let generator = self
                .get(format)
                .ok_or_else(|| ConvertError::UnknownFormat(format.to_string()))?;
            tracing::debug!(format = %format, entries = tokens.len(), "Generating");
            files.push(GeneratedFile {
                file_name: format.file_name(),
                content: generator.generate(tokens, options),
                format,
            });
        }
        Ok(files)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse user-supplied format identifiers.
pub fn parse_formats<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Format>, ConvertError> {
    ids.iter()
        .map(|id| id.as_ref().parse::<Format>().map_err(ConvertError::UnknownFormat))
        .collect()
}
