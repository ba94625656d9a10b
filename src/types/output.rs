//! Flat token mapping and generated-file types shared by the formatter and the publisher.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A scalar leaf of the token tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Number(f64),
    Text(String),
}

impl From<f64> for FlatValue {
    fn from(value: f64) -> Self {
        FlatValue::Number(value)
    }
}

impl From<&str> for FlatValue {
    fn from(value: &str) -> Self {
        FlatValue::Text(value.to_string())
    }
}

impl From<String> for FlatValue {
    fn from(value: String) -> Self {
        FlatValue::Text(value)
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatValue::Number(n) => f.write_str(&format_number(*n)),
            FlatValue::Text(s) => f.write_str(s),
        }
    }
}

/// Render a number the way JavaScript's `String(n)` does for the values we see:
/// integral values have no fractional part, everything else uses the shortest form.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Dashed token name -> scalar, in traversal order.
pub type FlatTokens = IndexMap<String, FlatValue>;

/// Output formats, in the order they are listed to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Css,
    Swift,
    Kotlin,
    Dart,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Css, Format::Swift, Format::Kotlin, Format::Dart];

    pub fn id(self) -> &'static str {
        match self {
            Format::Css => "css",
            Format::Swift => "swift",
            Format::Kotlin => "kotlin",
            Format::Dart => "dart",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Css => "css",
            Format::Swift => "swift",
            Format::Kotlin => "kt",
            Format::Dart => "dart",
        }
    }

    pub fn file_name(self) -> String {
        format!("tokens.{}", self.extension())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(Format::Css),
            "swift" | "swiftui" => Ok(Format::Swift),
            "kotlin" | "kt" => Ok(Format::Kotlin),
            "dart" | "flutter" => Ok(Format::Dart),
            other => Err(format!(
                "unknown format '{}' (expected css, swift, kotlin or dart)",
                other
            )),
        }
    }
}

/// One generated source file. Created per conversion and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedFile {
    pub file_name: String,
    pub content: String,
    pub format: Format,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_matches_js() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("css".parse::<Format>(), Ok(Format::Css));
        assert_eq!("SwiftUI".parse::<Format>(), Ok(Format::Swift));
        assert_eq!("kt".parse::<Format>(), Ok(Format::Kotlin));
        assert_eq!(" dart ".parse::<Format>(), Ok(Format::Dart));
        assert!("xml".parse::<Format>().is_err());
    }

    #[test]
    fn test_file_names() {
        let names: Vec<String> = Format::ALL.iter().map(|f| f.file_name()).collect();
        assert_eq!(
            names,
            vec!["tokens.css", "tokens.swift", "tokens.kt", "tokens.dart"]
        );
    }
}
