//! Token name derivation from raw style labels.

use once_cell::sync::Lazy;
use regex::Regex;

static LIGHT: Lazy<Regex> = Lazy::new(|| Regex::new("(?i)light").expect("valid regex"));
static DARK: Lazy<Regex> = Lazy::new(|| Regex::new("(?i)dark").expect("valid regex"));

/// Derive a token name from a style label.
///
/// Whitespace, path separators and every other non-alphanumeric character are removed.
/// Returns `None` when nothing is left, which excludes the style.
pub fn normalize_name(raw: &str) -> Option<String> {
    let name: String = raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Light/dark classification of a paint style, by case-insensitive substring match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Light,
    Dark,
    Plain,
}

impl Variant {
    pub fn classify(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("light") {
            Variant::Light
        } else if lower.contains("dark") {
            Variant::Dark
        } else {
            Variant::Plain
        }
    }

    /// Strip the variant marker from a normalized name. `None` if nothing is left.
    pub fn base_name(self, name: &str) -> Option<String> {
        let base = match self {
            Variant::Light => LIGHT.replace_all(name, "").into_owned(),
            Variant::Dark => DARK.replace_all(name, "").into_owned(),
            Variant::Plain => name.to_string(),
        };
        if base.is_empty() {
            None
        } else {
            Some(base)
        }
    }

    pub fn annotation(self) -> &'static str {
        match self {
            Variant::Light => "Light",
            Variant::Dark => "Dark",
            Variant::Plain => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Primary/Light"), Some("PrimaryLight".to_string()));
        assert_eq!(normalize_name("Brand Blue 500"), Some("BrandBlue500".to_string()));
        assert_eq!(normalize_name("  text / on-surface  "), Some("textonsurface".to_string()));
        assert_eq!(normalize_name("Café"), Some("Caf".to_string()));
    }

    #[test]
    fn test_normalize_name_empty_excludes() {
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name(" / - _ "), None);
        assert_eq!(normalize_name("🎨"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Variant::classify("Primary/Light"), Variant::Light);
        assert_eq!(Variant::classify("primary/DARK"), Variant::Dark);
        assert_eq!(Variant::classify("Brand/Blue"), Variant::Plain);
        // Light wins when both appear
        assert_eq!(Variant::classify("Dark/Light"), Variant::Light);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(
            Variant::Light.base_name("PrimaryLight"),
            Some("Primary".to_string())
        );
        assert_eq!(
            Variant::Dark.base_name("darkSurfaceDARK"),
            Some("Surface".to_string())
        );
        assert_eq!(Variant::Light.base_name("Light"), None);
        assert_eq!(Variant::Plain.base_name("Brand"), Some("Brand".to_string()));
    }
}
