//! Stylesheet custom properties on `:root`.

use super::{quote, to_kebab_case, FormatGenerator, GenerateOptions, ValueKind};
use crate::types::{format_number, FlatTokens, FlatValue, Format};

pub struct CssGenerator;

fn css_value(value: &FlatValue) -> String {
    match ValueKind::of(value) {
        ValueKind::Color(hex) => hex.to_string(),
        ValueKind::Number(n) => format_number(n),
        ValueKind::Text(text) => quote(text, false),
    }
}

impl FormatGenerator for CssGenerator {
    fn format(&self) -> Format {
        Format::Css
    }

    fn generate(&self, tokens: &FlatTokens, _options: &GenerateOptions) -> String {
        let vars: Vec<String> = tokens
            .iter()
            .map(|(name, value)| format!("  --{}: {};", to_kebab_case(name), css_value(value)))
            .collect();
        format!(":root {{\n{}\n}}", vars.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(entries: &[(&str, FlatValue)]) -> String {
        let tokens: FlatTokens = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        CssGenerator.generate(&tokens, &GenerateOptions::default())
    }

    #[test]
    fn test_single_color() {
        assert_eq!(
            generate(&[("primaryColor", FlatValue::from("#007aff"))]),
            ":root {\n  --primary-color: #007aff;\n}"
        );
    }

    #[test]
    fn test_mixed_values() {
        let css = generate(&[
            ("colors-Primary-light", FlatValue::from("#FFFFFF")),
            ("spacing-md", FlatValue::Number(16.0)),
            ("typography-Body-fontFamily", FlatValue::from("Inter")),
            ("typography-Body-letterSpacing", FlatValue::Number(-0.5)),
        ]);
        assert_eq!(
            css,
            ":root {\n  --colors-primary-light: #FFFFFF;\n  --spacing-md: 16;\n  \
             --typography-body-font-family: \"Inter\";\n  --typography-body-letter-spacing: -0.5;\n}"
        );
    }

    #[test]
    fn test_empty_mapping() {
        assert_eq!(generate(&[]), ":root {\n\n}");
    }
}
