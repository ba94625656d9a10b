//! Jetpack Compose: an object of `val` properties.

use super::{argb_color_literal, quote, to_camel_case, FormatGenerator, GenerateOptions, ValueKind};
use crate::types::{format_number, FlatTokens, Format};

const IMPORTS: &str = "import androidx.compose.ui.graphics.Color\nimport androidx.compose.ui.unit.dp";

pub struct KotlinGenerator;

impl FormatGenerator for KotlinGenerator {
    fn format(&self) -> Format {
        Format::Kotlin
    }

    fn generate(&self, tokens: &FlatTokens, options: &GenerateOptions) -> String {
        let lines: Vec<String> = tokens
            .iter()
            .map(|(name, value)| {
                let literal = match ValueKind::of(value) {
                    ValueKind::Color(hex) => argb_color_literal(hex),
                    ValueKind::Number(n) => format!("{}.dp", format_number(n)),
                    ValueKind::Text(text) => quote(text, true),
                };
                format!("    val {} = {}", to_camel_case(name), literal)
            })
            .collect();

        format!(
            "{}\n\nobject {} {{\n{}\n}}",
            IMPORTS,
            options.type_name,
            lines.join("\n")
        )
    }
}
