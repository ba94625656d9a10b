//! Flutter: a class of `static const` fields.

use super::{argb_color_literal, quote, to_camel_case, FormatGenerator, GenerateOptions, ValueKind};
use crate::types::{format_number, FlatTokens, Format};

pub struct DartGenerator;

/// Integral values get an explicit `.0` so they type as `double`
fn dart_double(n: f64) -> String {
    let text = format_number(n);
    if text.contains(['.', 'e', 'N', 'i']) {
        text
    } else {
        format!("{}.0", text)
    }
}

impl FormatGenerator for DartGenerator {
    fn format(&self) -> Format {
        Format::Dart
    }

    fn generate(&self, tokens: &FlatTokens, options: &GenerateOptions) -> String {
        let lines: Vec<String> = tokens
            .iter()
            .map(|(name, value)| {
                let (ty, literal) = match ValueKind::of(value) {
                    ValueKind::Color(hex) => ("Color", argb_color_literal(hex)),
                    ValueKind::Number(n) => ("double", dart_double(n)),
                    ValueKind::Text(text) => ("String", quote(text, true)),
                };
                format!("  static const {} {} = {};", ty, to_camel_case(name), literal)
            })
            .collect();

        format!(
            "import 'package:flutter/material.dart';\n\nclass {} {{\n{}\n}}",
            options.type_name,
            lines.join("\n")
        )
    }
}
