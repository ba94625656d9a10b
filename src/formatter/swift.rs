//! SwiftUI: a struct of `static let` constants.

use super::{quote, to_camel_case, FormatGenerator, GenerateOptions, ValueKind};
use crate::types::{format_number, FlatTokens, Format};

pub struct SwiftGenerator;

impl FormatGenerator for SwiftGenerator {
    fn format(&self) -> Format {
        Format::Swift
    }

    fn generate(&self, tokens: &FlatTokens, options: &GenerateOptions) -> String {
        let lines: Vec<String> = tokens
            .iter()
            .map(|(name, value)| {
                let (ty, literal) = match ValueKind::of(value) {
                    ValueKind::Color(hex) => {
                        ("Color", format!("Color(hex: \"{}\")", hex.to_lowercase()))
                    }
                    ValueKind::Number(n) => ("CGFloat", format_number(n)),
                    ValueKind::Text(text) => ("String", quote(text, false)),
                };
                format!("    static let {}: {} = {}", to_camel_case(name), ty, literal)
            })
            .collect();

        format!(
            "import SwiftUI\n\nstruct {} {{\n{}\n}}",
            options.type_name,
            lines.join("\n")
        )
    }
}
