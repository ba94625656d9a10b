//! Name casing for generated identifiers.
//!
//! Flat token names are dashed paths (`colors-Primary`, `spacing-md`). Typed languages get
//! camelCase identifiers, stylesheets get kebab-case custom properties.

fn is_separator(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '_')
}

/// `spacing-md` -> `spacingMd`. Any separator is dropped and the following character
/// uppercased; a leading digit gets a `_` prefix so the result is a valid identifier.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for c in name.chars() {
        if is_separator(c) {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// `primaryColor` -> `primary-color`. A dash goes before every uppercase letter unless it
/// would start the name or double an existing dash; the result is lowercased.
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for c in name.chars() {
        if is_separator(c) {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }
        if c.is_uppercase() && !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
        out.extend(c.to_lowercase());
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("spacing-md"), "spacingMd");
        assert_eq!(to_camel_case("colors-primary-light"), "colorsPrimaryLight");
        assert_eq!(to_camel_case("colors-Primary"), "colorsPrimary");
        assert_eq!(to_camel_case("primaryColor"), "primaryColor");
        assert_eq!(to_camel_case("typography-HeadingH1-fontSize"), "typographyHeadingH1FontSize");
        assert_eq!(to_camel_case("brand color.500"), "brandColor500");
    }

    #[test]
    fn test_camel_case_leading_digit() {
        assert_eq!(to_camel_case("2xl"), "_2xl");
        assert_eq!(to_camel_case("-x"), "x");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(to_kebab_case("primaryColor"), "primary-color");
        assert_eq!(to_kebab_case("colors-Primary"), "colors-primary");
        assert_eq!(to_kebab_case("Primary"), "primary");
        assert_eq!(to_kebab_case("typography-HeadingH1-fontSize"), "typography-heading-h1-font-size");
        assert_eq!(to_kebab_case("spacing-md"), "spacing-md");
        assert_eq!(to_kebab_case("brand color"), "brand-color");
    }

    #[test]
    fn test_casing_is_stable_on_its_own_output() {
        for name in ["colors-Primary-light", "spacing-xxl", "effects-ShadowCard-offsetX"] {
            let camel = to_camel_case(name);
            assert_eq!(to_camel_case(&camel), camel);
            let kebab = to_kebab_case(name);
            assert_eq!(to_kebab_case(&kebab), kebab);
        }
    }
}
