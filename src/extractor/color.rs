//! Hex encoding of normalized RGB channels.

/// Quantize a channel in [0,1] to 8 bits. Out-of-range input is clamped.
fn quantize(channel: f64) -> u8 {
    if channel.is_nan() {
        return 0;
    }
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `#rrggbb`, lowercase, from channels in [0,1]
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    format!("#{:02x}{:02x}{:02x}", quantize(r), quantize(g), quantize(b))
}

/// Parse `#rrggbb` (any case) back into 8-bit channels.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(1.0, 1.0, 1.0), "#ffffff");
        assert_eq!(rgb_to_hex(0.0, 0.0, 0.0), "#000000");
        assert_eq!(rgb_to_hex(0.0, 122.0 / 255.0, 1.0), "#007aff");
        // Single-digit channels are zero padded
        assert_eq!(rgb_to_hex(1.0 / 255.0, 0.0, 15.0 / 255.0), "#01000f");
    }

    #[test]
    fn test_rgb_to_hex_clamps() {
        assert_eq!(rgb_to_hex(1.5, -0.2, f64::NAN), "#ff0000");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#007AFF"), Some([0, 122, 255]));
        assert_eq!(parse_hex("#007aff"), Some([0, 122, 255]));
        assert_eq!(parse_hex("007aff"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gggggg"), None);
    }

    #[test]
    fn test_hex_round_trip_on_quantized_channels() {
        for r in (0u16..=255).step_by(15) {
            for g in (0u16..=255).step_by(51) {
                for b in [0u16, 1, 127, 128, 254, 255] {
                    let hex = rgb_to_hex(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
                    assert_eq!(parse_hex(&hex), Some([r as u8, g as u8, b as u8]), "{}", hex);
                }
            }
        }
    }
}
