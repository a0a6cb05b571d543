//! Locale-aware number formatting
//!
//! Renders values with at most two significant digits and the grouping and
//! decimal separators of the locale's language.

/// Significant digits shown for converted quantities
pub const MAX_SIGNIFICANT_DIGITS: usize = 2;

const NARROW_NO_BREAK_SPACE: &str = "\u{202f}";

/// Separator conventions of a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    pub group: &'static str,
    pub decimal: &'static str,
    /// Integer digits required before grouping kicks in
    pub min_grouping_digits: usize,
}

impl Separators {
    const COMMA_POINT: Separators = Separators {
        group: ",",
        decimal: ".",
        min_grouping_digits: 4,
    };
    const POINT_COMMA: Separators = Separators {
        group: ".",
        decimal: ",",
        min_grouping_digits: 4,
    };
    const SPACE_COMMA: Separators = Separators {
        group: NARROW_NO_BREAK_SPACE,
        decimal: ",",
        min_grouping_digits: 4,
    };

    /// Separators for a BCP 47 style tag; unknown languages use `en`
    pub fn for_locale(locale: &str) -> Self {
        let mut subtags = locale.trim().split(['-', '_']);
        let language = subtags.next().unwrap_or_default().to_ascii_lowercase();
        let region = subtags.last().map(str::to_ascii_uppercase);

        match (language.as_str(), region.as_deref()) {
            ("de", Some("CH")) | ("it", Some("CH")) => Separators {
                group: "’",
                decimal: ".",
                min_grouping_digits: 4,
            },
            ("es", _) => Separators {
                min_grouping_digits: 5,
                ..Self::POINT_COMMA
            },
            ("pl", _) => Separators {
                min_grouping_digits: 5,
                ..Self::SPACE_COMMA
            },
            ("de" | "it" | "nl" | "pt" | "da" | "id" | "tr", _) => Self::POINT_COMMA,
            ("fr" | "sv" | "nb" | "no" | "fi" | "cs" | "ru", _) => Self::SPACE_COMMA,
            _ => Self::COMMA_POINT,
        }
    }
}

/// Decimal digits of `value` rounded to `digits` significant places
///
/// Rounds the shortest decimal representation half away from zero, so
/// `0.285` keeps its decimal tie. Returns the digits without trailing zeros
/// and the power of ten of the first digit. Zero and non-finite values have
/// no digits.
fn significant_digits(value: f64, digits: usize) -> Option<(Vec<u8>, i32)> {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return None;
    }

    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e')?;
    let mut exponent: i32 = exponent.parse().ok()?;
    let all: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let mut kept: Vec<u8> = all.iter().copied().take(digits).collect();
    kept.resize(digits, 0);

    if all.get(digits).is_some_and(|&next| next >= 5) {
        let mut position = digits;
        loop {
            if position == 0 {
                // 99 -> 100: one more leading digit
                kept.insert(0, 1);
                kept.truncate(digits);
                exponent += 1;
                break;
            }
            position -= 1;
            if kept[position] == 9 {
                kept[position] = 0;
            } else {
                kept[position] += 1;
                break;
            }
        }
    }

    while kept.len() > 1 && kept.last() == Some(&0) {
        kept.pop();
    }
    Some((kept, exponent))
}

/// Round to `digits` significant digits, half away from zero
pub fn round_significant(value: f64, digits: i32) -> f64 {
    let Ok(digits) = usize::try_from(digits) else {
        return value;
    };
    let Some((kept, exponent)) = significant_digits(value, digits) else {
        return value;
    };

    let mantissa: String = kept.iter().map(|d| char::from(b'0' + d)).collect();
    let shift = exponent - (kept.len() as i32 - 1);
    let magnitude = format!("{}e{}", mantissa, shift).parse::<f64>().unwrap_or(value.abs());
    magnitude.copysign(value)
}

/// Format a value for display in `locale` with at most two significant digits
pub fn format_value(value: f64, locale: &str) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let Some((kept, exponent)) = significant_digits(value, MAX_SIGNIFICANT_DIGITS) else {
        return "0".to_string();
    };
    let digits: String = kept.iter().map(|d| char::from(b'0' + d)).collect();

    let (integer, fraction) = if exponent >= 0 {
        let integer_len = exponent as usize + 1;
        if digits.len() > integer_len {
            let (integer, fraction) = digits.split_at(integer_len);
            (integer.to_string(), fraction.to_string())
        } else {
            (format!("{:0<width$}", digits, width = integer_len), String::new())
        }
    } else {
        let leading_zeros = (-exponent - 1) as usize;
        ("0".to_string(), format!("{}{}", "0".repeat(leading_zeros), digits))
    };

    let separators = Separators::for_locale(locale);
    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(&integer, &separators));
    if !fraction.is_empty() {
        out.push_str(separators.decimal);
        out.push_str(&fraction);
    }
    out
}

fn group_digits(integer: &str, separators: &Separators) -> String {
    if integer.len() < separators.min_grouping_digits {
        return integer.to_string();
    }

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 * 3);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push_str(separators.group);
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_significant_digits() {
        assert_eq!(format_value(35.27396, "en"), "35");
        assert_eq!(format_value(135.256, "en"), "140");
        assert_eq!(format_value(1.10231, "en"), "1.1");
        assert_eq!(format_value(0.333, "en"), "0.33");
        assert_eq!(format_value(0.25, "en"), "0.25");
        assert_eq!(format_value(2.25, "en"), "2.3");
    }

    #[test]
    fn test_drops_trailing_zeros() {
        assert_eq!(format_value(3.0, "en"), "3");
        assert_eq!(format_value(250.0, "en"), "250");
        assert_eq!(format_value(1.0, "de"), "1");
    }

    #[test]
    fn test_rounding_carries_into_next_magnitude() {
        assert_eq!(format_value(9.96, "en"), "10");
        assert_eq!(format_value(99.7, "en"), "100");
    }

    #[test]
    fn test_grouping_separators() {
        assert_eq!(format_value(1000.0, "en"), "1,000");
        assert_eq!(format_value(1234.0, "en"), "1,200");
        assert_eq!(format_value(1_000_000.0, "de"), "1.000.000");
        assert_eq!(format_value(25_000.0, "fr"), "25\u{202f}000");
        assert_eq!(format_value(1200.0, "de-CH"), "1’200");
    }

    #[test]
    fn test_spanish_skips_grouping_for_four_digits() {
        assert_eq!(format_value(1000.0, "es"), "1000");
        assert_eq!(format_value(12_000.0, "es"), "12.000");
    }

    #[test]
    fn test_decimal_separators() {
        assert_eq!(format_value(2.5, "de"), "2,5");
        assert_eq!(format_value(2.5, "fr-FR"), "2,5");
        assert_eq!(format_value(2.5, "en-GB"), "2.5");
        assert_eq!(format_value(2.5, "xx"), "2.5");
    }

    #[test]
    fn test_negative_zero_and_non_finite() {
        assert_eq!(format_value(-40.0, "en"), "-40");
        assert_eq!(format_value(-0.456, "de"), "-0,46");
        assert_eq!(format_value(0.0, "en"), "0");
        assert_eq!(format_value(f64::NAN, "en"), "NaN");
        assert_eq!(format_value(f64::INFINITY, "en"), "∞");
    }

    #[test]
    fn test_decimal_ties_round_away_from_zero() {
        assert_eq!(format_value(0.285, "en"), "0.29");
        assert_eq!(format_value(5.35e-6, "en"), "0.0000054");
        assert_eq!(format_value(-0.285, "de"), "-0,29");
        assert_eq!(format_value(0.125, "en"), "0.13");
    }

    #[test]
    fn test_subnormal_values_stay_finite() {
        let formatted = format_value(1e-320, "de");
        assert!(formatted.starts_with("0,0000"), "{formatted}");
        assert!(formatted.ends_with('1'), "{formatted}");
        assert_eq!(formatted.len(), "0,".len() + 320);

        assert_eq!(round_significant(1e-320, 2), 1e-320);
        assert_eq!(round_significant(f64::MIN_POSITIVE, 2), 2.2e-308);
    }

    #[test]
    fn test_large_values_keep_integer_digits() {
        assert_eq!(format_value(1.5e20, "en"), "150,000,000,000,000,000,000");
        assert_eq!(format_value(1e6, "en"), "1,000,000");
    }

    #[test]
    fn test_round_significant() {
        assert_eq!(round_significant(176.666, 2), 180.0);
        assert_eq!(round_significant(0.0, 2), 0.0);
        assert_eq!(round_significant(12345.0, 3), 12300.0);
        assert_eq!(round_significant(0.285, 2), 0.29);
        assert_eq!(round_significant(-9.96, 2), -10.0);
    }
}
