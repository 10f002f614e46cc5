//! Centralized parsing and re-rendering of currency price strings.
//!
//! Prices live in the document as display strings (`"₹1,299"`), not numbers.
//! Bulk adjustment needs the numeric magnitude, so this module owns the one
//! convention: an optional non-digit currency prefix, then digits with
//! optional `,` thousands separators, whole currency units only.
//!
//! Rounding policy: adjusted values round to the nearest whole unit, halves
//! away from zero. Re-rendering preserves the original prefix and inserts
//! 3-digit grouping for values of 1000 and above.
//!
//! Strings with no digits, or with stray characters after the digits, are not
//! prices ("MRP", "on request") and are passed through adjustment untouched.

/// A price string split into its currency prefix and numeric magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPrice {
    /// Leading non-digit characters, preserved verbatim (e.g. `"₹"`).
    pub prefix: String,
    pub value: i64,
}

/// Parse a currency-formatted price string. `None` if the string does not
/// follow the prefix-then-digits convention.
pub fn parse(text: &str) -> Option<ParsedPrice> {
    let trimmed = text.trim();
    let digit_start = trimmed.find(|c: char| c.is_ascii_digit())?;
    let (prefix, rest) = trimmed.split_at(digit_start);

    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            // Thousands separator, dropped from the magnitude.
            ',' => {}
            _ => return None,
        }
    }
    let value = digits.parse().ok()?;
    Some(ParsedPrice {
        prefix: prefix.to_string(),
        value,
    })
}

/// Render a magnitude back into display form with the given prefix and
/// 3-digit grouping.
pub fn format(prefix: &str, value: i64) -> String {
    format!("{prefix}{}", group_thousands(value))
}

/// Apply a percentage change to a price string, preserving its formatting.
/// Non-price strings come back unchanged.
pub fn adjust(text: &str, percent: f64) -> String {
    match parse(text) {
        Some(parsed) => {
            let scaled = parsed.value as f64 * (1.0 + percent / 100.0);
            // Nearest whole unit, halves away from zero.
            let rounded = scaled.round() as i64;
            format(&parsed.prefix, rounded)
        }
        None => text.to_string(),
    }
}

fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_rupee_price() {
        let p = parse("₹149").unwrap();
        assert_eq!(p.prefix, "₹");
        assert_eq!(p.value, 149);
    }

    #[test]
    fn parses_thousands_separator() {
        let p = parse("₹1,299").unwrap();
        assert_eq!(p.value, 1299);
    }

    #[test]
    fn parses_bare_number_without_prefix() {
        let p = parse("450").unwrap();
        assert_eq!(p.prefix, "");
        assert_eq!(p.value, 450);
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(parse("MRP"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert_eq!(parse("₹100 only"), None);
    }

    #[test]
    fn format_groups_thousands() {
        assert_eq!(format("₹", 999), "₹999");
        assert_eq!(format("₹", 1000), "₹1,000");
        assert_eq!(format("₹", 1299), "₹1,299");
        assert_eq!(format("₹", 2160), "₹2,160");
        assert_eq!(format("₹", 1234567), "₹1,234,567");
    }

    #[test]
    fn adjust_increases_by_percent() {
        assert_eq!(adjust("₹100", 10.0), "₹110");
        assert_eq!(adjust("₹1,299", 10.0), "₹1,429");
    }

    #[test]
    fn adjust_decreases_by_percent() {
        assert_eq!(adjust("₹600", -50.0), "₹300");
    }

    #[test]
    fn adjust_zero_is_identity_for_well_formed_prices() {
        for text in ["₹149", "₹1,299", "₹2,160"] {
            assert_eq!(adjust(text, 0.0), text);
        }
    }

    #[test]
    fn adjust_rounds_to_nearest_whole_unit() {
        // 149 * 1.1 = 163.9 → 164; 99 * 1.03 = 101.97 → 102
        assert_eq!(adjust("₹149", 10.0), "₹164");
        assert_eq!(adjust("₹99", 3.0), "₹102");
    }

    #[test]
    fn adjust_leaves_non_prices_alone() {
        assert_eq!(adjust("MRP", 25.0), "MRP");
    }

    #[test]
    fn adjust_round_trips_within_one_unit() {
        // +p followed by the exact inverse percentage lands within a unit
        // of the original, for a spread of magnitudes.
        let p = 12.5_f64;
        let inverse = -p / (1.0 + p / 100.0);
        for original in [80_i64, 149, 600, 1299, 2160] {
            let up = adjust(&format("₹", original), p);
            let back = adjust(&up, inverse);
            let value = parse(&back).unwrap().value;
            assert!(
                (value - original).abs() <= 1,
                "{original} → {up} → {back}"
            );
        }
    }
}
