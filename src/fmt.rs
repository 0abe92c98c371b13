/// Shown instead of a figure that overflowed or is not a number.
pub const OUT_OF_RANGE: &str = "(out of range)";

/// Format a float as a currency amount with thousands separators: ₹1,234.56
pub fn money(val: f64, symbol: &str) -> String {
    if !val.is_finite() {
        return OUT_OF_RANGE.to_string();
    }
    let negative = val < 0.0;
    let abs = val.abs();
    let cents = format!("{:.2}", abs);
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((&cents, "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    // -0.00 should not print a sign
    if negative && cents != "0.00" {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Percentage with one decimal: 20.0%
pub fn pct(val: f64) -> String {
    if !val.is_finite() {
        return OUT_OF_RANGE.to_string();
    }
    format!("{val:.1}%")
}
