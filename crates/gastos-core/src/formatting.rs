//! pt-BR number and currency formatting for the presentation boundary.
//!
//! The core emits plain `f64` values; everything locale-shaped (grouping
//! dots, decimal comma, the `R$` prefix, signed deltas) lives here.

use crate::models::DeltaDirection;

/// Format a floating-point number in pt-BR style: `.` as the thousands
/// separator and `,` as the decimal mark.
///
/// # Examples
///
/// ```
/// use gastos_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1.234,5");
/// assert_eq!(format_number(1234567.0, 0), "1.234.567");
/// assert_eq!(format_number(0.0, 2), "0,00");
/// assert_eq!(format_number(-9876.5, 1), "-9.876,5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places.
    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let int_str = integer_part.to_string();
    let grouped = group_thousands(&int_str);

    let result = if decimals == 0 {
        grouped
    } else {
        // `frac_str` starts with "0.", e.g. "0.50". Keep only the digits.
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{},{}", grouped, &frac_str[2..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount in Brazilian reais with two decimal places.
///
/// # Examples
///
/// ```
/// use gastos_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56), "R$ 1.234,56");
/// assert_eq!(format_currency(0.0), "R$ 0,00");
/// assert_eq!(format_currency(-9.99), "R$ -9,99");
/// ```
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("R$ -{}", format_number(amount.abs(), 2))
    } else {
        format!("R$ {}", format_number(amount, 2))
    }
}

/// Format a delta against the mean as an explicitly signed amount.
///
/// The magnitude is always non-negative; the sign comes from the
/// direction indicator, matching how the metric widgets distinguish
/// above-mean from below-mean months.
///
/// # Examples
///
/// ```
/// use gastos_core::formatting::format_delta;
/// use gastos_core::models::DeltaDirection;
///
/// assert_eq!(format_delta(1234.5, DeltaDirection::AboveMean), "+R$ 1.234,50");
/// assert_eq!(format_delta(1234.5, DeltaDirection::BelowMean), "-R$ 1.234,50");
/// ```
pub fn format_delta(magnitude: f64, direction: DeltaDirection) -> String {
    let sign = match direction {
        DeltaDirection::AboveMean => '+',
        DeltaDirection::BelowMean => '-',
    };
    format!("{}R$ {}", sign, format_number(magnitude.abs(), 2))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert a `.` every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push('.');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
