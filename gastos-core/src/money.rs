//! Brazilian Real display helpers.
//!
//! Amounts render with `,` grouping thousands and `.` before the cents,
//! e.g. `R$ 1,200.00`. This is the one display format the dashboard uses.

/// Currency marker shown before amounts
pub const CURRENCY_PREFIX: &str = "R$";

/// Format with thousands separators and two decimals: `1234.5` -> `1,234.50`
pub fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}

/// Format as a currency amount: `1200.0` -> `R$ 1,200.00`
pub fn format_brl(value: f64) -> String {
    format!("{} {}", CURRENCY_PREFIX, format_thousands(value))
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
