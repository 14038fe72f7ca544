//! pt-BR amount normalization.
//!
//! Statement amounts look like `1.234,56` or `R$ 50,00`: `.` groups
//! thousands and `,` marks the cents.

/// Normalize a pt-BR amount and parse it.
///
/// Steps, in order: drop every `.`, turn every `,` into `.`, drop every
/// `R$`, trim, parse. Returns `None` for empty or non-numeric text.
pub fn normalize_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('.', "").replace(',', ".").replace("R$", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
