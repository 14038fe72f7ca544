//! Deterministic tag rule for establishment names.
//!
//! One hard-coded rule: ride-hailing charges get the `UBER` tag.

use gastos_core::UBER_TAG;

/// Tag for an establishment name, if any rule matches
pub fn derive_tag(establishment: &str) -> Option<&'static str> {
    if establishment.to_lowercase().contains("uber") {
        return Some(UBER_TAG);
    }
    None
}
