//! Derived valuation metrics.

/// Revenue-to-SDE multiplier rounded to one decimal place.
///
/// Returns `None` unless both inputs are present and `sde` is strictly
/// positive. Rounding is half away from zero (`6.85 -> 6.9`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn multiplier(revenue: Option<u64>, sde: Option<u64>) -> Option<f64> {
    let revenue = revenue? as f64;
    let sde = sde? as f64;
    if sde <= 0.0 {
        return None;
    }
    Some(round_tenths(revenue / sde))
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
