//! Numeric guards and display formatting.
//!
//! Benchmark uploads routinely omit fields or carry NaN/inf from failed
//! runs. Every value that reaches a derived record or the renderer passes
//! through one of these guards first, so downstream code never sees a
//! non-finite number.

/// `0.0` for missing or non-finite input, the value itself otherwise.
pub fn safe_number(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Finite-or-zero for values that are already plain `f64` (additive context).
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Finite-or-one for multiplicative ratios (speedups, efficiency factors).
pub fn finite_or_one(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        1.0
    }
}

/// Fixed-decimal rendering after the safe-number guard. No grouping.
pub fn format_fixed(value: Option<f64>, decimals: usize) -> String {
    format!("{:.*}", decimals, safe_number(value))
}

/// Compact rendering with K/M suffixes; small values fall back to
/// two-decimal fixed form.
pub fn format_compact(value: Option<f64>) -> String {
    let v = safe_number(value);
    if v >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else if v >= 1e3 {
        format!("{:.2}K", v / 1e3)
    } else {
        format_fixed(Some(v), 2)
    }
}
