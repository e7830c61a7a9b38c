//! Lenient readers for provider JSON.
//!
//! OpenWeather omits fields freely, so every value is read through a JSON
//! pointer and degrades to `None` / `""` instead of failing the whole response.

use serde_json::Value;

/// Finite number at `pointer`, or `None` when missing, non-numeric, NaN or infinite.
pub fn number_at(value: &Value, pointer: &str) -> Option<f64> {
    value
        .pointer(pointer)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

/// String at `pointer`, or `""` when missing or not a string.
pub fn text_at(value: &Value, pointer: &str) -> String {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Non-empty string at `pointer`.
pub fn non_empty_text_at(value: &Value, pointer: &str) -> Option<String> {
    Some(text_at(value, pointer)).filter(|s| !s.is_empty())
}

/// Round to the nearest integer with halves going toward +∞ (-2.5 → -2, 2.5 → 3).
///
/// `n - n.floor()` is exact, so values just below a half are never bumped up
/// the way `(n + 0.5).floor()` bumps `0.49999999999999994`.
pub fn round_half_up(n: f64) -> i64 {
    let floor = n.floor();
    if n - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}
