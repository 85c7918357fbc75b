//! Lenient extraction of typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. A missing key
//! or a value of the wrong type yields the default, so `--params '{}'` is
//! always a valid configuration.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, accepting integers as well.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a non-negative integer from `params[name]`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    param_opt_usize(params, name).unwrap_or(default)
}

/// Extracts a non-negative integer from `params[name]`, or `None` if the key
/// is missing, `null`, or not a non-negative integer.
pub fn param_opt_usize(params: &Value, name: &str) -> Option<usize> {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
}

/// Extracts a `bool` from `params[name]`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}
