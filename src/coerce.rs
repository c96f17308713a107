//! Conversion of resolved values into requested Rust types.

use crate::value::Value;
use tracing::debug;

/// Types a configuration value can be converted into.
///
/// Conversion is fallible and never panics; callers that want the zero value
/// on failure use [`coerce_or_default`].
pub trait FromValue: Sized {
    /// Name of the target type for error messages.
    const TARGET: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const TARGET: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    const TARGET: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Bool(_) | Value::Integer(_) | Value::Float(_) => Some(value.to_string()),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }
}

impl FromValue for bool {
    const TARGET: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Integer(i) => Some(*i != 0),
            Value::Float(x) => Some(*x != 0.0),
            Value::String(s) => parse_bool(s),
            _ => None,
        }
    }
}

/// Accepts the usual textual spellings, case-insensitively.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Float(x) => float_to_i64(*x),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_i64))
        }
        _ => None,
    }
}

fn float_to_i64(x: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if x.is_finite() && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Some(x.trunc() as i64)
    } else {
        None
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                const TARGET: &'static str = stringify!($ty);

                fn from_value(value: &Value) -> Option<Self> {
                    if let Value::String(s) = value {
                        // Unsigned values above i64::MAX only parse directly.
                        if let Ok(n) = s.trim().parse::<$ty>() {
                            return Some(n);
                        }
                    }
                    to_i64(value).and_then(|n| <$ty>::try_from(n).ok())
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    const TARGET: &'static str = "f64";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Integer(i) => Some(*i as f64),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    const TARGET: &'static str = "f32";

    fn from_value(value: &Value) -> Option<Self> {
        f64::from_value(value).map(|x| x as f32)
    }
}

/// Convert `value`, falling back to `T::default()` when it does not fit.
pub fn coerce_or_default<T: FromValue + Default>(value: &Value) -> T {
    T::from_value(value).unwrap_or_else(|| {
        debug!(
            found = value.type_name(),
            target = T::TARGET,
            "Coercion failed, using default"
        );
        T::default()
    })
}
