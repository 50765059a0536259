//! Loose-to-typed value coercion
//!
//! Accessors resolve a raw tree node and then coerce it here. Every
//! conversion is fallible and quiet: a `None` means the caller falls back
//! to its default. Environment and flag overlays store plain strings, so
//! string-to-number, string-to-bool and string-to-duration conversions
//! carry most of the load.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::value::{Object, Value};

/// Fallible coercion from a tree node into a concrete type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => parse_bool(s),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(float_to_i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_i64))
            }
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().and_then(float_to_u64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_u64))
            }
            Value::Bool(b) => Some(u64::from(*b)),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        f64::from_value(value).map(|f| f as f32)
    }
}

macro_rules! narrow_int {
    ($($ty:ty => $wide:ty),* $(,)?) => {
        $(impl FromValue for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                <$wide>::from_value(value).and_then(|v| v.try_into().ok())
            }
        })*
    };
}

narrow_int! {
    i8 => i64, i16 => i64, i32 => i64, isize => i64,
    u8 => u64, u16 => u64, u32 => u64, usize => u64,
}

impl FromValue for Duration {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => parse_duration(s),
            // bare numbers are whole seconds
            Value::Number(n) => {
                let secs = n.as_f64()?;
                if secs.is_finite() && (0.0..=1.0e18).contains(&secs) {
                    Some(Duration::from_secs_f64(secs))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => parse_datetime(s),
            Value::Number(n) => DateTime::from_timestamp(n.as_i64()?, 0),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_value).collect()
    }
}

impl FromValue for Object {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

fn float_to_i64(f: f64) -> Option<i64> {
    if f.is_finite() && (i64::MIN as f64..=i64::MAX as f64).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

fn float_to_u64(f: f64) -> Option<u64> {
    if f.is_finite() && (0.0..=u64::MAX as f64).contains(&f) {
        Some(f as u64)
    } else {
        None
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

/// Parse a duration string such as `100s`, `2h`, `1h30m` or `250ms`.
///
/// Units: `ns`, `us`, `ms`, `s`, `m`, `h`. Segments concatenate and
/// fractions are allowed (`1.5h`). `"0"` alone is the zero duration.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    if s == "0" {
        return Some(Duration::ZERO);
    }
    if s.is_empty() {
        return None;
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        if num_end == 0 {
            return None;
        }
        let number: f64 = rest[..num_end].parse().ok()?;
        rest = &rest[num_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_end] {
            "ns" => 1.0e-9,
            "us" | "\u{b5}s" => 1.0e-6,
            "ms" => 1.0e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            _ => return None,
        };
        rest = &rest[unit_end..];

        let secs = number * scale;
        if !secs.is_finite() || secs > 1.0e18 {
            return None;
        }
        total = total.checked_add(Duration::from_secs_f64(secs))?;
    }
    Some(total)
}

/// Parse a datetime string: RFC 3339 first, then the common date and
/// date-time renderings TOML and plain configs produce.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bool_from_literals() {
        assert_eq!(bool::from_value(&json!(true)), Some(true));
        assert_eq!(bool::from_value(&json!("TRUE")), Some(true));
        assert_eq!(bool::from_value(&json!("t")), Some(true));
        assert_eq!(bool::from_value(&json!("0")), Some(false));
        assert_eq!(bool::from_value(&json!(0)), Some(false));
        assert_eq!(bool::from_value(&json!(3)), Some(true));
        assert_eq!(bool::from_value(&json!("maybe")), None);
    }

    #[test]
    fn test_int_from_string_and_float() {
        assert_eq!(i64::from_value(&json!("1000")), Some(1000));
        assert_eq!(i64::from_value(&json!(" 42 ")), Some(42));
        assert_eq!(i64::from_value(&json!(8.31)), Some(8));
        assert_eq!(i64::from_value(&json!("not a number")), None);
        assert_eq!(u32::from_value(&json!(70000)), Some(70000));
        assert_eq!(u8::from_value(&json!(300)), None);
        assert_eq!(u64::from_value(&json!(-1)), None);
    }

    #[test]
    fn test_string_from_scalars() {
        assert_eq!(String::from_value(&json!("x")), Some("x".to_string()));
        assert_eq!(String::from_value(&json!(12)), Some("12".to_string()));
        assert_eq!(String::from_value(&json!(true)), Some("true".to_string()));
        assert_eq!(String::from_value(&json!({"a": 1})), None);
    }

    #[test]
    fn test_duration_grammar() {
        assert_eq!(parse_duration("100s"), Some(Duration::from_secs(100)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1h30m"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
        assert_eq!(parse_duration("1.5h"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_duration("0"), Some(Duration::ZERO));
        assert_eq!(parse_duration("100"), None);
        assert_eq!(parse_duration("h"), None);
        assert_eq!(parse_duration("10x"), None);
    }

    #[test]
    fn test_duration_from_bare_number_is_seconds() {
        assert_eq!(
            Duration::from_value(&json!(90)),
            Some(Duration::from_secs(90))
        );
        assert_eq!(Duration::from_value(&json!(-5)), None);
    }

    #[test]
    fn test_datetime_formats() {
        let dt = parse_datetime("1979-05-27T07:32:00Z").unwrap();
        assert_eq!(dt.timestamp(), 296638320);
        assert!(parse_datetime("1979-05-27T07:32:00").is_some());
        assert!(parse_datetime("1979-05-27 07:32:00").is_some());
        assert!(parse_datetime("1979-05-27").is_some());
        assert!(parse_datetime("yesterday").is_none());
    }

    #[test]
    fn test_slices() {
        assert_eq!(
            Vec::<i64>::from_value(&json!([8001, 8001, 8002])),
            Some(vec![8001, 8001, 8002])
        );
        assert_eq!(
            Vec::<String>::from_value(&json!(["a", 1])),
            Some(vec!["a".to_string(), "1".to_string()])
        );
        assert_eq!(Vec::<i64>::from_value(&json!([1, "x"])), None);
        assert_eq!(Vec::<i64>::from_value(&json!("not a list")), None);
    }

    #[test]
    fn test_object() {
        let obj = Object::from_value(&json!({"a": 1})).unwrap();
        assert_eq!(obj.get("a").and_then(Value::as_i64), Some(1));
        assert_eq!(Object::from_value(&json!(5)), None);
    }
}
