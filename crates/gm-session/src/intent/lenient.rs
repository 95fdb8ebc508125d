//! Forgiving field decoders for model-produced JSON.
//!
//! Every decoder accepts any JSON value and never fails: a value that
//! cannot be read as the wanted type becomes the field's empty value.

use gm_ledger::TargetClock;
use gm_mechanics::{Effect, Position};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Truthiness of a loosely typed flag.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "yes" | "y" | "+"
        ),
        _ => false,
    }
}

/// An integer from a number or a numeric string.
pub fn integer(value: &Value) -> Option<i32> {
    let f = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    // `as` truncates toward zero and saturates at the i32 bounds
    f.is_finite().then_some(f as i32)
}

/// Non-empty text; numbers are rendered.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(truthy(&Value::deserialize(d)?))
}

pub(crate) fn int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    Ok(integer(&Value::deserialize(d)?))
}

pub(crate) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(text(&Value::deserialize(d)?))
}

pub(crate) fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items.iter().filter_map(text).collect(),
        other => text(&other).into_iter().collect(),
    })
}

pub(crate) fn position<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Position>, D::Error> {
    Ok(text(&Value::deserialize(d)?).and_then(|s| Position::parse(&s)))
}

pub(crate) fn effect<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Effect>, D::Error> {
    Ok(text(&Value::deserialize(d)?).and_then(|s| Effect::parse(&s)))
}

/// `{"name": .., "segments": ..}` or a bare clock name.
pub(crate) fn target_clock<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<TargetClock>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Object(map) => map.get("name").and_then(text).map(|name| TargetClock {
            name,
            segments: map
                .get("segments")
                .and_then(integer)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| n > 0),
        }),
        other => text(&other).map(|name| TargetClock {
            name,
            segments: None,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthy_values() {
        for v in [json!(true), json!(1), json!(-2.5), json!("yes"), json!(" Y "), json!("+"), json!("TRUE")] {
            assert!(truthy(&v), "{v}");
        }
        for v in [json!(false), json!(0), json!("no"), json!(""), json!(null), json!([1])] {
            assert!(!truthy(&v), "{v}");
        }
    }

    #[test]
    fn integers() {
        assert_eq!(integer(&json!(3)), Some(3));
        assert_eq!(integer(&json!("2")), Some(2));
        assert_eq!(integer(&json!(" -1 ")), Some(-1));
        assert_eq!(integer(&json!(2.9)), Some(2));
        assert_eq!(integer(&json!("two")), None);
        assert_eq!(integer(&json!(null)), None);
    }

    #[test]
    fn text_values() {
        assert_eq!(text(&json!(" Anna ")), Some("Anna".to_string()));
        assert_eq!(text(&json!("   ")), None);
        assert_eq!(text(&json!(7)), Some("7".to_string()));
        assert_eq!(text(&json!(false)), None);
    }
}
