//! Tolerant deserialisation for task identifiers.
//!
//! External agents routinely emit `"id": 1` (a JSON number) where the
//! schema calls for a string. We accept the schema-conformant string form
//! first and fall back to coercing a bare number into its decimal string
//! representation. Any other shape (bool, null, array, object) is a hard
//! error — numeric-id coercion is a deliberate, narrow tolerance, not a
//! general "accept anything" deserialiser.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct TaskIdVisitor;

impl<'de> Visitor<'de> for TaskIdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a string or a number")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v.to_string())
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v.to_string())
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v.to_string())
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        // Minimal float representation: drop a trailing ".0" for whole
        // numbers, otherwise use the shortest round-tripping form serde_json
        // would itself produce.
        if v.fract() == 0.0 && v.abs() < 1e15 {
            Ok(format!("{}", v as i64))
        } else {
            Ok(format!("{v}"))
        }
    }
}

/// Use as `#[serde(deserialize_with = "deserialize_task_id")]` on a
/// `String` field that must tolerate numeric input.
pub fn deserialize_task_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TaskIdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "deserialize_task_id")]
        id: String,
    }

    #[test]
    fn accepts_string() {
        let w: Wrapper = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(w.id, "abc");
    }

    #[test]
    fn coerces_integer() {
        let w: Wrapper = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(w.id, "1");
    }

    #[test]
    fn coerces_fractional() {
        let w: Wrapper = serde_json::from_str(r#"{"id":1.5}"#).unwrap();
        assert_eq!(w.id, "1.5");
    }

    #[test]
    fn rejects_bool() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"id":true}"#);
        assert!(result.is_err());
    }
}
