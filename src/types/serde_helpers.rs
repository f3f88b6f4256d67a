//! Custom serde helpers for YoBit's loosely typed JSON.
//!
//! YoBit encodes flags as `0`/`1` and sends identifiers and timestamps
//! sometimes as numbers and sometimes as strings, depending on the endpoint.

use serde::{Deserialize, Deserializer, de};

/// Deserialize a `0`/`1` integer flag as `bool`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use yobit_api_client::types::serde_helpers::bool_from_int;
///
/// #[derive(Deserialize)]
/// struct Pair {
///     #[serde(deserialize_with = "bool_from_int::deserialize")]
///     hidden: bool,
/// }
///
/// let pair: Pair = serde_json::from_str(r#"{"hidden":1}"#).unwrap();
/// assert!(pair.hidden);
/// ```
pub mod bool_from_int {
    use super::*;

    /// Deserialize `0` as `false` and any other integer as `true`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(u64::deserialize(deserializer)? != 0)
    }
}

/// Deserialize a `u64` sent either as a JSON number or as a decimal string.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use yobit_api_client::types::serde_helpers::u64_from_str_or_int;
///
/// #[derive(Deserialize)]
/// struct Order {
///     #[serde(deserialize_with = "u64_from_str_or_int::deserialize")]
///     timestamp_created: u64,
/// }
///
/// let a: Order = serde_json::from_str(r#"{"timestamp_created":"1418654530"}"#).unwrap();
/// let b: Order = serde_json::from_str(r#"{"timestamp_created":1418654530}"#).unwrap();
/// assert_eq!(a.timestamp_created, b.timestamp_created);
/// ```
pub mod u64_from_str_or_int {
    use super::*;

    /// Deserialize from a number or a numeric string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Going through `Value` keeps this working with `arbitrary_precision`.
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| de::Error::custom(format!("expected unsigned integer, got {n}"))),
            serde_json::Value::String(s) => s.trim().parse().map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "expected integer or numeric string, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Flags {
        #[serde(deserialize_with = "bool_from_int::deserialize")]
        flag: bool,
    }

    #[derive(Deserialize, Debug)]
    struct Id {
        #[serde(deserialize_with = "u64_from_str_or_int::deserialize")]
        id: u64,
    }

    #[test]
    fn test_bool_from_int() {
        let on: Flags = serde_json::from_str(r#"{"flag":1}"#).unwrap();
        let off: Flags = serde_json::from_str(r#"{"flag":0}"#).unwrap();
        assert!(on.flag);
        assert!(!off.flag);
    }

    #[test]
    fn test_u64_from_str_or_int() {
        let from_str: Id = serde_json::from_str(r#"{"id":"100025362"}"#).unwrap();
        let from_int: Id = serde_json::from_str(r#"{"id":100025362}"#).unwrap();
        assert_eq!(from_str.id, 100025362);
        assert_eq!(from_int.id, 100025362);
    }

    #[test]
    fn test_u64_from_str_or_int_rejects_garbage() {
        assert!(serde_json::from_str::<Id>(r#"{"id":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Id>(r#"{"id":-1}"#).is_err());
        assert!(serde_json::from_str::<Id>(r#"{"id":null}"#).is_err());
    }
}
