//! Lenient deserializers for values that usually arrive through env vars.
//!
//! Figment parses env values eagerly, so `SMTP_PASS=123456` arrives as a
//! number and `SMTP_PORT=` arrives as an empty string.

use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Unsigned(n) => n.to_string(),
            Self::Signed(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// A text field that also accepts numbers and booleans.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(Scalar::into_text)
}

/// An optional port: a number, a numeric string, or blank for "unset".
pub fn port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Scalar>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = raw.into_text();
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<u16>()
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid port '{text}': {e}")))
}

/// A boolean that also accepts `"true"` / `"false"` in any case.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Bool(b) => Ok(b),
        other => Ok(other.into_text().trim().eq_ignore_ascii_case("true")),
    }
}
