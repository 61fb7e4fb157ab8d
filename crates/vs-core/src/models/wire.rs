//! Serde helpers for backend fields whose JSON type varies.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Int(n) => n.to_string(),
            Self::UInt(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
        }
    }
}

/// Backend ids arrive as integers; identities keep them as opaque strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntegerOrOther {
    Int(i64),
    Other(IgnoredAny),
}

/// Role ids that are not integers are treated as absent.
pub(crate) fn lenient_role_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let role_id = match IntegerOrOther::deserialize(deserializer)? {
        IntegerOrOther::Int(id) => Some(id),
        IntegerOrOther::Other(_) => None,
    };
    Ok(role_id)
}
