//! Serde helpers for saved encounters written by older front ends, which
//! stored form values as strings (`"num": "4"`) and nested the group lists
//! as JSON text.

use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

fn unsigned<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a non-negative integer, got {text:?}"))),
    }
}

pub(crate) fn u32_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = unsigned(deserializer)?;
    u32::try_from(n).map_err(|_| D::Error::custom(format!("{n} is out of range")))
}

pub(crate) fn u8_lenient<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let n = unsigned(deserializer)?;
    u8::try_from(n).map_err(|_| D::Error::custom(format!("{n} is out of range")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrText<T> {
    List(Vec<T>),
    Text(String),
}

pub(crate) fn list_or_embedded_json<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match ListOrText::<T>::deserialize(deserializer)? {
        ListOrText::List(items) => Ok(items),
        ListOrText::Text(text) => serde_json::from_str(&text).map_err(D::Error::custom),
    }
}
