//! Serde helpers for response fields that may be absent or `null`.

use serde::{Deserialize, Deserializer};

/// Wrap a present field in `Some`, so with `#[serde(default)]` an absent
/// field stays `None` while an explicit `null` becomes `Some(None)`/`Some(Value::Null)`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
