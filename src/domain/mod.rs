//! Records exchanged with the loan backend.

use serde::{Deserialize, Deserializer, Serialize};

pub mod customer;
pub mod loan;
pub mod repayment;
pub mod types;

/// Envelope wrapping every paginated list returned by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageEnvelope<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct PageMeta {
    #[serde(rename = "totalPages", default)]
    pub total_pages: usize,
}

/// Deserializes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
