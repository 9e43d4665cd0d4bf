use serde::{Deserialize, Serialize};

use crate::domain::null_as_default;

/// Identity and profile fields of the customer that owns the application.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct CustomerProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub national_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub occupation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_income: f64,
    /// Passport photo URL.
    #[serde(default)]
    pub passport_photo: Option<String>,
    /// National ID photo URL.
    #[serde(default)]
    pub national_id_photo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub county: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub business_location: Option<String>,
    #[serde(default)]
    pub residence_details: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Referee {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationship: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id_number: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Collateral {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_details: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Guarantor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationship: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    /// The backend spells this key `bussiness_location`.
    #[serde(
        default,
        rename = "bussiness_location",
        alias = "business_location",
        deserialize_with = "null_as_default"
    )]
    pub business_location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub residence_details: String,
    #[serde(default)]
    pub pass_photo: Option<String>,
    #[serde(default)]
    pub id_photo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collaterals: Vec<Collateral>,
}

/// Customer application as returned by one read of the customer endpoint.
///
/// The aggregate is never edited locally: views are projected from it and a
/// fresh copy is fetched when a new one is needed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct CustomerDetails {
    pub customer: CustomerProfile,
    /// Customer-level collaterals. Present in the payload but not shown.
    #[serde(default, deserialize_with = "null_as_default")]
    pub collaterals: Vec<Collateral>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub referees: Vec<Referee>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub guarantors: Vec<Guarantor>,
}

/// Returns the trimmed reference when it points somewhere.
pub fn image_ref(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
}
