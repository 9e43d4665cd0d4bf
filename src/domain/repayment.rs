use serde::{Deserialize, Serialize};

use crate::domain::null_as_default;

/// M-Pesa payment received but not yet matched to a loan.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct PendingRepayment {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    /// Payer name as reported by M-Pesa.
    #[serde(default)]
    pub payment_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub due_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paid_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mpesa_code: String,
    /// ISO-8601 timestamp, e.g. `2026-10-19T08:15:42.000Z`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub loan_status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default)]
    pub loan_id: Option<i64>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub created_by: Option<i64>,
}

impl PendingRepayment {
    /// Case-insensitive match of the payer name against `term`.
    ///
    /// Rows without a payer name never match, even for an empty term.
    pub fn matches_payer(&self, term: &str) -> bool {
        match self.payment_name.as_deref() {
            Some(name) if !name.is_empty() => {
                name.to_lowercase().contains(&term.to_lowercase())
            }
            _ => false,
        }
    }

    /// Splits `created_at` into its date and whole-second time parts.
    pub fn created_date_and_time(&self) -> (&str, &str) {
        match self.created_at.split_once('T') {
            Some((date, rest)) => {
                let time = rest
                    .split(['.', 'Z', '+'])
                    .next()
                    .unwrap_or_default();
                (date, time)
            }
            None => (self.created_at.as_str(), ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repayment(name: Option<&str>, created_at: &str) -> PendingRepayment {
        PendingRepayment {
            id: 1,
            payment_name: name.map(str::to_string),
            created_at: created_at.to_string(),
            ..PendingRepayment::default()
        }
    }

    #[test]
    fn payer_search_is_case_insensitive_and_skips_nameless_rows() {
        let named = repayment(Some("JANE Wanjiru"), "");
        assert!(named.matches_payer("jane"));
        assert!(named.matches_payer(""));
        assert!(!named.matches_payer("peter"));

        assert!(!repayment(None, "").matches_payer(""));
        assert!(!repayment(Some(""), "").matches_payer(""));
    }

    #[test]
    fn splits_timestamp_into_date_and_time() {
        let r = repayment(None, "2026-10-19T08:15:42.123Z");
        assert_eq!(r.created_date_and_time(), ("2026-10-19", "08:15:42"));

        let r = repayment(None, "2026-10-19");
        assert_eq!(r.created_date_and_time(), ("2026-10-19", ""));
    }
}
