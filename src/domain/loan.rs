use serde::{Deserialize, Serialize};

use crate::domain::null_as_default;

/// Loan that passed its due date without being repaid.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct DefaultedLoan {
    pub id: i64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub national_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub loan_product: String,
    #[serde(default)]
    pub principal: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_interest: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: f64,
    #[serde(default)]
    pub remaining_balance: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub due_date: String,
    #[serde(default)]
    pub expected_completion_date: Option<String>,
    #[serde(default)]
    pub default_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub days_overdue: i64,
}

/// Loan whose repayment falls due today.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct DueLoan {
    pub id: i64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub national_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub loan_product: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub principal: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_interest: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub due_date: String,
    #[serde(default)]
    pub expected_completion_date: Option<String>,
    #[serde(default)]
    pub remaining_balance: Option<f64>,
}

/// Badge level shown next to the days-overdue counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverdueSeverity {
    /// More than 30 days overdue.
    Critical,
    /// More than 7 days overdue.
    Warning,
    Notice,
}

impl OverdueSeverity {
    pub fn from_days(days_overdue: i64) -> Self {
        if days_overdue > 30 {
            Self::Critical
        } else if days_overdue > 7 {
            Self::Warning
        } else {
            Self::Notice
        }
    }

    /// Bootstrap badge class for the severity.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Critical => "text-bg-danger",
            Self::Warning => "text-bg-warning",
            Self::Notice => "text-bg-secondary",
        }
    }
}

/// Amount still owed: the remaining balance, or the total when the backend
/// reports none (or zero).
pub fn outstanding_balance(remaining_balance: Option<f64>, total_amount: f64) -> f64 {
    match remaining_balance {
        Some(balance) if balance != 0.0 => balance,
        _ => total_amount,
    }
}

impl DefaultedLoan {
    pub fn severity(&self) -> OverdueSeverity {
        OverdueSeverity::from_days(self.days_overdue)
    }

    pub fn balance(&self) -> f64 {
        outstanding_balance(self.remaining_balance, self.total_amount)
    }
}

impl DueLoan {
    pub fn balance(&self) -> f64 {
        outstanding_balance(self.remaining_balance, self.total_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_thresholds() {
        assert_eq!(OverdueSeverity::from_days(0), OverdueSeverity::Notice);
        assert_eq!(OverdueSeverity::from_days(7), OverdueSeverity::Notice);
        assert_eq!(OverdueSeverity::from_days(8), OverdueSeverity::Warning);
        assert_eq!(OverdueSeverity::from_days(30), OverdueSeverity::Warning);
        assert_eq!(OverdueSeverity::from_days(31), OverdueSeverity::Critical);
    }

    #[test]
    fn balance_falls_back_to_total_amount() {
        assert_eq!(outstanding_balance(Some(1200.0), 5000.0), 1200.0);
        assert_eq!(outstanding_balance(Some(0.0), 5000.0), 5000.0);
        assert_eq!(outstanding_balance(None, 5000.0), 5000.0);
    }

    #[test]
    fn defaulted_loan_tolerates_null_dates_and_principal() {
        let loan: DefaultedLoan = serde_json::from_str(
            r#"{"id": 3, "customer_name": "Amina", "principal": null, "total_amount": 6500,
                "remaining_balance": null, "due_date": "2026-09-01T00:00:00.000Z",
                "expected_completion_date": null, "default_date": null, "days_overdue": 12}"#,
        )
        .unwrap();

        assert_eq!(loan.principal, None);
        assert_eq!(loan.balance(), 6500.0);
        assert_eq!(loan.severity(), OverdueSeverity::Warning);
    }
}
