//! DTOs shaped for the loan tables.

use serde::Serialize;

use crate::domain::loan::{DefaultedLoan, DueLoan};
use crate::dto::format::{date_part, format_amount};
use crate::pagination::Paginated;

/// Row of the defaulted loans table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DefaultedLoanRow {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub customer_name: String,
    pub phone: String,
    /// `-` when the backend sends no principal.
    pub principal: String,
    pub total_amount: String,
    pub balance: String,
    pub expected_completion_date: Option<String>,
    pub default_date: Option<String>,
    pub days_overdue: i64,
    pub badge_class: &'static str,
}

impl From<DefaultedLoan> for DefaultedLoanRow {
    fn from(loan: DefaultedLoan) -> Self {
        let severity = loan.severity();
        let balance = loan.balance();
        Self {
            id: loan.id,
            customer_id: loan.customer_id.filter(|id| *id > 0),
            principal: loan
                .principal
                .map(format_amount)
                .unwrap_or_else(|| "-".to_string()),
            total_amount: format_amount(loan.total_amount),
            balance: format_amount(balance),
            expected_completion_date: loan
                .expected_completion_date
                .as_deref()
                .map(|d| date_part(d).to_string()),
            default_date: loan.default_date.as_deref().map(|d| date_part(d).to_string()),
            days_overdue: loan.days_overdue,
            badge_class: severity.badge_class(),
            customer_name: loan.customer_name,
            phone: loan.phone,
        }
    }
}

/// Row of the due-today table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DueLoanRow {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub customer_name: String,
    pub phone: String,
    pub principal: String,
    pub total_amount: String,
    pub balance: String,
    pub due_date: String,
}

impl From<DueLoan> for DueLoanRow {
    fn from(loan: DueLoan) -> Self {
        let balance = loan.balance();
        // The backend reports the due day as the expected completion date.
        let due_date = loan
            .expected_completion_date
            .as_deref()
            .unwrap_or(loan.due_date.as_str());
        Self {
            id: loan.id,
            customer_id: loan.customer_id.filter(|id| *id > 0),
            principal: format_amount(loan.principal),
            total_amount: format_amount(loan.total_amount),
            balance: format_amount(balance),
            due_date: date_part(due_date).to_string(),
            customer_name: loan.customer_name,
            phone: loan.phone,
        }
    }
}

/// Data required to render either loan table.
pub struct LoansPageData<T> {
    pub loans: Paginated<T>,
}
