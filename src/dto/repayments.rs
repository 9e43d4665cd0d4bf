//! DTOs shaped for the pending repayments table.

use serde::Serialize;

use crate::domain::repayment::PendingRepayment;
use crate::dto::format::format_amount;
use crate::pagination::Paginated;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PendingRepaymentRow {
    pub id: i64,
    pub amount: String,
    pub mpesa_code: String,
    pub payment_name: String,
    pub date: String,
    pub time: String,
    /// Opens the customer modal when present.
    pub customer_id: Option<i64>,
    pub loan_id: Option<i64>,
}

impl From<PendingRepayment> for PendingRepaymentRow {
    fn from(repayment: PendingRepayment) -> Self {
        let (date, time) = repayment.created_date_and_time();
        let (date, time) = (date.to_string(), time.to_string());
        Self {
            id: repayment.id,
            amount: format_amount(repayment.amount),
            mpesa_code: repayment.mpesa_code,
            payment_name: repayment.payment_name.unwrap_or_default(),
            date,
            time,
            customer_id: repayment.customer_id.filter(|id| *id > 0),
            loan_id: repayment.loan_id,
        }
    }
}

/// Data required to render the pending repayments page.
pub struct PendingRepaymentsPageData {
    pub repayments: Paginated<PendingRepaymentRow>,
    /// Search term echoed back to the template when present.
    pub search_query: Option<String>,
}
