//! Forms for pending repayment actions.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{LoanId, RepaymentId};
use crate::forms::FormError;

/// "Resolve payment" modal submission.
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveRepaymentForm {
    #[validate(range(min = 1))]
    pub payment_id: i64,
    /// Loan the payment belongs to, as typed by staff.
    #[validate(length(min = 1))]
    pub loan_id: String,
    /// Listing page to return to.
    #[serde(default)]
    pub page: Option<usize>,
    /// Search term to keep after returning.
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveRepaymentPayload {
    pub loan_id: LoanId,
    pub repayment_id: RepaymentId,
}

impl TryFrom<&ResolveRepaymentForm> for ResolveRepaymentPayload {
    type Error = FormError;

    fn try_from(form: &ResolveRepaymentForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let repayment_id =
            RepaymentId::new(form.payment_id).map_err(|_| FormError::InvalidRepaymentId)?;
        let loan_id = form
            .loan_id
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|id| LoanId::new(id).ok())
            .ok_or(FormError::InvalidLoanId)?;

        Ok(Self {
            loan_id,
            repayment_id,
        })
    }
}
