//! Forms for loan actions.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{LoanId, Principal};
use crate::forms::FormError;

/// Rollover modal submission.
#[derive(Debug, Deserialize, Validate)]
pub struct RolloverForm {
    /// Loan being rolled over.
    #[validate(range(min = 1))]
    pub loan_id: i64,
    /// New principal as typed into the number input.
    #[validate(length(min = 1))]
    pub principal: String,
    /// Page to return to after the action.
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Validated rollover request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloverPayload {
    pub loan_id: LoanId,
    pub principal: Principal,
}

impl TryFrom<RolloverForm> for RolloverPayload {
    type Error = FormError;

    fn try_from(form: RolloverForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let loan_id = LoanId::new(form.loan_id).map_err(|_| FormError::InvalidLoanId)?;
        let principal = form
            .principal
            .trim()
            .parse::<f64>()
            .map_err(|_| FormError::InvalidPrincipal)
            .and_then(|value| Principal::new(value).map_err(|_| FormError::InvalidPrincipal))?;

        Ok(Self { loan_id, principal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(loan_id: i64, principal: &str) -> RolloverForm {
        RolloverForm {
            loan_id,
            principal: principal.to_string(),
            return_to: None,
        }
    }

    #[test]
    fn accepts_positive_principal() {
        let payload = RolloverPayload::try_from(form(14, " 15000 ")).unwrap();
        assert_eq!(payload.loan_id.get(), 14);
        assert_eq!(payload.principal.get(), 15000.0);
    }

    #[test]
    fn rejects_empty_principal() {
        assert!(matches!(
            RolloverPayload::try_from(form(14, "")),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn rejects_principal_below_one_or_not_numeric() {
        assert!(matches!(
            RolloverPayload::try_from(form(14, "0")),
            Err(FormError::InvalidPrincipal)
        ));
        assert!(matches!(
            RolloverPayload::try_from(form(14, "ten")),
            Err(FormError::InvalidPrincipal)
        ));
    }

    #[test]
    fn rejects_missing_loan() {
        assert!(matches!(
            RolloverPayload::try_from(form(0, "500")),
            Err(FormError::Validation(_))
        ));
    }
}
