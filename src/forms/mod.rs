//! Form definitions backing the dashboard routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod loans;
pub mod repayments;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid loan ID")]
    InvalidLoanId,

    #[error("Invalid repayment ID")]
    InvalidRepaymentId,

    #[error("Principal must be a number of at least 1")]
    InvalidPrincipal,
}

impl FormError {
    /// Short message for the staff flash, naming the offending fields.
    pub fn user_message(&self) -> String {
        match self {
            FormError::Validation(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|field| field.replace('_', " "))
                    .collect();
                fields.sort();
                if fields.is_empty() {
                    "Please check the form".to_string()
                } else {
                    format!("Please check: {}", fields.join(", "))
                }
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;
    use crate::forms::loans::RolloverForm;

    #[test]
    fn validation_message_names_fields_only() {
        let form = RolloverForm {
            loan_id: 0,
            principal: String::new(),
            return_to: None,
        };
        let err = FormError::from(form.validate().unwrap_err());

        assert_eq!(err.user_message(), "Please check: loan id, principal");
    }

    #[test]
    fn other_errors_use_their_text() {
        assert_eq!(
            FormError::InvalidPrincipal.user_message(),
            "Principal must be a number of at least 1"
        );
    }
}
