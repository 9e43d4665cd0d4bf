//! Page loaders and actions used by the routes.
//!
//! Services never touch Actix types so they can be exercised directly with
//! fake backends.

use thiserror::Error;

use crate::backend::errors::BackendError;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;

pub mod customer;
pub mod loans;
pub mod repayments;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Form(String),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.user_message())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl ServiceError {
    /// Message shown to staff, preferring what the backend reported.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Backend(err) => err.api_message().unwrap_or(fallback).to_string(),
            ServiceError::Form(message) => message.clone(),
            ServiceError::Unauthorized => "You are not authorized".to_string(),
            _ => fallback.to_string(),
        }
    }
}
