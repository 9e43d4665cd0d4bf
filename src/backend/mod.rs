//! Seam between the dashboard and the remote loan REST backend.
//!
//! Services only depend on the reader/writer traits below; [`HttpBackend`]
//! is the production implementation.

use async_trait::async_trait;

use crate::backend::errors::BackendResult;
use crate::domain::PageEnvelope;
use crate::domain::customer::CustomerDetails;
use crate::domain::loan::{DefaultedLoan, DueLoan};
use crate::domain::repayment::PendingRepayment;
use crate::domain::types::{CustomerId, LoanId, Principal, RepaymentId};

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::HttpBackend;

/// Filter for the officer-scoped loan listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanListQuery {
    pub role: String,
    pub officer_id: String,
    pub page: usize,
}

impl LoanListQuery {
    pub fn new(role: impl Into<String>, officer_id: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            officer_id: officer_id.into(),
            page: 1,
        }
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }
}

#[async_trait(?Send)]
pub trait CustomerReader {
    async fn get_customer_details(&self, id: CustomerId) -> BackendResult<CustomerDetails>;
}

#[async_trait(?Send)]
pub trait LoanReader {
    async fn list_defaulted_loans(
        &self,
        query: LoanListQuery,
    ) -> BackendResult<PageEnvelope<DefaultedLoan>>;
    async fn list_due_loans(&self, query: LoanListQuery) -> BackendResult<PageEnvelope<DueLoan>>;
}

#[async_trait(?Send)]
pub trait LoanWriter {
    /// Replaces the loan with a new one for `principal`. Requires a bearer token.
    async fn rollover_loan(
        &self,
        loan_id: LoanId,
        principal: Principal,
        token: &str,
    ) -> BackendResult<()>;
}

#[async_trait(?Send)]
pub trait RepaymentReader {
    async fn list_pending_repayments(
        &self,
        page: usize,
    ) -> BackendResult<PageEnvelope<PendingRepayment>>;
}

#[async_trait(?Send)]
pub trait RepaymentWriter {
    /// Matches a pending repayment to a loan, returning the backend's message.
    async fn resolve_repayment(
        &self,
        loan_id: LoanId,
        repayment_id: RepaymentId,
    ) -> BackendResult<String>;
}
