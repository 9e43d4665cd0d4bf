//! Mock backend implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::backend::errors::BackendResult;
use crate::backend::{
    CustomerReader, LoanListQuery, LoanReader, LoanWriter, RepaymentReader, RepaymentWriter,
};
use crate::domain::PageEnvelope;
use crate::domain::customer::CustomerDetails;
use crate::domain::loan::{DefaultedLoan, DueLoan};
use crate::domain::repayment::PendingRepayment;
use crate::domain::types::{CustomerId, LoanId, Principal, RepaymentId};

mock! {
    pub Backend {}

    #[async_trait(?Send)]
    impl CustomerReader for Backend {
        async fn get_customer_details(&self, id: CustomerId) -> BackendResult<CustomerDetails>;
    }

    #[async_trait(?Send)]
    impl LoanReader for Backend {
        async fn list_defaulted_loans(
            &self,
            query: LoanListQuery,
        ) -> BackendResult<PageEnvelope<DefaultedLoan>>;
        async fn list_due_loans(&self, query: LoanListQuery) -> BackendResult<PageEnvelope<DueLoan>>;
    }

    #[async_trait(?Send)]
    impl LoanWriter for Backend {
        async fn rollover_loan(
            &self,
            loan_id: LoanId,
            principal: Principal,
            token: &str,
        ) -> BackendResult<()>;
    }

    #[async_trait(?Send)]
    impl RepaymentReader for Backend {
        async fn list_pending_repayments(
            &self,
            page: usize,
        ) -> BackendResult<PageEnvelope<PendingRepayment>>;
    }

    #[async_trait(?Send)]
    impl RepaymentWriter for Backend {
        async fn resolve_repayment(
            &self,
            loan_id: LoanId,
            repayment_id: RepaymentId,
        ) -> BackendResult<String>;
    }
}
