//! `reqwest` implementation of the backend traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::backend::errors::{BackendError, BackendResult};
use crate::backend::{
    CustomerReader, LoanListQuery, LoanReader, LoanWriter, RepaymentReader, RepaymentWriter,
};
use crate::domain::PageEnvelope;
use crate::domain::customer::CustomerDetails;
use crate::domain::loan::{DefaultedLoan, DueLoan};
use crate::domain::repayment::PendingRepayment;
use crate::domain::types::{CustomerId, LoanId, Principal, RepaymentId};

/// HTTP client for the loan backend rooted at `api_url`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    api_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(api_url: &str, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::InvalidRequest(format!("Failed to build client: {e}")))?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> BackendResult<Response> {
        let response = request.send().await.map_err(|e| {
            log::error!("Backend request failed: {e}");
            BackendError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = BackendError::from_response(status, &body);
        log::error!("Backend responded with an error: {err}");
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> BackendResult<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            log::error!("Failed to decode backend response: {e}");
            BackendError::from(e)
        })
    }

    fn loan_list_request(&self, path: &str, query: &LoanListQuery) -> RequestBuilder {
        let page = query.page.to_string();
        self.client.get(self.url(path)).query(&[
            ("role", query.role.as_str()),
            ("officerId", query.officer_id.as_str()),
            ("page", page.as_str()),
        ])
    }
}

#[async_trait(?Send)]
impl CustomerReader for HttpBackend {
    async fn get_customer_details(&self, id: CustomerId) -> BackendResult<CustomerDetails> {
        log::debug!("Fetching customer details for {id}");
        self.get_json(self.client.get(self.url(&format!("/api/customerNew/{id}"))))
            .await
    }
}

#[async_trait(?Send)]
impl LoanReader for HttpBackend {
    async fn list_defaulted_loans(
        &self,
        query: LoanListQuery,
    ) -> BackendResult<PageEnvelope<DefaultedLoan>> {
        log::debug!("Fetching defaulted loans: {query:?}");
        self.get_json(self.loan_list_request("/api/loans/loan-details/defaulted", &query))
            .await
    }

    async fn list_due_loans(&self, query: LoanListQuery) -> BackendResult<PageEnvelope<DueLoan>> {
        log::debug!("Fetching loans due today: {query:?}");
        self.get_json(self.loan_list_request("/api/loans/loan-details/due-today", &query))
            .await
    }
}

#[async_trait(?Send)]
impl LoanWriter for HttpBackend {
    async fn rollover_loan(
        &self,
        loan_id: LoanId,
        principal: Principal,
        token: &str,
    ) -> BackendResult<()> {
        log::debug!("Rolling over loan {loan_id} with principal {principal}");
        let request = self
            .client
            .post(self.url(&format!("/api/loans/roll-over/{loan_id}")))
            .bearer_auth(token)
            .json(&json!({ "principal": principal.get() }));
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl RepaymentReader for HttpBackend {
    async fn list_pending_repayments(
        &self,
        page: usize,
    ) -> BackendResult<PageEnvelope<PendingRepayment>> {
        log::debug!("Fetching pending repayments, page {page}");
        let request = self
            .client
            .get(self.url("/api/repayments/pending"))
            .query(&[("page", page.max(1))]);
        self.get_json(request).await
    }
}

#[async_trait(?Send)]
impl RepaymentWriter for HttpBackend {
    async fn resolve_repayment(
        &self,
        loan_id: LoanId,
        repayment_id: RepaymentId,
    ) -> BackendResult<String> {
        log::debug!("Resolving repayment {repayment_id} against loan {loan_id}");
        let request = self
            .client
            .post(self.url("/api/repayments/resolve-payment"))
            .query(&[("loanId", loan_id.get()), ("paymentId", repayment_id.get())])
            .json(&json!({}));
        let response = self.send(request).await?;
        let body = response.text().await?;

        // The backend answers with either a JSON string or plain text.
        Ok(serde_json::from_str::<String>(&body).unwrap_or(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash_from_api_url() {
        let backend = HttpBackend::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.api_url(), "http://localhost:5000");
        assert_eq!(
            backend.url("/api/customerNew/4"),
            "http://localhost:5000/api/customerNew/4"
        );
    }

    #[test]
    fn loan_list_request_carries_officer_scope() {
        let backend = HttpBackend::new("http://localhost:5000", Duration::from_secs(5)).unwrap();
        let request = backend
            .loan_list_request(
                "/api/loans/loan-details/defaulted",
                &LoanListQuery::new("officer", "12").page(2),
            )
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "http://localhost:5000/api/loans/loan-details/defaulted?role=officer&officerId=12&page=2"
        );
    }
}
