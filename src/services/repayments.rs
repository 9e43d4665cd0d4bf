//! Services behind the pending repayments page.

use crate::backend::{RepaymentReader, RepaymentWriter};
use crate::dto::repayments::{PendingRepaymentRow, PendingRepaymentsPageData};
use crate::forms::repayments::{ResolveRepaymentForm, ResolveRepaymentPayload};
use crate::pagination::Paginated;
use crate::services::ServiceResult;

/// Shown when the backend gives no reason for a failed resolution.
pub const RESOLVE_FAILED: &str = "Failed to resolve repayment.";

/// Loads one page of pending repayments and filters it by payer name.
///
/// The filter only applies to the fetched page; rows without a payer name
/// are never listed.
pub async fn load_pending_page<R>(
    repo: &R,
    page: Option<usize>,
    search: Option<String>,
) -> ServiceResult<PendingRepaymentsPageData>
where
    R: RepaymentReader + ?Sized,
{
    let page = page.unwrap_or(1).max(1);
    let search_query = search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let envelope = repo.list_pending_repayments(page).await.map_err(|err| {
        log::error!("Failed to fetch pending repayments: {err}");
        err
    })?;

    let term = search_query.as_deref().unwrap_or_default();
    let rows = envelope
        .data
        .into_iter()
        .filter(|repayment| repayment.matches_payer(term))
        .map(PendingRepaymentRow::from)
        .collect();

    Ok(PendingRepaymentsPageData {
        repayments: Paginated::new(rows, page, envelope.meta.total_pages),
        search_query,
    })
}

/// Matches a pending repayment to the loan typed in by staff.
///
/// Returns the confirmation message reported by the backend.
pub async fn resolve_repayment<R>(repo: &R, form: &ResolveRepaymentForm) -> ServiceResult<String>
where
    R: RepaymentWriter + ?Sized,
{
    let payload = ResolveRepaymentPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate resolve form: {err}");
        err
    })?;

    let message = repo
        .resolve_repayment(payload.loan_id, payload.repayment_id)
        .await
        .map_err(|err| {
            log::error!(
                "Failed to resolve repayment {} for loan {}: {err}",
                payload.repayment_id,
                payload.loan_id
            );
            err
        })?;

    Ok(message)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use async_trait::async_trait;

    use super::*;
    use crate::backend::errors::{BackendError, BackendResult};
    use crate::domain::repayment::PendingRepayment;
    use crate::domain::types::{LoanId, RepaymentId};
    use crate::domain::{PageEnvelope, PageMeta};
    use crate::services::ServiceError;

    #[derive(Default)]
    struct FakeRepayments {
        rows: Vec<PendingRepayment>,
        resolved: Cell<Option<(LoanId, RepaymentId)>>,
    }

    #[async_trait(?Send)]
    impl RepaymentReader for FakeRepayments {
        async fn list_pending_repayments(
            &self,
            _page: usize,
        ) -> BackendResult<PageEnvelope<PendingRepayment>> {
            Ok(PageEnvelope {
                data: self.rows.clone(),
                meta: PageMeta { total_pages: 2 },
            })
        }
    }

    #[async_trait(?Send)]
    impl RepaymentWriter for FakeRepayments {
        async fn resolve_repayment(
            &self,
            loan_id: LoanId,
            repayment_id: RepaymentId,
        ) -> BackendResult<String> {
            if loan_id.get() == 404 {
                return Err(BackendError::from_response(
                    reqwest::StatusCode::NOT_FOUND,
                    r#"{"error": "Loan not found"}"#,
                ));
            }
            self.resolved.set(Some((loan_id, repayment_id)));
            Ok("Payment resolved successfully".to_string())
        }
    }

    fn row(id: i64, name: Option<&str>) -> PendingRepayment {
        PendingRepayment {
            id,
            amount: 1500.0,
            payment_name: name.map(str::to_string),
            created_at: "2026-10-19T08:15:42.000Z".to_string(),
            ..PendingRepayment::default()
        }
    }

    fn fake() -> FakeRepayments {
        FakeRepayments {
            rows: vec![
                row(1, Some("JANE WANJIRU")),
                row(2, Some("Peter Kamau")),
                row(3, None),
            ],
            ..FakeRepayments::default()
        }
    }

    fn resolve_form(loan_id: &str) -> ResolveRepaymentForm {
        ResolveRepaymentForm {
            payment_id: 2,
            loan_id: loan_id.to_string(),
            page: None,
            search: None,
        }
    }

    #[actix_web::test]
    async fn search_filters_by_payer_name() {
        let data = load_pending_page(&fake(), Some(1), Some("  jane ".to_string()))
            .await
            .unwrap();

        assert_eq!(data.search_query.as_deref(), Some("jane"));
        assert_eq!(data.repayments.items.len(), 1);
        assert_eq!(data.repayments.items[0].id, 1);
        assert_eq!(data.repayments.items[0].date, "2026-10-19");
        assert_eq!(data.repayments.items[0].time, "08:15:42");
    }

    #[actix_web::test]
    async fn empty_search_drops_only_nameless_rows() {
        let data = load_pending_page(&fake(), None, Some(String::new()))
            .await
            .unwrap();

        assert_eq!(data.search_query, None);
        let ids: Vec<_> = data.repayments.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(data.repayments.next_page, Some(2));
    }

    #[actix_web::test]
    async fn resolve_returns_backend_message() {
        let repo = fake();

        let message = resolve_repayment(&repo, &resolve_form("77")).await.unwrap();

        assert_eq!(message, "Payment resolved successfully");
        let (loan_id, repayment_id) = repo.resolved.get().unwrap();
        assert_eq!(loan_id.get(), 77);
        assert_eq!(repayment_id.get(), 2);
    }

    #[actix_web::test]
    async fn resolve_reports_backend_error() {
        let err = resolve_repayment(&fake(), &resolve_form("404"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(RESOLVE_FAILED), "Loan not found");
    }

    #[actix_web::test]
    async fn resolve_rejects_invalid_loan_id() {
        let repo = fake();

        let result = resolve_repayment(&repo, &resolve_form("-3")).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(repo.resolved.get().is_none());
    }
}
