//! Services behind the defaulted and due-today loan pages.

use crate::backend::{LoanListQuery, LoanReader, LoanWriter};
use crate::dto::loans::{DefaultedLoanRow, DueLoanRow, LoansPageData};
use crate::forms::loans::{RolloverForm, RolloverPayload};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::services::{ServiceError, ServiceResult};

/// Shown when the backend gives no reason for a failed rollover.
pub const ROLLOVER_FAILED: &str = "Failed to roll over loan.";

fn officer_query(user: &AuthenticatedUser, page: Option<usize>) -> LoanListQuery {
    LoanListQuery::new(user.role.as_str(), user.officer_id()).page(page.unwrap_or(1))
}

/// Loads one page of defaulted loans visible to the officer.
pub async fn load_defaulted_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: Option<usize>,
) -> ServiceResult<LoansPageData<DefaultedLoanRow>>
where
    R: LoanReader + ?Sized,
{
    let query = officer_query(user, page);
    let page = query.page;

    let envelope = repo.list_defaulted_loans(query).await.map_err(|err| {
        log::error!("Failed to fetch defaulted loans: {err}");
        err
    })?;

    let loans = Paginated::new(envelope.data, page, envelope.meta.total_pages)
        .map(DefaultedLoanRow::from);

    Ok(LoansPageData { loans })
}

/// Loads one page of loans falling due today.
pub async fn load_due_today_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: Option<usize>,
) -> ServiceResult<LoansPageData<DueLoanRow>>
where
    R: LoanReader + ?Sized,
{
    let query = officer_query(user, page);
    let page = query.page;

    let envelope = repo.list_due_loans(query).await.map_err(|err| {
        log::error!("Failed to fetch loans due today: {err}");
        err
    })?;

    let loans =
        Paginated::new(envelope.data, page, envelope.meta.total_pages).map(DueLoanRow::from);

    Ok(LoansPageData { loans })
}

/// Validates the rollover form and replaces the loan with a new principal.
pub async fn rollover_loan<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RolloverForm,
) -> ServiceResult<()>
where
    R: LoanWriter + ?Sized,
{
    let Some(token) = user.bearer_token() else {
        return Err(ServiceError::Unauthorized);
    };

    let payload = RolloverPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate rollover form: {err}");
        err
    })?;

    repo.rollover_loan(payload.loan_id, payload.principal, token)
        .await
        .map_err(|err| {
            log::error!("Failed to roll over loan {}: {err}", payload.loan_id);
            err
        })?;

    log::info!(
        "Loan {} rolled over by officer {}",
        payload.loan_id,
        user.officer_id()
    );

    Ok(())
}
