use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use reqwest::Url;
use serde::Deserialize;
use tera::Tera;

use crate::backend::HttpBackend;
use crate::forms::repayments::ResolveRepaymentForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};
use crate::services::repayments::{self as repayments_service, RESOLVE_FAILED};

const PENDING_PATH: &str = "/repayments/pending";

#[derive(Deserialize)]
pub struct PendingQuery {
    page: Option<usize>,
    search: Option<String>,
}

#[get("/repayments/pending")]
pub async fn pending_repayments(
    params: web::Query<PendingQuery>,
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let PendingQuery { page, search } = params.into_inner();
    let mut context = base_context(
        &flash_messages,
        &user,
        "pending",
        &server_config.auth_service_url,
    );

    match repayments_service::load_pending_page(backend.get_ref(), page, search.clone()).await {
        Ok(data) => {
            context.insert("repayments", &data.repayments);
            context.insert("search_query", &data.search_query);
        }
        Err(err) => {
            log::error!("Failed to load pending repayments: {err}");
            context.insert("search_query", &search);
            context.insert("error", &err.user_message("Failed to load pending repayments."));
        }
    }

    render_template(&tera, "repayments/pending.html", &context)
}

#[post("/repayments/resolve")]
pub async fn resolve_repayment(
    _user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<ResolveRepaymentForm>,
) -> impl Responder {
    match repayments_service::resolve_repayment(backend.get_ref(), &form).await {
        Ok(message) => {
            FlashMessage::success(message).send();
        }
        Err(err) => {
            log::error!("Failed to resolve repayment {}: {err}", form.payment_id);
            FlashMessage::error(format!("Error: {}", err.user_message(RESOLVE_FAILED))).send();
        }
    }

    redirect(&pending_location(form.page, form.search.as_deref()))
}

/// Pending list URL that keeps the page and search the form was posted from.
fn pending_location(page: Option<usize>, search: Option<&str>) -> String {
    let Ok(mut url) = Url::parse(&format!("http://localhost{PENDING_PATH}")) else {
        return PENDING_PATH.to_string();
    };

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("page", &page.unwrap_or(1).max(1).to_string());
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            pairs.append_pair("search", search);
        }
    }

    match url.query() {
        Some(query) => format!("{PENDING_PATH}?{query}"),
        None => PENDING_PATH.to_string(),
    }
}
