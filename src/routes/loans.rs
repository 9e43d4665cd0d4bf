use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::backend::HttpBackend;
use crate::forms::loans::RolloverForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template, safe_return_to};
use crate::services::loans::{self as loans_service, ROLLOVER_FAILED};
use crate::services::ServiceError;

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<usize>,
}

#[get("/loans/defaulted")]
pub async fn defaulted_loans(
    params: web::Query<PageQuery>,
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "defaulted",
        &server_config.auth_service_url,
    );

    match loans_service::load_defaulted_page(backend.get_ref(), &user, params.page).await {
        Ok(data) => context.insert("loans", &data.loans),
        Err(err) => context.insert("error", &list_error(err)),
    }

    render_template(&tera, "loans/defaulted.html", &context)
}

#[get("/loans/due-today")]
pub async fn due_today_loans(
    params: web::Query<PageQuery>,
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "due_today",
        &server_config.auth_service_url,
    );

    match loans_service::load_due_today_page(backend.get_ref(), &user, params.page).await {
        Ok(data) => context.insert("loans", &data.loans),
        Err(err) => context.insert("error", &list_error(err)),
    }

    render_template(&tera, "loans/due_today.html", &context)
}

#[post("/loans/rollover")]
pub async fn rollover_loan(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<RolloverForm>,
) -> impl Responder {
    let return_to = safe_return_to(form.return_to.as_deref(), "/loans/defaulted").to_string();

    match loans_service::rollover_loan(backend.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Loan rolled over successfully").send();
            redirect(&return_to)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You are not authorized").send();
            redirect(&return_to)
        }
        Err(err) => {
            log::error!("Failed to roll over the loan: {err}");
            FlashMessage::error(err.user_message(ROLLOVER_FAILED)).send();
            redirect(&return_to)
        }
    }
}

fn list_error(err: ServiceError) -> String {
    log::error!("Failed to load loans: {err}");
    err.user_message("Failed to load loans.")
}
