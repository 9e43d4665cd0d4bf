use actix_web::{HttpResponse, http::header};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;

pub mod customers;
pub mod loans;
pub mod main;
pub mod repayments;

/// Dashboard pages a form is allowed to send the browser back to.
const RETURN_PATHS: [&str; 3] = ["/loans/defaulted", "/loans/due-today", "/repayments/pending"];

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every full page: alerts, the current user and navigation.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Returns `candidate` when it points at a known dashboard page, otherwise
/// `default`. Only a numeric `page` query parameter may follow the path.
pub fn safe_return_to<'a>(candidate: Option<&'a str>, default: &'a str) -> &'a str {
    let Some(candidate) = candidate.map(str::trim) else {
        return default;
    };

    let (path, query) = match candidate.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (candidate, None),
    };

    if !RETURN_PATHS.contains(&path) {
        return default;
    }

    match query {
        None => candidate,
        Some(query) => match query.strip_prefix("page=") {
            Some(page) if !page.is_empty() && page.bytes().all(|b| b.is_ascii_digit()) => {
                candidate
            }
            _ => default,
        },
    }
}
