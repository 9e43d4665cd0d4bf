use actix_web::{Responder, post, web};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::backend::HttpBackend;
use crate::dto::customer::DetailTab;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::render_template;
use crate::services::customer::load_customer_modal;

#[derive(Deserialize)]
pub struct CustomerModalQuery {
    customer_id: Option<String>,
    tab: Option<String>,
}

#[post("/customers/modal")]
pub async fn customer_modal(
    params: web::Query<CustomerModalQuery>,
    _user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let customer_id = params
        .customer_id
        .as_deref()
        .and_then(|id| id.trim().parse::<i64>().ok());
    let tab = params
        .tab
        .as_deref()
        .and_then(|tab| tab.parse::<DetailTab>().ok());

    let data = load_customer_modal(
        backend.get_ref(),
        customer_id,
        tab,
        &server_config.image_placeholder_url,
    )
    .await;

    let mut context = Context::new();
    context.insert("modal", &data);
    render_template(&tera, "customers/modal_body.html", &context)
}
