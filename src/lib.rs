//! Staff dashboard for a micro-lending back office.
//!
//! Lists defaulted and due loans, pending M-Pesa repayments and customer
//! details fetched from the loan REST backend.

pub mod backend;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod services;

#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod routes;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use std::time::Duration;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::backend::HttpBackend;
    use crate::middleware::RedirectUnauthorized;
    use crate::models::config::ServerConfig;
    use crate::routes::customers::customer_modal;
    use crate::routes::loans::{defaulted_loans, due_today_loans, rollover_loan};
    use crate::routes::main::{index, logout, not_assigned};
    use crate::routes::repayments::{pending_repayments, resolve_repayment};

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let backend = HttpBackend::new(
            &server_config.api_url,
            Duration::from_secs(server_config.request_timeout_secs),
        )
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;

        log::info!("Using loan backend at {}", backend.api_url());

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::from(server_config.secret.as_bytes());

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(index)
                        .service(not_assigned)
                        .service(defaulted_loans)
                        .service(due_today_loans)
                        .service(rollover_loan)
                        .service(pending_repayments)
                        .service(resolve_repayment)
                        .service(customer_modal)
                        .service(logout),
                )
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(backend.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
