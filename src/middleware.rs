//! Sends staff without a valid session to the auth service sign-in page.

use std::future::{Ready, ready};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::{StatusCode, header};
use actix_web::{Error, HttpResponse, web};
use futures_util::future::LocalBoxFuture;

use crate::models::config::ServerConfig;

/// Rewrites `401 Unauthorized` responses into a `303` redirect to
/// `{auth_service_url}/auth/signin`.
pub struct RedirectUnauthorized;

impl<S, B> Transform<S, ServiceRequest> for RedirectUnauthorized
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RedirectUnauthorizedMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RedirectUnauthorizedMiddleware { service }))
    }
}

pub struct RedirectUnauthorizedMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RedirectUnauthorizedMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            if res.status() != StatusCode::UNAUTHORIZED {
                return Ok(res.map_into_left_body());
            }

            let location = signin_url(
                res.request()
                    .app_data::<web::Data<ServerConfig>>()
                    .map(|config| config.auth_service_url.as_str()),
            );
            let (req, _) = res.into_parts();
            let response = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location))
                .finish()
                .map_into_right_body();

            Ok(ServiceResponse::new(req, response))
        })
    }
}

fn signin_url(auth_service_url: Option<&str>) -> String {
    let base = auth_service_url.unwrap_or_default().trim_end_matches('/');
    format!("{base}/auth/signin")
}
