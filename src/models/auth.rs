//! Staff identity carried by the session cookie.
//!
//! The auth service stores the backend-issued JWT as the session identity.
//! Its claims name the staff member, role and officer id; the raw token is
//! forwarded to the backend for calls that require a bearer token.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct AuthenticatedUser {
    /// Officer id used to scope loan listings.
    pub sub: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub exp: usize,
    /// Raw JWT the claims were decoded from.
    #[serde(skip)]
    pub token: String,
}

impl AuthenticatedUser {
    pub fn officer_id(&self) -> &str {
        &self.sub
    }

    pub fn bearer_token(&self) -> Option<&str> {
        Some(self.token.as_str()).filter(|token| !token.is_empty())
    }
}

#[cfg(feature = "server")]
mod extractor {
    use std::future::{Ready, ready};

    use actix_identity::IdentityExt;
    use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, error, web};
    use jsonwebtoken::{DecodingKey, Validation, decode};

    use super::AuthenticatedUser;
    use crate::models::config::ServerConfig;

    impl AuthenticatedUser {
        /// Decodes and verifies the session token with the shared secret.
        pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
            let data = decode::<AuthenticatedUser>(
                token,
                &DecodingKey::from_secret(secret.as_bytes()),
                &Validation::default(),
            )?;
            let mut user = data.claims;
            user.token = token.to_string();
            Ok(user)
        }
    }

    impl FromRequest for AuthenticatedUser {
        type Error = Error;
        type Future = Ready<Result<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
            let identity = match req.get_identity().and_then(|identity| identity.id()) {
                Ok(token) => token,
                Err(_) => return ready(Err(error::ErrorUnauthorized("Unauthorized"))),
            };

            let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
                log::error!("Server config is not registered");
                return ready(Err(error::ErrorInternalServerError("Misconfigured")));
            };

            match AuthenticatedUser::from_token(&identity, &config.secret) {
                Ok(user) => ready(Ok(user)),
                Err(err) => {
                    log::error!("Failed to decode session token: {err}");
                    ready(Err(error::ErrorUnauthorized("Unauthorized")))
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use jsonwebtoken::{EncodingKey, Header, encode};

        use super::*;

        #[test]
        fn decodes_claims_and_keeps_raw_token() {
            let claims = AuthenticatedUser {
                sub: "12".to_string(),
                name: "Grace".to_string(),
                role: "officer".to_string(),
                exp: 4_102_444_800,
                token: String::new(),
            };
            let token = encode(
                &Header::default(),
                &claims,
                &EncodingKey::from_secret(b"secret"),
            )
            .unwrap();

            let user = AuthenticatedUser::from_token(&token, "secret").unwrap();

            assert_eq!(user.officer_id(), "12");
            assert_eq!(user.role, "officer");
            assert_eq!(user.bearer_token(), Some(token.as_str()));
            assert!(AuthenticatedUser::from_token(&token, "other").is_err());
        }
    }
}
