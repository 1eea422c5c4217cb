//! Authenticated user extracted from the auth service's bearer token.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims carried by the auth service token.
///
/// The raw token is kept so that backend calls can be made on behalf of the
/// user; it never reaches templates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Tenant the user belongs to. Absent for platform admins and patients.
    #[serde(default)]
    pub clinic_id: Option<i32>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: usize,
    #[serde(skip)]
    pub token: String,
}

impl AuthenticatedUser {
    /// Verifies an HS256 token with the shared secret.
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        let mut user = data.claims;
        user.token = token.to_string();
        Ok(user)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let config = req.app_data::<web::Data<ServerConfig>>().ok_or_else(|| {
        log::error!("Server configuration is not registered");
        ErrorInternalServerError("server misconfigured")
    })?;

    let token = bearer_token(req)
        .or_else(|| req.get_identity().ok().and_then(|identity| identity.id().ok()))
        .ok_or_else(|| ErrorUnauthorized("missing credentials"))?;

    AuthenticatedUser::from_token(&token, &config.secret).map_err(|err| {
        log::warn!("Rejected bearer token: {err}");
        ErrorUnauthorized("invalid credentials")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    fn claims(exp: usize) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "17".to_string(),
            email: "desk@clinic.test".to_string(),
            name: "Front Desk".to_string(),
            clinic_id: Some(4),
            roles: vec!["secretary".to_string()],
            exp,
            token: String::new(),
        }
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn decodes_token_and_keeps_raw_value() {
        let token = encode(
            &Header::default(),
            &claims(far_future()),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let user = AuthenticatedUser::from_token(&token, "secret").unwrap();

        assert_eq!(user.clinic_id, Some(4));
        assert!(user.has_role("secretary"));
        assert!(!user.has_role("doctor"));
        assert_eq!(user.token, token);
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let key = EncodingKey::from_secret(b"secret");
        let valid = encode(&Header::default(), &claims(far_future()), &key).unwrap();
        let expired = encode(&Header::default(), &claims(1_000), &key).unwrap();

        assert!(AuthenticatedUser::from_token(&valid, "other").is_err());
        assert!(AuthenticatedUser::from_token(&expired, "secret").is_err());
    }

    #[test]
    fn token_is_not_serialized() {
        let mut user = claims(far_future());
        user.token = "raw".to_string();

        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("token").is_none());
    }
}
