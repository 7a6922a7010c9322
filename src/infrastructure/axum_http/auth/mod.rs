use std::sync::Arc;

use axum::{
    Json, async_trait,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::{
    domain::value_objects::{caller::Caller, enums::roles::Role},
    infrastructure::{axum_http::error_responses::ErrorResponse, clients::ACCESS_TOKEN_COOKIE},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: String,
    pub role: String,
    pub exp: usize,
}

/// HS256 key shared with the service that issues access tokens.
pub struct JwtKeys {
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
    pub access_token: String,
}

impl AuthUser {
    pub fn caller(&self) -> Caller {
        Caller::new(self.user_id, self.role)
    }
}

#[derive(Debug)]
pub struct AuthError(String);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                code: StatusCode::UNAUTHORIZED.as_u16(),
                message: self.0,
            }),
        )
            .into_response()
    }
}

pub fn validate_access_token(token: &str, keys: &JwtKeys) -> Result<AccessClaims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<AccessClaims>(token, &keys.decoding, &validation).map_err(|err| {
        warn!(error = %err, "auth: access token rejected");
        AuthError("Invalid token".to_string())
    })?;

    Ok(token_data.claims)
}

fn token_from_parts(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(token) = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
    {
        return Some(token.to_string());
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let keys = parts
            .extensions
            .get::<Arc<JwtKeys>>()
            .cloned()
            .ok_or_else(|| AuthError("Authentication is not configured".to_string()))?;

        let access_token = token_from_parts(parts)
            .ok_or_else(|| AuthError("Missing or malformed JWT".to_string()))?;

        let claims = validate_access_token(&access_token, &keys)?;

        let user_id = Uuid::parse_str(&claims.user_id)
            .map_err(|_| AuthError("Invalid user ID in token".to_string()))?;

        Ok(AuthUser {
            user_id,
            role: Role::from_claim(&claims.role),
            access_token,
        })
    }
}

#[cfg(test)]
mod tests;
