use super::*;
use axum::http::{HeaderValue, Request, header::COOKIE};
use jsonwebtoken::{EncodingKey, Header, encode};

const SECRET: &str = "supersecretjwtsecretforunittesting123";

fn token(user_id: &str, role: &str, exp: usize) -> String {
    let claims = AccessClaims {
        user_id: user_id.to_string(),
        role: role.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn parts_with(header: Option<(axum::http::HeaderName, String)>) -> Parts {
    let mut builder = Request::builder().uri("/api/payment/v1/info");
    if let Some((name, value)) = header {
        builder = builder.header(name, HeaderValue::from_str(&value).unwrap());
    }
    let (mut parts, _) = builder.body(()).unwrap().into_parts();
    parts
        .extensions
        .insert(Arc::new(JwtKeys::new(SECRET)));
    parts
}

#[test]
fn test_validate_access_token_success() {
    let user_id = "0192f1c4-2b1e-7c3a-9d4e-5f6a7b8c9d0e";
    let claims =
        validate_access_token(&token(user_id, "patient", 9999999999), &JwtKeys::new(SECRET))
            .expect("Valid token should pass");
    assert_eq!(claims.user_id, user_id);
    assert_eq!(claims.role, "patient");
}

#[test]
fn test_validate_access_token_expired() {
    let result = validate_access_token(
        &token("0192f1c4-2b1e-7c3a-9d4e-5f6a7b8c9d0e", "patient", 1),
        &JwtKeys::new(SECRET),
    );
    assert!(result.is_err());
}

#[test]
fn test_validate_access_token_wrong_secret() {
    let result = validate_access_token(
        &token("0192f1c4-2b1e-7c3a-9d4e-5f6a7b8c9d0e", "patient", 9999999999),
        &JwtKeys::new("another-secret"),
    );
    assert!(result.is_err());
}

#[tokio::test]
async fn extracts_user_from_access_token_cookie() {
    let user_id = "0192f1c4-2b1e-7c3a-9d4e-5f6a7b8c9d0e";
    let jwt = token(user_id, "doctor", 9999999999);
    let mut parts = parts_with(Some((COOKIE, format!("access_token={jwt}"))));

    let auth = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(auth.user_id.to_string(), user_id);
    assert_eq!(auth.role, Role::Doctor);
    assert_eq!(auth.access_token, jwt);
}

#[tokio::test]
async fn falls_back_to_bearer_header() {
    let jwt = token("0192f1c4-2b1e-7c3a-9d4e-5f6a7b8c9d0e", "nurse", 9999999999);
    let mut parts = parts_with(Some((AUTHORIZATION, format!("Bearer {jwt}"))));

    let auth = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(auth.role, Role::Unknown);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let mut parts = parts_with(None);

    let rejection = AuthUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();

    assert_eq!(
        rejection.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
}
