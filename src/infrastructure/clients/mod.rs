pub mod appointment_client;
pub mod user_client;

use anyhow::{Result, bail};
use cookie::Cookie;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::error;

pub(crate) const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// `Cookie` header value forwarding the caller's token to a sibling service.
pub(crate) fn access_token_cookie(access_token: &str) -> Result<String> {
    if access_token.trim().is_empty() {
        bail!("access token is empty");
    }
    Ok(Cookie::new(ACCESS_TOKEN_COOKIE, access_token.to_owned()).to_string())
}

/// Decodes a 2xx body; 404 becomes `Ok(None)`, anything else an error.
pub(crate) async fn read_optional_json<T>(
    resp: reqwest::Response,
    context: &str,
) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };
        error!(
            status = %status,
            response_body = %body,
            context = %context,
            "sibling service request failed"
        );
        bail!("{context} failed with status {status}");
    }

    Ok(Some(resp.json::<T>().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_carries_the_token() {
        assert_eq!(access_token_cookie("abc.def").unwrap(), "access_token=abc.def");
        assert!(access_token_cookie(" ").is_err());
    }
}
