use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::application::errors::PaymentError;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            // Causes are logged where they happen and never leave the service.
            PaymentError::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode};

    async fn body_of(err: PaymentError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_message_reaches_the_client() {
        let (status, body) =
            body_of(PaymentError::invalid_input("status is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            ErrorResponse {
                code: 400,
                message: "status is required".to_string()
            }
        );
    }

    #[tokio::test]
    async fn internal_cause_is_hidden() {
        let (status, body) = body_of(PaymentError::Internal {
            context: "loading payment",
            source: anyhow::anyhow!("password authentication failed for user"),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
    }

    #[tokio::test]
    async fn cancelled_maps_to_request_timeout() {
        let (status, body) = body_of(PaymentError::Cancelled).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body.code, 408);
    }
}
