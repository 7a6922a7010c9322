use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error("internal error while {context}")]
    Internal {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl PaymentError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        PaymentError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        PaymentError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::Forbidden(_) => StatusCode::FORBIDDEN,
            PaymentError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PaymentError::NotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::Cancelled => StatusCode::REQUEST_TIMEOUT,
            PaymentError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PaymentError>;

/// Wraps a store or gateway failure, logging the cause under `context`.
pub fn internal(context: &'static str) -> impl FnOnce(anyhow::Error) -> PaymentError {
    move |err| {
        error!(db_error = ?err, context, "payments: collaborator call failed");
        PaymentError::Internal {
            context,
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            PaymentError::Forbidden("no".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PaymentError::invalid_input("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PaymentError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PaymentError::Cancelled.status_code(),
            StatusCode::REQUEST_TIMEOUT
        );
    }

    #[test]
    fn internal_keeps_cause_out_of_message() {
        let err = internal("loading payment")(anyhow!("connection refused"));
        assert_eq!(err.to_string(), "internal error while loading payment");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("connection refused"));
    }
}
