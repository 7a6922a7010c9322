use uuid::Uuid;

use super::errors::{PaymentError, UseCaseResult};
use crate::domain::value_objects::{
    enums::{payment_methods::PaymentMethod, payment_statuses::PaymentStatus},
    identifiers::parse_id,
};

/// Parses a caller-supplied id, naming it `label` in the error message.
pub fn parse_identifier(raw: &str, label: &str) -> UseCaseResult<Uuid> {
    if raw.trim().is_empty() {
        return Err(PaymentError::invalid_input(format!("{label} is required")));
    }
    parse_id(raw).ok_or_else(|| PaymentError::invalid_input(format!("invalid {label}")))
}

pub fn parse_status(raw: &str) -> UseCaseResult<PaymentStatus> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PaymentError::invalid_input("status is required"));
    }
    PaymentStatus::parse(raw)
        .ok_or_else(|| PaymentError::invalid_input("invalid payment status provided"))
}

pub fn parse_method(raw: &str) -> UseCaseResult<PaymentMethod> {
    PaymentMethod::parse(raw.trim())
        .ok_or_else(|| PaymentError::invalid_input("invalid payment method provided"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: PaymentError) -> String {
        match err {
            PaymentError::InvalidInput(message) => message,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn identifier_errors_name_the_field() {
        assert_eq!(
            message(parse_identifier("  ", "attempt ID").unwrap_err()),
            "attempt ID is required"
        );
        assert_eq!(
            message(parse_identifier("abc", "order ID").unwrap_err()),
            "invalid order ID"
        );
        let id = Uuid::now_v7();
        assert_eq!(parse_identifier(&id.to_string(), "order ID").unwrap(), id);
    }

    #[test]
    fn status_must_be_present_and_known() {
        assert_eq!(message(parse_status("").unwrap_err()), "status is required");
        assert_eq!(
            message(parse_status("refunded").unwrap_err()),
            "invalid payment status provided"
        );
        assert_eq!(parse_status("success").unwrap(), PaymentStatus::Success);
    }

    #[test]
    fn method_must_be_known() {
        assert_eq!(parse_method("promptpay").unwrap(), PaymentMethod::PromptPay);
        assert!(parse_method("cash").is_err());
    }
}
