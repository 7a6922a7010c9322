use chrono::SecondsFormat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::payments::PaymentEntity;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentModel {
    pub payment_id: Uuid,
    pub attempt_id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    /// RFC 3339, UTC.
    pub paid_at: String,
}

impl From<PaymentEntity> for PaymentModel {
    fn from(value: PaymentEntity) -> Self {
        Self {
            payment_id: value.id,
            attempt_id: value.attempt_id,
            order_id: value.order_id,
            amount: value.amount,
            paid_at: value.paid_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UpdatePaymentModel {
    #[serde(default)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    #[serde(default)]
    pub payment_attempt_id: String,
    pub amount: Decimal,
}
