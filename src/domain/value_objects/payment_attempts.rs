use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::payment_attempts::PaymentAttemptEntity;
use crate::domain::value_objects::enums::{
    payment_methods::PaymentMethod, payment_statuses::PaymentStatus,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentAttemptModel {
    pub payment_attempt_id: Uuid,
    pub order_id: Uuid,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_info_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PaymentAttemptEntity> for PaymentAttemptModel {
    type Error = anyhow::Error;

    fn try_from(value: PaymentAttemptEntity) -> Result<Self, Self::Error> {
        let method = PaymentMethod::parse(&value.method).ok_or_else(|| {
            anyhow!(
                "payment attempt {} has unrecognized method `{}`",
                value.id,
                value.method
            )
        })?;
        let status = PaymentStatus::parse(&value.status).ok_or_else(|| {
            anyhow!(
                "payment attempt {} has unrecognized status `{}`",
                value.id,
                value.status
            )
        })?;

        Ok(Self {
            payment_attempt_id: value.id,
            order_id: value.order_id,
            method,
            status,
            payment_info_id: value.payment_information_id,
            created_at: value.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreatedPaymentAttemptModel {
    pub payment_attempt_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentAttemptRequest {
    pub order_id: String,
    pub payment_info_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentAttemptRequest {
    pub payment_attempt_id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPaymentAttemptsQuery {
    pub status: Option<String>,
}
