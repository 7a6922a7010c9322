use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::payment_informations::PaymentInformationEntity;
use crate::domain::value_objects::enums::payment_methods::PaymentMethod;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentInformationModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub payment_method: PaymentMethod,
    pub details: serde_json::Value,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PaymentInformationEntity> for PaymentInformationModel {
    type Error = anyhow::Error;

    fn try_from(value: PaymentInformationEntity) -> Result<Self, Self::Error> {
        let payment_method = PaymentMethod::parse(&value.payment_type).ok_or_else(|| {
            anyhow!(
                "payment information {} has unrecognized type `{}`",
                value.id,
                value.payment_type
            )
        })?;

        Ok(Self {
            id: value.id,
            user_id: value.user_id,
            payment_method,
            details: value.details,
            version: value.version,
            created_at: value.created_at,
        })
    }
}

/// Partial update: only `Some` fields replace the stored values.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UpdatePaymentInformationModel {
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeletedPaymentInformationModel {
    pub id: Uuid,
    pub deleted_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentInformationRequest {
    pub payment_method: PaymentMethod,
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentInformationRequest {
    pub id: String,
    #[serde(flatten)]
    pub changes: UpdatePaymentInformationModel,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPaymentInformationQuery {
    pub method: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_request_carries_id_next_to_changes() {
        let request: UpdatePaymentInformationRequest = serde_json::from_value(json!({
            "id": "0192f1c4-2b1e-7c3a-9d4e-5f6a7b8c9d0e",
            "payment_method": "promptpay",
        }))
        .unwrap();

        assert_eq!(request.id, "0192f1c4-2b1e-7c3a-9d4e-5f6a7b8c9d0e");
        assert_eq!(
            request.changes,
            UpdatePaymentInformationModel {
                payment_method: Some(PaymentMethod::PromptPay),
                details: None,
            }
        );
    }

    #[test]
    fn update_request_rejects_unknown_method() {
        let result = serde_json::from_value::<UpdatePaymentInformationRequest>(json!({
            "id": "x",
            "payment_method": "barter",
        }));
        assert!(result.is_err());
    }
}
