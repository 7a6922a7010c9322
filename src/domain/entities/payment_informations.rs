use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::payment_informations;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_informations)]
pub struct PaymentInformationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    #[diesel(column_name = type_)]
    pub payment_type: String,
    pub details: serde_json::Value,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payment_informations)]
pub struct InsertPaymentInformationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    #[diesel(column_name = type_)]
    pub payment_type: String,
    pub details: serde_json::Value,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

/// `None` fields are left untouched by the update.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = payment_informations)]
pub struct UpdatePaymentInformationEntity {
    #[diesel(column_name = type_)]
    pub payment_type: Option<String>,
    pub details: Option<serde_json::Value>,
    pub version: Option<i32>,
}

impl From<InsertPaymentInformationEntity> for PaymentInformationEntity {
    fn from(value: InsertPaymentInformationEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            payment_type: value.payment_type,
            details: value.details,
            version: value.version,
            created_at: value.created_at,
        }
    }
}

impl PaymentInformationEntity {
    pub fn apply(&mut self, changes: UpdatePaymentInformationEntity) {
        if let Some(payment_type) = changes.payment_type {
            self.payment_type = payment_type;
        }
        if let Some(details) = changes.details {
            self.details = details;
        }
        if let Some(version) = changes.version {
            self.version = version;
        }
    }
}
