use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::payment_attempts;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_attempts)]
pub struct PaymentAttemptEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub payment_information_id: Option<Uuid>,
    pub method: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payment_attempts)]
pub struct InsertPaymentAttemptEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub payment_information_id: Option<Uuid>,
    pub method: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// `method` is a snapshot taken at creation, so it has no changeset field.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = payment_attempts)]
pub struct UpdatePaymentAttemptEntity {
    pub status: Option<String>,
}

impl From<InsertPaymentAttemptEntity> for PaymentAttemptEntity {
    fn from(value: InsertPaymentAttemptEntity) -> Self {
        Self {
            id: value.id,
            order_id: value.order_id,
            payment_information_id: value.payment_information_id,
            method: value.method,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

impl PaymentAttemptEntity {
    pub fn apply(&mut self, changes: UpdatePaymentAttemptEntity) {
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}
