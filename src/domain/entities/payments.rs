use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::payments;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub attempt_id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub id: Uuid,
    pub attempt_id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = payments)]
pub struct UpdatePaymentEntity {
    pub amount: Option<Decimal>,
}

impl From<InsertPaymentEntity> for PaymentEntity {
    fn from(value: InsertPaymentEntity) -> Self {
        Self {
            id: value.id,
            attempt_id: value.attempt_id,
            order_id: value.order_id,
            amount: value.amount,
            paid_at: value.paid_at,
        }
    }
}

impl PaymentEntity {
    pub fn apply(&mut self, changes: UpdatePaymentEntity) {
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
    }
}
