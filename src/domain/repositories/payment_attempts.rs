use anyhow::Result;
use axum::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payment_attempts::{
    InsertPaymentAttemptEntity, PaymentAttemptEntity, UpdatePaymentAttemptEntity,
};

#[automock]
#[async_trait]
pub trait PaymentAttemptRepository {
    async fn create(
        &self,
        insert_payment_attempt_entity: InsertPaymentAttemptEntity,
    ) -> Result<PaymentAttemptEntity>;
    async fn find_by_id(&self, payment_attempt_id: Uuid) -> Result<Option<PaymentAttemptEntity>>;
    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<PaymentAttemptEntity>>;
    async fn find_by_order_id_and_status(
        &self,
        order_id: Uuid,
        status: String,
    ) -> Result<Vec<PaymentAttemptEntity>>;
    async fn find_all(&self) -> Result<Vec<PaymentAttemptEntity>>;
    async fn update(
        &self,
        payment_attempt_id: Uuid,
        update_payment_attempt_entity: UpdatePaymentAttemptEntity,
    ) -> Result<Option<PaymentAttemptEntity>>;
    async fn delete(&self, payment_attempt_id: Uuid) -> Result<usize>;
    async fn delete_by_order_id(&self, order_id: Uuid) -> Result<usize>;
}
