use anyhow::Result;
use axum::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payments::{InsertPaymentEntity, PaymentEntity, UpdatePaymentEntity};

#[automock]
#[async_trait]
pub trait PaymentRepository {
    async fn create(&self, insert_payment_entity: InsertPaymentEntity) -> Result<PaymentEntity>;
    /// Inserts only while the attempt has fewer than `max_per_attempt` payments.
    /// The count and the insert are atomic; `Ok(None)` when the cap is reached.
    async fn create_capped(
        &self,
        insert_payment_entity: InsertPaymentEntity,
        max_per_attempt: usize,
    ) -> Result<Option<PaymentEntity>>;
    async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<PaymentEntity>>;
    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<PaymentEntity>>;
    async fn find_by_attempt_id(&self, attempt_id: Uuid) -> Result<Vec<PaymentEntity>>;
    async fn find_all(&self) -> Result<Vec<PaymentEntity>>;
    async fn update(
        &self,
        payment_id: Uuid,
        update_payment_entity: UpdatePaymentEntity,
    ) -> Result<Option<PaymentEntity>>;
    async fn delete(&self, payment_id: Uuid) -> Result<usize>;
}
