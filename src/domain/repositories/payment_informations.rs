use anyhow::Result;
use axum::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payment_informations::{
    InsertPaymentInformationEntity, PaymentInformationEntity, UpdatePaymentInformationEntity,
};

#[automock]
#[async_trait]
pub trait PaymentInformationRepository {
    async fn create(
        &self,
        insert_payment_information_entity: InsertPaymentInformationEntity,
    ) -> Result<PaymentInformationEntity>;
    async fn find_by_id(&self, payment_information_id: Uuid)
    -> Result<Option<PaymentInformationEntity>>;
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<PaymentInformationEntity>>;
    async fn find_by_user_id_and_type(
        &self,
        user_id: Uuid,
        payment_type: String,
    ) -> Result<Vec<PaymentInformationEntity>>;
    async fn find_all(&self) -> Result<Vec<PaymentInformationEntity>>;
    /// `Ok(None)` when the row disappeared before the write.
    async fn update(
        &self,
        payment_information_id: Uuid,
        update_payment_information_entity: UpdatePaymentInformationEntity,
    ) -> Result<Option<PaymentInformationEntity>>;
    async fn delete(&self, payment_information_id: Uuid) -> Result<usize>;
}
