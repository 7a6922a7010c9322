use anyhow::Result;
use axum::async_trait;
use uuid::Uuid;

use crate::domain::entities::{
    payment_attempts::{InsertPaymentAttemptEntity, PaymentAttemptEntity, UpdatePaymentAttemptEntity},
    payment_informations::{
        InsertPaymentInformationEntity, PaymentInformationEntity, UpdatePaymentInformationEntity,
    },
    payments::{InsertPaymentEntity, PaymentEntity, UpdatePaymentEntity},
};

/// Store operations for all three entities, bound to one connection or one
/// transaction. Every call on a scope sees the writes made earlier on it.
pub trait PaymentStoreScope {
    fn create_payment_information(
        &mut self,
        entity: InsertPaymentInformationEntity,
    ) -> Result<PaymentInformationEntity>;
    fn find_payment_information(&mut self, id: Uuid) -> Result<Option<PaymentInformationEntity>>;
    fn find_payment_informations_by_user(
        &mut self,
        user_id: Uuid,
        payment_type: Option<&str>,
    ) -> Result<Vec<PaymentInformationEntity>>;
    fn find_all_payment_informations(&mut self) -> Result<Vec<PaymentInformationEntity>>;
    fn update_payment_information(
        &mut self,
        id: Uuid,
        changes: UpdatePaymentInformationEntity,
    ) -> Result<Option<PaymentInformationEntity>>;
    fn delete_payment_information(&mut self, id: Uuid) -> Result<usize>;
    fn delete_payment_informations_by_user(&mut self, user_id: Uuid) -> Result<usize>;

    fn create_payment_attempt(
        &mut self,
        entity: InsertPaymentAttemptEntity,
    ) -> Result<PaymentAttemptEntity>;
    fn find_payment_attempt(&mut self, id: Uuid) -> Result<Option<PaymentAttemptEntity>>;
    fn find_payment_attempts_by_order(
        &mut self,
        order_id: Uuid,
        status: Option<&str>,
    ) -> Result<Vec<PaymentAttemptEntity>>;
    fn find_all_payment_attempts(&mut self) -> Result<Vec<PaymentAttemptEntity>>;
    fn update_payment_attempt(
        &mut self,
        id: Uuid,
        changes: UpdatePaymentAttemptEntity,
    ) -> Result<Option<PaymentAttemptEntity>>;
    fn delete_payment_attempt(&mut self, id: Uuid) -> Result<usize>;
    fn delete_payment_attempts_by_order(&mut self, order_id: Uuid) -> Result<usize>;

    fn create_payment(&mut self, entity: InsertPaymentEntity) -> Result<PaymentEntity>;
    fn find_payment(&mut self, id: Uuid) -> Result<Option<PaymentEntity>>;
    fn find_payments_by_order(&mut self, order_id: Uuid) -> Result<Vec<PaymentEntity>>;
    fn find_payments_by_attempt(&mut self, attempt_id: Uuid) -> Result<Vec<PaymentEntity>>;
    fn find_all_payments(&mut self) -> Result<Vec<PaymentEntity>>;
    fn update_payment(
        &mut self,
        id: Uuid,
        changes: UpdatePaymentEntity,
    ) -> Result<Option<PaymentEntity>>;
    fn delete_payment(&mut self, id: Uuid) -> Result<usize>;
    fn delete_payments_by_order(&mut self, order_id: Uuid) -> Result<usize>;
}

#[async_trait]
pub trait TransactionalStore: Send + Sync {
    /// Runs `work` atomically: its writes are committed when it returns `Ok`
    /// and discarded when it returns `Err`, which is then propagated.
    async fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn PaymentStoreScope) -> Result<T> + Send + 'static;

    /// Runs `work` on a single scope without transactional guarantees.
    async fn scoped<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn PaymentStoreScope) -> Result<T> + Send + 'static;
}
