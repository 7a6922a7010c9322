use std::sync::Arc;

use anyhow::{Context, Result};
use axum::async_trait;
use diesel::{Connection, PgConnection};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            payment_attempts::{
                InsertPaymentAttemptEntity, PaymentAttemptEntity, UpdatePaymentAttemptEntity,
            },
            payment_informations::{
                InsertPaymentInformationEntity, PaymentInformationEntity,
                UpdatePaymentInformationEntity,
            },
            payments::{InsertPaymentEntity, PaymentEntity, UpdatePaymentEntity},
        },
        repositories::transaction::{PaymentStoreScope, TransactionalStore},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{payment_attempts, payment_informations, payments},
    },
};

/// Postgres-backed store for payment informations, attempts and payments.
#[derive(Clone)]
pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    /// Checks out a pooled connection and runs `work` on the blocking pool.
    pub(crate) async fn run<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T> + Send + 'static,
    {
        let db_pool = Arc::clone(&self.db_pool);

        tokio::task::spawn_blocking(move || {
            let mut conn = db_pool.get()?;
            work(&mut *conn)
        })
        .await
        .context("postgres worker task failed")?
    }
}

#[async_trait]
impl TransactionalStore for PaymentPostgres {
    async fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn PaymentStoreScope) -> Result<T> + Send + 'static,
    {
        self.run(move |conn| {
            debug!("postgres: opening transaction");
            conn.transaction::<T, anyhow::Error, _>(|tx| work(tx))
        })
        .await
    }

    async fn scoped<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn PaymentStoreScope) -> Result<T> + Send + 'static,
    {
        self.run(move |conn| work(conn)).await
    }
}

impl PaymentStoreScope for PgConnection {
    fn create_payment_information(
        &mut self,
        entity: InsertPaymentInformationEntity,
    ) -> Result<PaymentInformationEntity> {
        payment_informations::insert(self, entity)
    }

    fn find_payment_information(&mut self, id: Uuid) -> Result<Option<PaymentInformationEntity>> {
        payment_informations::find_by_id(self, id)
    }

    fn find_payment_informations_by_user(
        &mut self,
        user_id: Uuid,
        payment_type: Option<&str>,
    ) -> Result<Vec<PaymentInformationEntity>> {
        payment_informations::find_by_user_id(self, user_id, payment_type)
    }

    fn find_all_payment_informations(&mut self) -> Result<Vec<PaymentInformationEntity>> {
        payment_informations::find_all(self)
    }

    fn update_payment_information(
        &mut self,
        id: Uuid,
        changes: UpdatePaymentInformationEntity,
    ) -> Result<Option<PaymentInformationEntity>> {
        payment_informations::update(self, id, changes)
    }

    fn delete_payment_information(&mut self, id: Uuid) -> Result<usize> {
        payment_informations::delete(self, id)
    }

    fn delete_payment_informations_by_user(&mut self, user_id: Uuid) -> Result<usize> {
        payment_informations::delete_by_user_id(self, user_id)
    }

    fn create_payment_attempt(
        &mut self,
        entity: InsertPaymentAttemptEntity,
    ) -> Result<PaymentAttemptEntity> {
        payment_attempts::insert(self, entity)
    }

    fn find_payment_attempt(&mut self, id: Uuid) -> Result<Option<PaymentAttemptEntity>> {
        payment_attempts::find_by_id(self, id)
    }

    fn find_payment_attempts_by_order(
        &mut self,
        order_id: Uuid,
        status: Option<&str>,
    ) -> Result<Vec<PaymentAttemptEntity>> {
        payment_attempts::find_by_order_id(self, order_id, status)
    }

    fn find_all_payment_attempts(&mut self) -> Result<Vec<PaymentAttemptEntity>> {
        payment_attempts::find_all(self)
    }

    fn update_payment_attempt(
        &mut self,
        id: Uuid,
        changes: UpdatePaymentAttemptEntity,
    ) -> Result<Option<PaymentAttemptEntity>> {
        payment_attempts::update(self, id, changes)
    }

    fn delete_payment_attempt(&mut self, id: Uuid) -> Result<usize> {
        payment_attempts::delete(self, id)
    }

    fn delete_payment_attempts_by_order(&mut self, order_id: Uuid) -> Result<usize> {
        payment_attempts::delete_by_order_id(self, order_id)
    }

    fn create_payment(&mut self, entity: InsertPaymentEntity) -> Result<PaymentEntity> {
        payments::insert(self, entity)
    }

    fn find_payment(&mut self, id: Uuid) -> Result<Option<PaymentEntity>> {
        payments::find_by_id(self, id)
    }

    fn find_payments_by_order(&mut self, order_id: Uuid) -> Result<Vec<PaymentEntity>> {
        payments::find_by_order_id(self, order_id)
    }

    fn find_payments_by_attempt(&mut self, attempt_id: Uuid) -> Result<Vec<PaymentEntity>> {
        payments::find_by_attempt_id(self, attempt_id)
    }

    fn find_all_payments(&mut self) -> Result<Vec<PaymentEntity>> {
        payments::find_all(self)
    }

    fn update_payment(
        &mut self,
        id: Uuid,
        changes: UpdatePaymentEntity,
    ) -> Result<Option<PaymentEntity>> {
        payments::update(self, id, changes)
    }

    fn delete_payment(&mut self, id: Uuid) -> Result<usize> {
        payments::delete(self, id)
    }

    fn delete_payments_by_order(&mut self, order_id: Uuid) -> Result<usize> {
        payments::delete_by_order_id(self, order_id)
    }
}
