use std::{collections::BTreeMap, sync::Arc};

use anyhow::{Result, bail};
use axum::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
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
    repositories::{
        payment_attempts::PaymentAttemptRepository,
        payment_informations::PaymentInformationRepository,
        payments::PaymentRepository,
        transaction::{PaymentStoreScope, TransactionalStore},
    },
};

/// Row storage keyed by v7 ids, so iteration order is creation order.
#[derive(Debug, Default, Clone)]
pub struct PaymentTables {
    payment_informations: BTreeMap<Uuid, PaymentInformationEntity>,
    payment_attempts: BTreeMap<Uuid, PaymentAttemptEntity>,
    payments: BTreeMap<Uuid, PaymentEntity>,
}

fn insert_unique<E: Clone>(table: &mut BTreeMap<Uuid, E>, id: Uuid, row: E) -> Result<E> {
    if table.contains_key(&id) {
        bail!("duplicate key {id}");
    }
    table.insert(id, row.clone());
    Ok(row)
}

fn remove_where<E>(table: &mut BTreeMap<Uuid, E>, predicate: impl Fn(&E) -> bool) -> usize {
    let before = table.len();
    table.retain(|_, row| !predicate(row));
    before - table.len()
}

impl PaymentStoreScope for PaymentTables {
    fn create_payment_information(
        &mut self,
        entity: InsertPaymentInformationEntity,
    ) -> Result<PaymentInformationEntity> {
        let id = entity.id;
        insert_unique(&mut self.payment_informations, id, entity.into())
    }

    fn find_payment_information(&mut self, id: Uuid) -> Result<Option<PaymentInformationEntity>> {
        Ok(self.payment_informations.get(&id).cloned())
    }

    fn find_payment_informations_by_user(
        &mut self,
        user_id: Uuid,
        payment_type: Option<&str>,
    ) -> Result<Vec<PaymentInformationEntity>> {
        Ok(self
            .payment_informations
            .values()
            .filter(|row| row.user_id == user_id)
            .filter(|row| payment_type.is_none_or(|t| row.payment_type == t))
            .cloned()
            .collect())
    }

    fn find_all_payment_informations(&mut self) -> Result<Vec<PaymentInformationEntity>> {
        Ok(self.payment_informations.values().cloned().collect())
    }

    fn update_payment_information(
        &mut self,
        id: Uuid,
        changes: UpdatePaymentInformationEntity,
    ) -> Result<Option<PaymentInformationEntity>> {
        Ok(self.payment_informations.get_mut(&id).map(|row| {
            row.apply(changes);
            row.clone()
        }))
    }

    fn delete_payment_information(&mut self, id: Uuid) -> Result<usize> {
        Ok(usize::from(self.payment_informations.remove(&id).is_some()))
    }

    fn delete_payment_informations_by_user(&mut self, user_id: Uuid) -> Result<usize> {
        Ok(remove_where(&mut self.payment_informations, |row| {
            row.user_id == user_id
        }))
    }

    fn create_payment_attempt(
        &mut self,
        entity: InsertPaymentAttemptEntity,
    ) -> Result<PaymentAttemptEntity> {
        let id = entity.id;
        insert_unique(&mut self.payment_attempts, id, entity.into())
    }

    fn find_payment_attempt(&mut self, id: Uuid) -> Result<Option<PaymentAttemptEntity>> {
        Ok(self.payment_attempts.get(&id).cloned())
    }

    fn find_payment_attempts_by_order(
        &mut self,
        order_id: Uuid,
        status: Option<&str>,
    ) -> Result<Vec<PaymentAttemptEntity>> {
        Ok(self
            .payment_attempts
            .values()
            .filter(|row| row.order_id == order_id)
            .filter(|row| status.is_none_or(|s| row.status == s))
            .cloned()
            .collect())
    }

    fn find_all_payment_attempts(&mut self) -> Result<Vec<PaymentAttemptEntity>> {
        Ok(self.payment_attempts.values().cloned().collect())
    }

    fn update_payment_attempt(
        &mut self,
        id: Uuid,
        changes: UpdatePaymentAttemptEntity,
    ) -> Result<Option<PaymentAttemptEntity>> {
        Ok(self.payment_attempts.get_mut(&id).map(|row| {
            row.apply(changes);
            row.clone()
        }))
    }

    fn delete_payment_attempt(&mut self, id: Uuid) -> Result<usize> {
        Ok(usize::from(self.payment_attempts.remove(&id).is_some()))
    }

    fn delete_payment_attempts_by_order(&mut self, order_id: Uuid) -> Result<usize> {
        Ok(remove_where(&mut self.payment_attempts, |row| {
            row.order_id == order_id
        }))
    }

    fn create_payment(&mut self, entity: InsertPaymentEntity) -> Result<PaymentEntity> {
        let id = entity.id;
        insert_unique(&mut self.payments, id, entity.into())
    }

    fn find_payment(&mut self, id: Uuid) -> Result<Option<PaymentEntity>> {
        Ok(self.payments.get(&id).cloned())
    }

    fn find_payments_by_order(&mut self, order_id: Uuid) -> Result<Vec<PaymentEntity>> {
        Ok(self
            .payments
            .values()
            .filter(|row| row.order_id == order_id)
            .cloned()
            .collect())
    }

    fn find_payments_by_attempt(&mut self, attempt_id: Uuid) -> Result<Vec<PaymentEntity>> {
        Ok(self
            .payments
            .values()
            .filter(|row| row.attempt_id == attempt_id)
            .cloned()
            .collect())
    }

    fn find_all_payments(&mut self) -> Result<Vec<PaymentEntity>> {
        Ok(self.payments.values().cloned().collect())
    }

    fn update_payment(
        &mut self,
        id: Uuid,
        changes: UpdatePaymentEntity,
    ) -> Result<Option<PaymentEntity>> {
        Ok(self.payments.get_mut(&id).map(|row| {
            row.apply(changes);
            row.clone()
        }))
    }

    fn delete_payment(&mut self, id: Uuid) -> Result<usize> {
        Ok(usize::from(self.payments.remove(&id).is_some()))
    }

    fn delete_payments_by_order(&mut self, order_id: Uuid) -> Result<usize> {
        Ok(remove_where(&mut self.payments, |row| row.order_id == order_id))
    }
}

/// A thread-safe in-memory payment store for tests and local runs.
///
/// Transactions hold the write lock for their whole duration and restore a
/// snapshot of every table when the work fails.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPaymentStore {
    tables: Arc<RwLock<PaymentTables>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionalStore for InMemoryPaymentStore {
    async fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn PaymentStoreScope) -> Result<T> + Send + 'static,
    {
        let mut tables = self.tables.write().await;
        let snapshot = tables.clone();

        let result = work(&mut *tables);
        if result.is_err() {
            *tables = snapshot;
        }
        result
    }

    async fn scoped<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn PaymentStoreScope) -> Result<T> + Send + 'static,
    {
        let mut tables = self.tables.write().await;
        work(&mut *tables)
    }
}

#[async_trait]
impl PaymentInformationRepository for InMemoryPaymentStore {
    async fn create(
        &self,
        insert_payment_information_entity: InsertPaymentInformationEntity,
    ) -> Result<PaymentInformationEntity> {
        self.scoped(move |scope| scope.create_payment_information(insert_payment_information_entity))
            .await
    }

    async fn find_by_id(
        &self,
        payment_information_id: Uuid,
    ) -> Result<Option<PaymentInformationEntity>> {
        self.scoped(move |scope| scope.find_payment_information(payment_information_id))
            .await
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<PaymentInformationEntity>> {
        self.scoped(move |scope| scope.find_payment_informations_by_user(user_id, None))
            .await
    }

    async fn find_by_user_id_and_type(
        &self,
        user_id: Uuid,
        payment_type: String,
    ) -> Result<Vec<PaymentInformationEntity>> {
        self.scoped(move |scope| {
            scope.find_payment_informations_by_user(user_id, Some(payment_type.as_str()))
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<PaymentInformationEntity>> {
        self.scoped(|scope| scope.find_all_payment_informations())
            .await
    }

    async fn update(
        &self,
        payment_information_id: Uuid,
        update_payment_information_entity: UpdatePaymentInformationEntity,
    ) -> Result<Option<PaymentInformationEntity>> {
        self.scoped(move |scope| {
            scope.update_payment_information(
                payment_information_id,
                update_payment_information_entity,
            )
        })
        .await
    }

    async fn delete(&self, payment_information_id: Uuid) -> Result<usize> {
        self.scoped(move |scope| scope.delete_payment_information(payment_information_id))
            .await
    }
}

#[async_trait]
impl PaymentAttemptRepository for InMemoryPaymentStore {
    async fn create(
        &self,
        insert_payment_attempt_entity: InsertPaymentAttemptEntity,
    ) -> Result<PaymentAttemptEntity> {
        self.scoped(move |scope| scope.create_payment_attempt(insert_payment_attempt_entity))
            .await
    }

    async fn find_by_id(&self, payment_attempt_id: Uuid) -> Result<Option<PaymentAttemptEntity>> {
        self.scoped(move |scope| scope.find_payment_attempt(payment_attempt_id))
            .await
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<PaymentAttemptEntity>> {
        self.scoped(move |scope| scope.find_payment_attempts_by_order(order_id, None))
            .await
    }

    async fn find_by_order_id_and_status(
        &self,
        order_id: Uuid,
        status: String,
    ) -> Result<Vec<PaymentAttemptEntity>> {
        self.scoped(move |scope| {
            scope.find_payment_attempts_by_order(order_id, Some(status.as_str()))
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<PaymentAttemptEntity>> {
        self.scoped(|scope| scope.find_all_payment_attempts()).await
    }

    async fn update(
        &self,
        payment_attempt_id: Uuid,
        update_payment_attempt_entity: UpdatePaymentAttemptEntity,
    ) -> Result<Option<PaymentAttemptEntity>> {
        self.scoped(move |scope| {
            scope.update_payment_attempt(payment_attempt_id, update_payment_attempt_entity)
        })
        .await
    }

    async fn delete(&self, payment_attempt_id: Uuid) -> Result<usize> {
        self.scoped(move |scope| scope.delete_payment_attempt(payment_attempt_id))
            .await
    }

    async fn delete_by_order_id(&self, order_id: Uuid) -> Result<usize> {
        self.scoped(move |scope| scope.delete_payment_attempts_by_order(order_id))
            .await
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentStore {
    async fn create(&self, insert_payment_entity: InsertPaymentEntity) -> Result<PaymentEntity> {
        self.scoped(move |scope| scope.create_payment(insert_payment_entity))
            .await
    }

    async fn create_capped(
        &self,
        insert_payment_entity: InsertPaymentEntity,
        max_per_attempt: usize,
    ) -> Result<Option<PaymentEntity>> {
        self.scoped(move |scope| {
            let existing = scope.find_payments_by_attempt(insert_payment_entity.attempt_id)?;
            if existing.len() >= max_per_attempt {
                return Ok(None);
            }
            scope.create_payment(insert_payment_entity).map(Some)
        })
        .await
    }

    async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<PaymentEntity>> {
        self.scoped(move |scope| scope.find_payment(payment_id)).await
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<PaymentEntity>> {
        self.scoped(move |scope| scope.find_payments_by_order(order_id))
            .await
    }

    async fn find_by_attempt_id(&self, attempt_id: Uuid) -> Result<Vec<PaymentEntity>> {
        self.scoped(move |scope| scope.find_payments_by_attempt(attempt_id))
            .await
    }

    async fn find_all(&self) -> Result<Vec<PaymentEntity>> {
        self.scoped(|scope| scope.find_all_payments()).await
    }

    async fn update(
        &self,
        payment_id: Uuid,
        update_payment_entity: UpdatePaymentEntity,
    ) -> Result<Option<PaymentEntity>> {
        self.scoped(move |scope| scope.update_payment(payment_id, update_payment_entity))
            .await
    }

    async fn delete(&self, payment_id: Uuid) -> Result<usize> {
        self.scoped(move |scope| scope.delete_payment(payment_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use crate::domain::value_objects::identifiers::new_id;

    fn attempt(order_id: Uuid, status: &str) -> InsertPaymentAttemptEntity {
        InsertPaymentAttemptEntity {
            id: new_id(),
            order_id,
            payment_information_id: Some(new_id()),
            method: "credit_card".to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    fn payment(attempt_id: Uuid, order_id: Uuid) -> InsertPaymentEntity {
        InsertPaymentEntity {
            id: new_id(),
            attempt_id,
            order_id,
            amount: dec!(100.00),
            paid_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn lists_follow_creation_order() {
        let store = InMemoryPaymentStore::new();
        let order_id = new_id();

        let first = PaymentAttemptRepository::create(&store, attempt(order_id, "pending"))
            .await
            .unwrap();
        let second = PaymentAttemptRepository::create(&store, attempt(order_id, "success"))
            .await
            .unwrap();
        PaymentAttemptRepository::create(&store, attempt(new_id(), "pending"))
            .await
            .unwrap();

        let listed = PaymentAttemptRepository::find_by_order_id(&store, order_id)
            .await
            .unwrap();
        assert_eq!(listed, vec![first, second.clone()]);

        let succeeded = store
            .find_by_order_id_and_status(order_id, "success".to_string())
            .await
            .unwrap();
        assert_eq!(succeeded, vec![second]);
    }

    #[tokio::test]
    async fn update_of_missing_row_returns_none() {
        let store = InMemoryPaymentStore::new();
        let updated = PaymentRepository::update(
            &store,
            new_id(),
            UpdatePaymentEntity {
                amount: Some(dec!(1)),
            },
        )
        .await
        .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn failed_transaction_restores_every_table() {
        let store = InMemoryPaymentStore::new();
        let order_id = new_id();
        let created = PaymentAttemptRepository::create(&store, attempt(order_id, "success"))
            .await
            .unwrap();
        PaymentRepository::create(&store, payment(created.id, order_id))
            .await
            .unwrap();

        let result: Result<()> = store
            .transaction(move |scope| {
                scope.delete_payments_by_order(order_id)?;
                scope.delete_payment_attempts_by_order(order_id)?;
                bail!("abort")
            })
            .await;
        assert!(result.is_err());

        assert_eq!(
            PaymentRepository::find_by_order_id(&store, order_id)
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(
            PaymentAttemptRepository::find_by_id(&store, created.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn committed_transaction_keeps_writes() {
        let store = InMemoryPaymentStore::new();
        let order_id = new_id();
        let created = PaymentAttemptRepository::create(&store, attempt(order_id, "success"))
            .await
            .unwrap();
        PaymentRepository::create(&store, payment(created.id, order_id))
            .await
            .unwrap();

        let removed = store
            .transaction(move |scope| {
                let payments = scope.delete_payments_by_order(order_id)?;
                let attempts = scope.delete_payment_attempts_by_order(order_id)?;
                Ok((payments, attempts))
            })
            .await
            .unwrap();
        assert_eq!(removed, (1, 1));
        assert!(
            PaymentAttemptRepository::find_all(&store)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn capped_insert_stops_at_the_limit() {
        let store = InMemoryPaymentStore::new();
        let order_id = new_id();
        let attempt_id = new_id();

        let first = store
            .create_capped(payment(attempt_id, order_id), 1)
            .await
            .unwrap();
        assert!(first.is_some());

        let second = store
            .create_capped(payment(attempt_id, order_id), 1)
            .await
            .unwrap();
        assert!(second.is_none());

        let other_attempt = store
            .create_capped(payment(new_id(), order_id), 1)
            .await
            .unwrap();
        assert!(other_attempt.is_some());

        let stored = PaymentRepository::find_by_attempt_id(&store, attempt_id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }
}
