use anyhow::Result;
use axum::async_trait;
use diesel::{PgConnection, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::payments::{InsertPaymentEntity, PaymentEntity, UpdatePaymentEntity},
        repositories::payments::PaymentRepository,
    },
    infrastructure::postgres::{
        schema::{payment_attempts, payments},
        store::PaymentPostgres,
    },
};

pub(crate) fn insert(
    conn: &mut PgConnection,
    insert_payment_entity: InsertPaymentEntity,
) -> Result<PaymentEntity> {
    let result = insert_into(payments::table)
        .values(&insert_payment_entity)
        .returning(PaymentEntity::as_returning())
        .get_result::<PaymentEntity>(conn)?;

    Ok(result)
}

/// Locks the parent attempt row so concurrent callers serialize on the count.
/// Must run inside a transaction.
pub(crate) fn insert_capped(
    conn: &mut PgConnection,
    insert_payment_entity: InsertPaymentEntity,
    max_per_attempt: usize,
) -> Result<Option<PaymentEntity>> {
    let attempt_id = insert_payment_entity.attempt_id;

    payment_attempts::table
        .find(attempt_id)
        .select(payment_attempts::id)
        .for_update()
        .first::<Uuid>(conn)
        .optional()?;

    let existing = payments::table
        .filter(payments::attempt_id.eq(attempt_id))
        .count()
        .get_result::<i64>(conn)?;

    if existing >= i64::try_from(max_per_attempt).unwrap_or(i64::MAX) {
        return Ok(None);
    }

    insert(conn, insert_payment_entity).map(Some)
}

pub(crate) fn find_by_id(conn: &mut PgConnection, payment_id: Uuid) -> Result<Option<PaymentEntity>> {
    let result = payments::table
        .find(payment_id)
        .select(PaymentEntity::as_select())
        .first::<PaymentEntity>(conn)
        .optional()?;

    Ok(result)
}

pub(crate) fn find_by_order_id(conn: &mut PgConnection, order_id: Uuid) -> Result<Vec<PaymentEntity>> {
    let results = payments::table
        .filter(payments::order_id.eq(order_id))
        .order(payments::id.asc())
        .select(PaymentEntity::as_select())
        .load::<PaymentEntity>(conn)?;

    Ok(results)
}

pub(crate) fn find_by_attempt_id(
    conn: &mut PgConnection,
    attempt_id: Uuid,
) -> Result<Vec<PaymentEntity>> {
    let results = payments::table
        .filter(payments::attempt_id.eq(attempt_id))
        .order(payments::id.asc())
        .select(PaymentEntity::as_select())
        .load::<PaymentEntity>(conn)?;

    Ok(results)
}

pub(crate) fn find_all(conn: &mut PgConnection) -> Result<Vec<PaymentEntity>> {
    let results = payments::table
        .order(payments::id.asc())
        .select(PaymentEntity::as_select())
        .load::<PaymentEntity>(conn)?;

    Ok(results)
}

pub(crate) fn update(
    conn: &mut PgConnection,
    payment_id: Uuid,
    update_payment_entity: UpdatePaymentEntity,
) -> Result<Option<PaymentEntity>> {
    let result = diesel::update(payments::table.find(payment_id))
        .set(&update_payment_entity)
        .returning(PaymentEntity::as_returning())
        .get_result::<PaymentEntity>(conn)
        .optional()?;

    Ok(result)
}

pub(crate) fn delete(conn: &mut PgConnection, payment_id: Uuid) -> Result<usize> {
    let removed = diesel::delete(payments::table.find(payment_id)).execute(conn)?;

    Ok(removed)
}

pub(crate) fn delete_by_order_id(conn: &mut PgConnection, order_id: Uuid) -> Result<usize> {
    let removed =
        diesel::delete(payments::table.filter(payments::order_id.eq(order_id))).execute(conn)?;

    Ok(removed)
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn create(&self, insert_payment_entity: InsertPaymentEntity) -> Result<PaymentEntity> {
        self.run(move |conn| insert(conn, insert_payment_entity))
            .await
    }

    async fn create_capped(
        &self,
        insert_payment_entity: InsertPaymentEntity,
        max_per_attempt: usize,
    ) -> Result<Option<PaymentEntity>> {
        self.run(move |conn| {
            conn.transaction::<_, anyhow::Error, _>(|tx| {
                insert_capped(tx, insert_payment_entity, max_per_attempt)
            })
        })
        .await
    }

    async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<PaymentEntity>> {
        self.run(move |conn| find_by_id(conn, payment_id)).await
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<PaymentEntity>> {
        self.run(move |conn| find_by_order_id(conn, order_id)).await
    }

    async fn find_by_attempt_id(&self, attempt_id: Uuid) -> Result<Vec<PaymentEntity>> {
        self.run(move |conn| find_by_attempt_id(conn, attempt_id))
            .await
    }

    async fn find_all(&self) -> Result<Vec<PaymentEntity>> {
        self.run(find_all).await
    }

    async fn update(
        &self,
        payment_id: Uuid,
        update_payment_entity: UpdatePaymentEntity,
    ) -> Result<Option<PaymentEntity>> {
        self.run(move |conn| update(conn, payment_id, update_payment_entity))
            .await
    }

    async fn delete(&self, payment_id: Uuid) -> Result<usize> {
        self.run(move |conn| delete(conn, payment_id)).await
    }
}
