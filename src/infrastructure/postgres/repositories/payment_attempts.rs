use anyhow::Result;
use axum::async_trait;
use diesel::{PgConnection, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::payment_attempts::{
            InsertPaymentAttemptEntity, PaymentAttemptEntity, UpdatePaymentAttemptEntity,
        },
        repositories::payment_attempts::PaymentAttemptRepository,
    },
    infrastructure::postgres::{schema::payment_attempts, store::PaymentPostgres},
};

pub(crate) fn insert(
    conn: &mut PgConnection,
    insert_payment_attempt_entity: InsertPaymentAttemptEntity,
) -> Result<PaymentAttemptEntity> {
    let result = insert_into(payment_attempts::table)
        .values(&insert_payment_attempt_entity)
        .returning(PaymentAttemptEntity::as_returning())
        .get_result::<PaymentAttemptEntity>(conn)?;

    Ok(result)
}

pub(crate) fn find_by_id(
    conn: &mut PgConnection,
    payment_attempt_id: Uuid,
) -> Result<Option<PaymentAttemptEntity>> {
    let result = payment_attempts::table
        .find(payment_attempt_id)
        .select(PaymentAttemptEntity::as_select())
        .first::<PaymentAttemptEntity>(conn)
        .optional()?;

    Ok(result)
}

pub(crate) fn find_by_order_id(
    conn: &mut PgConnection,
    order_id: Uuid,
    status: Option<&str>,
) -> Result<Vec<PaymentAttemptEntity>> {
    let mut query = payment_attempts::table
        .filter(payment_attempts::order_id.eq(order_id))
        .into_boxed();

    if let Some(status) = status {
        query = query.filter(payment_attempts::status.eq(status.to_owned()));
    }

    let results = query
        .order(payment_attempts::id.asc())
        .select(PaymentAttemptEntity::as_select())
        .load::<PaymentAttemptEntity>(conn)?;

    Ok(results)
}

pub(crate) fn find_all(conn: &mut PgConnection) -> Result<Vec<PaymentAttemptEntity>> {
    let results = payment_attempts::table
        .order(payment_attempts::id.asc())
        .select(PaymentAttemptEntity::as_select())
        .load::<PaymentAttemptEntity>(conn)?;

    Ok(results)
}

pub(crate) fn update(
    conn: &mut PgConnection,
    payment_attempt_id: Uuid,
    update_payment_attempt_entity: UpdatePaymentAttemptEntity,
) -> Result<Option<PaymentAttemptEntity>> {
    let result = diesel::update(payment_attempts::table.find(payment_attempt_id))
        .set(&update_payment_attempt_entity)
        .returning(PaymentAttemptEntity::as_returning())
        .get_result::<PaymentAttemptEntity>(conn)
        .optional()?;

    Ok(result)
}

pub(crate) fn delete(conn: &mut PgConnection, payment_attempt_id: Uuid) -> Result<usize> {
    let removed = diesel::delete(payment_attempts::table.find(payment_attempt_id)).execute(conn)?;

    Ok(removed)
}

pub(crate) fn delete_by_order_id(conn: &mut PgConnection, order_id: Uuid) -> Result<usize> {
    let removed =
        diesel::delete(payment_attempts::table.filter(payment_attempts::order_id.eq(order_id)))
            .execute(conn)?;

    Ok(removed)
}

#[async_trait]
impl PaymentAttemptRepository for PaymentPostgres {
    async fn create(
        &self,
        insert_payment_attempt_entity: InsertPaymentAttemptEntity,
    ) -> Result<PaymentAttemptEntity> {
        self.run(move |conn| insert(conn, insert_payment_attempt_entity))
            .await
    }

    async fn find_by_id(&self, payment_attempt_id: Uuid) -> Result<Option<PaymentAttemptEntity>> {
        self.run(move |conn| find_by_id(conn, payment_attempt_id))
            .await
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<PaymentAttemptEntity>> {
        self.run(move |conn| find_by_order_id(conn, order_id, None))
            .await
    }

    async fn find_by_order_id_and_status(
        &self,
        order_id: Uuid,
        status: String,
    ) -> Result<Vec<PaymentAttemptEntity>> {
        self.run(move |conn| find_by_order_id(conn, order_id, Some(status.as_str())))
            .await
    }

    async fn find_all(&self) -> Result<Vec<PaymentAttemptEntity>> {
        self.run(find_all).await
    }

    async fn update(
        &self,
        payment_attempt_id: Uuid,
        update_payment_attempt_entity: UpdatePaymentAttemptEntity,
    ) -> Result<Option<PaymentAttemptEntity>> {
        self.run(move |conn| update(conn, payment_attempt_id, update_payment_attempt_entity))
            .await
    }

    async fn delete(&self, payment_attempt_id: Uuid) -> Result<usize> {
        self.run(move |conn| delete(conn, payment_attempt_id)).await
    }

    async fn delete_by_order_id(&self, order_id: Uuid) -> Result<usize> {
        self.run(move |conn| delete_by_order_id(conn, order_id))
            .await
    }
}
