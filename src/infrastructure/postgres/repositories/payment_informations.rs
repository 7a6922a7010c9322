use anyhow::Result;
use axum::async_trait;
use diesel::{PgConnection, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::payment_informations::{
            InsertPaymentInformationEntity, PaymentInformationEntity,
            UpdatePaymentInformationEntity,
        },
        repositories::payment_informations::PaymentInformationRepository,
    },
    infrastructure::postgres::{schema::payment_informations, store::PaymentPostgres},
};

pub(crate) fn insert(
    conn: &mut PgConnection,
    insert_payment_information_entity: InsertPaymentInformationEntity,
) -> Result<PaymentInformationEntity> {
    let result = insert_into(payment_informations::table)
        .values(&insert_payment_information_entity)
        .returning(PaymentInformationEntity::as_returning())
        .get_result::<PaymentInformationEntity>(conn)?;

    Ok(result)
}

pub(crate) fn find_by_id(
    conn: &mut PgConnection,
    payment_information_id: Uuid,
) -> Result<Option<PaymentInformationEntity>> {
    let result = payment_informations::table
        .find(payment_information_id)
        .select(PaymentInformationEntity::as_select())
        .first::<PaymentInformationEntity>(conn)
        .optional()?;

    Ok(result)
}

pub(crate) fn find_by_user_id(
    conn: &mut PgConnection,
    user_id: Uuid,
    payment_type: Option<&str>,
) -> Result<Vec<PaymentInformationEntity>> {
    let mut query = payment_informations::table
        .filter(payment_informations::user_id.eq(user_id))
        .into_boxed();

    if let Some(payment_type) = payment_type {
        query = query.filter(payment_informations::type_.eq(payment_type.to_owned()));
    }

    let results = query
        .order(payment_informations::id.asc())
        .select(PaymentInformationEntity::as_select())
        .load::<PaymentInformationEntity>(conn)?;

    Ok(results)
}

pub(crate) fn find_all(conn: &mut PgConnection) -> Result<Vec<PaymentInformationEntity>> {
    let results = payment_informations::table
        .order(payment_informations::id.asc())
        .select(PaymentInformationEntity::as_select())
        .load::<PaymentInformationEntity>(conn)?;

    Ok(results)
}

pub(crate) fn update(
    conn: &mut PgConnection,
    payment_information_id: Uuid,
    update_payment_information_entity: UpdatePaymentInformationEntity,
) -> Result<Option<PaymentInformationEntity>> {
    let result = diesel::update(payment_informations::table.find(payment_information_id))
        .set(&update_payment_information_entity)
        .returning(PaymentInformationEntity::as_returning())
        .get_result::<PaymentInformationEntity>(conn)
        .optional()?;

    Ok(result)
}

pub(crate) fn delete(conn: &mut PgConnection, payment_information_id: Uuid) -> Result<usize> {
    let removed =
        diesel::delete(payment_informations::table.find(payment_information_id)).execute(conn)?;

    Ok(removed)
}

pub(crate) fn delete_by_user_id(conn: &mut PgConnection, user_id: Uuid) -> Result<usize> {
    let removed = diesel::delete(
        payment_informations::table.filter(payment_informations::user_id.eq(user_id)),
    )
    .execute(conn)?;

    Ok(removed)
}

#[async_trait]
impl PaymentInformationRepository for PaymentPostgres {
    async fn create(
        &self,
        insert_payment_information_entity: InsertPaymentInformationEntity,
    ) -> Result<PaymentInformationEntity> {
        self.run(move |conn| insert(conn, insert_payment_information_entity))
            .await
    }

    async fn find_by_id(
        &self,
        payment_information_id: Uuid,
    ) -> Result<Option<PaymentInformationEntity>> {
        self.run(move |conn| find_by_id(conn, payment_information_id))
            .await
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<PaymentInformationEntity>> {
        self.run(move |conn| find_by_user_id(conn, user_id, None))
            .await
    }

    async fn find_by_user_id_and_type(
        &self,
        user_id: Uuid,
        payment_type: String,
    ) -> Result<Vec<PaymentInformationEntity>> {
        self.run(move |conn| find_by_user_id(conn, user_id, Some(payment_type.as_str())))
            .await
    }

    async fn find_all(&self) -> Result<Vec<PaymentInformationEntity>> {
        self.run(find_all).await
    }

    async fn update(
        &self,
        payment_information_id: Uuid,
        update_payment_information_entity: UpdatePaymentInformationEntity,
    ) -> Result<Option<PaymentInformationEntity>> {
        self.run(move |conn| {
            update(
                conn,
                payment_information_id,
                update_payment_information_entity,
            )
        })
        .await
    }

    async fn delete(&self, payment_information_id: Uuid) -> Result<usize> {
        self.run(move |conn| delete(conn, payment_information_id))
            .await
    }
}
