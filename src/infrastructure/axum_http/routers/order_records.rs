use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get},
};

use super::request_cancellation;
use crate::{
    application::{errors::PaymentError, usecases::order_records::OrderPaymentRecordsUseCase},
    domain::repositories::transaction::TransactionalStore,
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{postgres_connection::PgPoolSquad, store::PaymentPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let order_records_usecase =
        OrderPaymentRecordsUseCase::new(Arc::new(PaymentPostgres::new(db_pool)));

    Router::new()
        .route("/order/:order_id", delete(purge_order::<PaymentPostgres>))
        .route(
            "/order/:order_id/summary",
            get(order_summary::<PaymentPostgres>),
        )
        .route("/info", delete(purge_my_instruments::<PaymentPostgres>))
        .with_state(Arc::new(order_records_usecase))
}

pub async fn purge_order<S>(
    State(order_records_usecase): State<Arc<OrderPaymentRecordsUseCase<S>>>,
    _auth: AuthUser,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    S: TransactionalStore,
{
    let (cancel, _guard) = request_cancellation();
    let purged = order_records_usecase.purge_order(&order_id, &cancel).await?;

    Ok(Json(purged))
}

pub async fn order_summary<S>(
    State(order_records_usecase): State<Arc<OrderPaymentRecordsUseCase<S>>>,
    _auth: AuthUser,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    S: TransactionalStore,
{
    let (cancel, _guard) = request_cancellation();
    let summary = order_records_usecase
        .order_summary(&order_id, &cancel)
        .await?;

    Ok(Json(summary))
}

pub async fn purge_my_instruments<S>(
    State(order_records_usecase): State<Arc<OrderPaymentRecordsUseCase<S>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, PaymentError>
where
    S: TransactionalStore,
{
    let (cancel, _guard) = request_cancellation();
    let purged = order_records_usecase
        .purge_user_instruments(auth.user_id, &cancel)
        .await?;

    Ok(Json(purged))
}
