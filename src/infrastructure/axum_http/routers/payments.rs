use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use super::request_cancellation;
use crate::{
    application::{errors::PaymentError, usecases::payments::PaymentUseCase},
    config::config_model::PaymentPolicies,
    domain::{
        repositories::{payment_attempts::PaymentAttemptRepository, payments::PaymentRepository},
        value_objects::payments::{CreatePaymentRequest, UpdatePaymentModel},
    },
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{postgres_connection::PgPoolSquad, store::PaymentPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, payment_policies: &PaymentPolicies) -> Router {
    let payment_repository = Arc::new(PaymentPostgres::new(db_pool));
    let payment_usecase = PaymentUseCase::new(
        Arc::clone(&payment_repository),
        payment_repository,
        payment_policies.cardinality.build(),
    );

    Router::new()
        .route(
            "/",
            post(create_payment::<PaymentPostgres, PaymentPostgres>)
                .get(list_all::<PaymentPostgres, PaymentPostgres>),
        )
        .route(
            "/:id",
            get(get_by_id::<PaymentPostgres, PaymentPostgres>)
                .patch(update::<PaymentPostgres, PaymentPostgres>)
                .delete(delete::<PaymentPostgres, PaymentPostgres>),
        )
        .route(
            "/order/:order_id",
            get(list_by_order::<PaymentPostgres, PaymentPostgres>),
        )
        .route(
            "/attempt/:id/payments",
            get(list_by_attempt::<PaymentPostgres, PaymentPostgres>),
        )
        .with_state(Arc::new(payment_usecase))
}

pub async fn create_payment<P, A>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, A>>>,
    _auth: AuthUser,
    Json(create_payment_request): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, PaymentError>
where
    P: PaymentRepository + Send + Sync,
    A: PaymentAttemptRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let payment = payment_usecase
        .create_payment(
            &create_payment_request.payment_attempt_id,
            create_payment_request.amount,
            &cancel,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn list_all<P, A>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, A>>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, PaymentError>
where
    P: PaymentRepository + Send + Sync,
    A: PaymentAttemptRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let payments = payment_usecase.list_all(&cancel).await?;

    Ok(Json(payments))
}

pub async fn get_by_id<P, A>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, A>>>,
    _auth: AuthUser,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    P: PaymentRepository + Send + Sync,
    A: PaymentAttemptRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let payment = payment_usecase.get_by_id(&payment_id, &cancel).await?;

    Ok(Json(payment))
}

pub async fn update<P, A>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, A>>>,
    _auth: AuthUser,
    Path(payment_id): Path<String>,
    Json(update_payment_model): Json<UpdatePaymentModel>,
) -> Result<impl IntoResponse, PaymentError>
where
    P: PaymentRepository + Send + Sync,
    A: PaymentAttemptRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let payment = payment_usecase
        .update(&payment_id, update_payment_model, &cancel)
        .await?;

    Ok(Json(payment))
}

pub async fn delete<P, A>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, A>>>,
    _auth: AuthUser,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    P: PaymentRepository + Send + Sync,
    A: PaymentAttemptRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let deleted_id = payment_usecase.delete(&payment_id, &cancel).await?;

    Ok(Json(json!({ "payment_id": deleted_id })))
}

pub async fn list_by_order<P, A>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, A>>>,
    _auth: AuthUser,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    P: PaymentRepository + Send + Sync,
    A: PaymentAttemptRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let payments = payment_usecase.list_by_order(&order_id, &cancel).await?;

    Ok(Json(payments))
}

pub async fn list_by_attempt<P, A>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, A>>>,
    _auth: AuthUser,
    Path(attempt_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    P: PaymentRepository + Send + Sync,
    A: PaymentAttemptRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let payments = payment_usecase.list_by_attempt(&attempt_id, &cancel).await?;

    Ok(Json(payments))
}
