use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use super::request_cancellation;
use crate::{
    application::{errors::PaymentError, usecases::payment_attempts::PaymentAttemptUseCase},
    config::config_model::PaymentPolicies,
    domain::{
        policies::authorization::PatientOnlyPolicy,
        repositories::{
            payment_attempts::PaymentAttemptRepository,
            payment_informations::PaymentInformationRepository,
        },
        value_objects::payment_attempts::{
            CreatePaymentAttemptRequest, ListPaymentAttemptsQuery, UpdatePaymentAttemptRequest,
        },
    },
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{postgres_connection::PgPoolSquad, store::PaymentPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, payment_policies: &PaymentPolicies) -> Router {
    let payment_repository = Arc::new(PaymentPostgres::new(db_pool));
    let payment_attempt_usecase = PaymentAttemptUseCase::new(
        Arc::clone(&payment_repository),
        payment_repository,
        Arc::new(PatientOnlyPolicy),
        payment_policies.status_transitions.build(),
    );

    Router::new()
        .route(
            "/attempt",
            post(create_attempt::<PaymentPostgres, PaymentPostgres>)
                .patch(update_attempt_status::<PaymentPostgres, PaymentPostgres>),
        )
        .route(
            "/attempt/:id",
            get(get_attempt::<PaymentPostgres, PaymentPostgres>)
                .delete(delete_attempt::<PaymentPostgres, PaymentPostgres>),
        )
        .route(
            "/attempt/order/:order_id",
            get(list_by_order::<PaymentPostgres, PaymentPostgres>)
                .delete(delete_by_order::<PaymentPostgres, PaymentPostgres>),
        )
        .with_state(Arc::new(payment_attempt_usecase))
}

pub async fn create_attempt<A, I>(
    State(payment_attempt_usecase): State<Arc<PaymentAttemptUseCase<A, I>>>,
    auth: AuthUser,
    Json(create_payment_attempt_request): Json<CreatePaymentAttemptRequest>,
) -> Result<impl IntoResponse, PaymentError>
where
    A: PaymentAttemptRepository + Send + Sync,
    I: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let created = payment_attempt_usecase
        .create_attempt(
            auth.caller(),
            &create_payment_attempt_request.order_id,
            &create_payment_attempt_request.payment_info_id,
            &cancel,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_attempt<A, I>(
    State(payment_attempt_usecase): State<Arc<PaymentAttemptUseCase<A, I>>>,
    _auth: AuthUser,
    Path(payment_attempt_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    A: PaymentAttemptRepository + Send + Sync,
    I: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let attempt = payment_attempt_usecase
        .get_attempt(&payment_attempt_id, &cancel)
        .await?;

    Ok(Json(attempt))
}

pub async fn update_attempt_status<A, I>(
    State(payment_attempt_usecase): State<Arc<PaymentAttemptUseCase<A, I>>>,
    _auth: AuthUser,
    Json(update_payment_attempt_request): Json<UpdatePaymentAttemptRequest>,
) -> Result<impl IntoResponse, PaymentError>
where
    A: PaymentAttemptRepository + Send + Sync,
    I: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let attempt = payment_attempt_usecase
        .update_attempt_status(
            &update_payment_attempt_request.payment_attempt_id,
            &update_payment_attempt_request.status,
            &cancel,
        )
        .await?;

    Ok(Json(attempt))
}

pub async fn list_by_order<A, I>(
    State(payment_attempt_usecase): State<Arc<PaymentAttemptUseCase<A, I>>>,
    _auth: AuthUser,
    Path(order_id): Path<String>,
    Query(query): Query<ListPaymentAttemptsQuery>,
) -> Result<impl IntoResponse, PaymentError>
where
    A: PaymentAttemptRepository + Send + Sync,
    I: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let attempts = match query.status.as_deref() {
        Some(status) => {
            payment_attempt_usecase
                .list_by_order_and_status(&order_id, status, &cancel)
                .await?
        }
        None => payment_attempt_usecase.list_by_order(&order_id, &cancel).await?,
    };

    Ok(Json(attempts))
}

pub async fn delete_attempt<A, I>(
    State(payment_attempt_usecase): State<Arc<PaymentAttemptUseCase<A, I>>>,
    _auth: AuthUser,
    Path(payment_attempt_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    A: PaymentAttemptRepository + Send + Sync,
    I: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let deleted_id = payment_attempt_usecase
        .delete_attempt(&payment_attempt_id, &cancel)
        .await?;

    Ok(Json(json!({ "payment_attempt_id": deleted_id })))
}

pub async fn delete_by_order<A, I>(
    State(payment_attempt_usecase): State<Arc<PaymentAttemptUseCase<A, I>>>,
    _auth: AuthUser,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    A: PaymentAttemptRepository + Send + Sync,
    I: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let removed = payment_attempt_usecase
        .delete_by_order(&order_id, &cancel)
        .await?;

    Ok(Json(json!({ "order_id": order_id, "removed": removed })))
}
