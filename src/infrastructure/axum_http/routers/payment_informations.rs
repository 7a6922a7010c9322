use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use super::request_cancellation;
use crate::{
    application::{errors::PaymentError, usecases::payment_informations::PaymentInformationUseCase},
    domain::{
        policies::authorization::PatientOnlyPolicy,
        repositories::payment_informations::PaymentInformationRepository,
        value_objects::payment_informations::{
            CreatePaymentInformationRequest, ListPaymentInformationQuery,
            UpdatePaymentInformationRequest,
        },
    },
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{postgres_connection::PgPoolSquad, store::PaymentPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let payment_information_repository = PaymentPostgres::new(db_pool);
    let payment_information_usecase = PaymentInformationUseCase::new(
        Arc::new(payment_information_repository),
        Arc::new(PatientOnlyPolicy),
    );

    Router::new()
        .route(
            "/info",
            post(create::<PaymentPostgres>)
                .put(update::<PaymentPostgres>)
                .get(list_mine::<PaymentPostgres>),
        )
        .route("/info/all", get(list_all::<PaymentPostgres>))
        .route(
            "/info/:id",
            get(get_by_id::<PaymentPostgres>).delete(delete::<PaymentPostgres>),
        )
        .with_state(Arc::new(payment_information_usecase))
}

pub async fn create<T>(
    State(payment_information_usecase): State<Arc<PaymentInformationUseCase<T>>>,
    auth: AuthUser,
    Json(create_payment_information_request): Json<CreatePaymentInformationRequest>,
) -> Result<impl IntoResponse, PaymentError>
where
    T: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let created = payment_information_usecase
        .create(
            auth.caller(),
            create_payment_information_request.payment_method,
            &create_payment_information_request.details,
            &cancel,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<T>(
    State(payment_information_usecase): State<Arc<PaymentInformationUseCase<T>>>,
    _auth: AuthUser,
    Json(update_payment_information_request): Json<UpdatePaymentInformationRequest>,
) -> Result<impl IntoResponse, PaymentError>
where
    T: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let updated = payment_information_usecase
        .update(
            &update_payment_information_request.id,
            update_payment_information_request.changes,
            &cancel,
        )
        .await?;

    Ok(Json(updated))
}

pub async fn delete<T>(
    State(payment_information_usecase): State<Arc<PaymentInformationUseCase<T>>>,
    _auth: AuthUser,
    Path(payment_information_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    T: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let deleted = payment_information_usecase
        .delete(&payment_information_id, &cancel)
        .await?;

    Ok(Json(deleted))
}

pub async fn list_mine<T>(
    State(payment_information_usecase): State<Arc<PaymentInformationUseCase<T>>>,
    auth: AuthUser,
    Query(query): Query<ListPaymentInformationQuery>,
) -> Result<impl IntoResponse, PaymentError>
where
    T: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let payment_informations = match query.method.as_deref() {
        Some(method) => {
            payment_information_usecase
                .list_by_user_and_method(auth.user_id, method, &cancel)
                .await?
        }
        None => {
            payment_information_usecase
                .list_by_user(auth.user_id, &cancel)
                .await?
        }
    };

    Ok(Json(payment_informations))
}

pub async fn list_all<T>(
    State(payment_information_usecase): State<Arc<PaymentInformationUseCase<T>>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, PaymentError>
where
    T: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let payment_informations = payment_information_usecase.list_all(&cancel).await?;

    Ok(Json(payment_informations))
}

pub async fn get_by_id<T>(
    State(payment_information_usecase): State<Arc<PaymentInformationUseCase<T>>>,
    _auth: AuthUser,
    Path(payment_information_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    T: PaymentInformationRepository + Send + Sync,
{
    let (cancel, _guard) = request_cancellation();
    let payment_information = payment_information_usecase
        .get_by_id(&payment_information_id, &cancel)
        .await?;

    Ok(Json(payment_information))
}
