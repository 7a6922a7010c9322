use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};

use super::request_cancellation;
use crate::{
    application::{
        errors::PaymentError,
        interfaces::{appointment_directory::AppointmentDirectory, user_directory::UserDirectory},
        usecases::payer_lookup::PayerLookupUseCase,
    },
    config::config_model::SiblingServices,
    domain::repositories::payment_informations::PaymentInformationRepository,
    infrastructure::{
        axum_http::auth::AuthUser,
        clients::{appointment_client::AppointmentClient, user_client::UserClient},
        postgres::{postgres_connection::PgPoolSquad, store::PaymentPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, sibling_services: &SiblingServices) -> Router {
    let payer_lookup_usecase = PayerLookupUseCase::new(
        Arc::new(PaymentPostgres::new(db_pool)),
        Arc::new(UserClient::new(sibling_services.user_service_url.as_str())),
        Arc::new(AppointmentClient::new(
            sibling_services.appointment_service_url.as_str(),
        )),
    );

    Router::new()
        .route(
            "/info/:id/owner",
            get(owner_profile::<PaymentPostgres, UserClient, AppointmentClient>),
        )
        .route(
            "/appointments/latest",
            get(latest_appointment::<PaymentPostgres, UserClient, AppointmentClient>),
        )
        .with_state(Arc::new(payer_lookup_usecase))
}

pub async fn owner_profile<I, U, Ap>(
    State(payer_lookup_usecase): State<Arc<PayerLookupUseCase<I, U, Ap>>>,
    auth: AuthUser,
    Path(payment_information_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError>
where
    I: PaymentInformationRepository + Send + Sync,
    U: UserDirectory,
    Ap: AppointmentDirectory,
{
    let (cancel, _guard) = request_cancellation();
    let profile = payer_lookup_usecase
        .owner_profile(&payment_information_id, &auth.access_token, &cancel)
        .await?;

    Ok(Json(profile))
}

pub async fn latest_appointment<I, U, Ap>(
    State(payer_lookup_usecase): State<Arc<PayerLookupUseCase<I, U, Ap>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, PaymentError>
where
    I: PaymentInformationRepository + Send + Sync,
    U: UserDirectory,
    Ap: AppointmentDirectory,
{
    let (cancel, _guard) = request_cancellation();
    let appointment = payer_lookup_usecase
        .latest_appointment(&auth.access_token, &cancel)
        .await?;

    Ok(Json(appointment))
}
