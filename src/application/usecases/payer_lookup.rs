use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    application::{
        cancellation::guarded,
        errors::{PaymentError, UseCaseResult},
        interfaces::{
            appointment_directory::{AppointmentDirectory, LatestAppointment},
            user_directory::{PatientProfile, UserDirectory},
        },
        validation::parse_identifier,
    },
    domain::repositories::payment_informations::PaymentInformationRepository,
};

/// Resolves payer context held by the user and appointment services.
pub struct PayerLookupUseCase<I, U, Ap>
where
    I: PaymentInformationRepository + Send + Sync,
    U: UserDirectory,
    Ap: AppointmentDirectory,
{
    payment_information_repository: Arc<I>,
    user_directory: Arc<U>,
    appointment_directory: Arc<Ap>,
}

impl<I, U, Ap> PayerLookupUseCase<I, U, Ap>
where
    I: PaymentInformationRepository + Send + Sync,
    U: UserDirectory,
    Ap: AppointmentDirectory,
{
    pub fn new(
        payment_information_repository: Arc<I>,
        user_directory: Arc<U>,
        appointment_directory: Arc<Ap>,
    ) -> Self {
        Self {
            payment_information_repository,
            user_directory,
            appointment_directory,
        }
    }

    pub async fn owner_profile(
        &self,
        payment_information_id: &str,
        access_token: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PatientProfile> {
        let payment_information_id =
            parse_identifier(payment_information_id, "payment information ID")?;

        let payment_information = guarded(cancel, "loading payment information", || {
            self.payment_information_repository
                .find_by_id(payment_information_id)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("payment information not found"))?;

        let owner_id = payment_information.user_id;
        info!(%payment_information_id, %owner_id, "payer_lookup: resolving owner profile");

        guarded(cancel, "fetching patient profile", || {
            self.user_directory
                .find_patient_profile(owner_id, access_token)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("patient profile not found"))
    }

    pub async fn latest_appointment(
        &self,
        access_token: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<LatestAppointment> {
        info!("payer_lookup: fetching latest appointment");

        guarded(cancel, "fetching latest appointment", || {
            self.appointment_directory.latest_appointment(access_token)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("latest appointment not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::interfaces::{
            appointment_directory::MockAppointmentDirectory, user_directory::MockUserDirectory,
        },
        domain::{
            entities::payment_informations::PaymentInformationEntity,
            repositories::payment_informations::MockPaymentInformationRepository,
            value_objects::identifiers::new_id,
        },
    };
    use chrono::Utc;
    use mockall::predicate::eq;
    use serde_json::json;

    type TestUseCase = PayerLookupUseCase<
        MockPaymentInformationRepository,
        MockUserDirectory,
        MockAppointmentDirectory,
    >;

    fn usecase(
        informations: MockPaymentInformationRepository,
        users: MockUserDirectory,
        appointments: MockAppointmentDirectory,
    ) -> TestUseCase {
        PayerLookupUseCase::new(
            Arc::new(informations),
            Arc::new(users),
            Arc::new(appointments),
        )
    }

    #[tokio::test]
    async fn owner_profile_asks_for_the_instrument_owner() {
        let owner_id = new_id();
        let info = PaymentInformationEntity {
            id: new_id(),
            user_id: owner_id,
            payment_type: "credit_card".to_string(),
            details: json!({}),
            version: 1,
            created_at: Utc::now(),
        };
        let info_id = info.id;

        let mut informations = MockPaymentInformationRepository::new();
        informations
            .expect_find_by_id()
            .with(eq(info_id))
            .returning(move |_| Ok(Some(info.clone())));

        let mut users = MockUserDirectory::new();
        users
            .expect_find_patient_profile()
            .withf(move |patient_id, token| {
                *patient_id == owner_id && token.to_string() == "token-123"
            })
            .times(1)
            .returning(|patient_id, _| {
                Ok(Some(PatientProfile {
                    id: patient_id,
                    first_name: "Somchai".to_string(),
                    last_name: "Jaidee".to_string(),
                    gender: None,
                    phone_number: None,
                    username: None,
                }))
            });

        let profile = usecase(informations, users, MockAppointmentDirectory::new())
            .owner_profile(&info_id.to_string(), "token-123", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(profile.id, owner_id);
    }

    #[tokio::test]
    async fn remote_not_found_and_failure_are_mapped() {
        let mut appointments = MockAppointmentDirectory::new();
        appointments
            .expect_latest_appointment()
            .times(1)
            .returning(|_| Ok(None));
        let uc = usecase(
            MockPaymentInformationRepository::new(),
            MockUserDirectory::new(),
            appointments,
        );
        let result = uc.latest_appointment("token", &CancellationToken::new()).await;
        assert!(matches!(result, Err(PaymentError::NotFound(_))));

        let mut appointments = MockAppointmentDirectory::new();
        appointments
            .expect_latest_appointment()
            .returning(|_| Err(anyhow::anyhow!("503 from appointment service")));
        let uc = usecase(
            MockPaymentInformationRepository::new(),
            MockUserDirectory::new(),
            appointments,
        );
        let result = uc.latest_appointment("token", &CancellationToken::new()).await;
        assert!(matches!(result, Err(PaymentError::Internal { .. })));
    }
}
