use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    application::{
        cancellation::{guarded, guarded_write},
        errors::{PaymentError, UseCaseResult, internal},
        validation::{parse_identifier, parse_method},
    },
    domain::{
        entities::payment_informations::{
            InsertPaymentInformationEntity, PaymentInformationEntity,
            UpdatePaymentInformationEntity,
        },
        policies::authorization::{AuthorizationPolicy, Capability},
        repositories::payment_informations::PaymentInformationRepository,
        value_objects::{
            caller::Caller,
            enums::payment_methods::PaymentMethod,
            identifiers::new_id,
            payment_informations::{
                DeletedPaymentInformationModel, PaymentInformationModel,
                UpdatePaymentInformationModel,
            },
        },
    },
};

const INITIAL_VERSION: i32 = 1;

pub struct PaymentInformationUseCase<T>
where
    T: PaymentInformationRepository + Send + Sync,
{
    payment_information_repository: Arc<T>,
    authorization_policy: Arc<dyn AuthorizationPolicy>,
}

impl<T> PaymentInformationUseCase<T>
where
    T: PaymentInformationRepository + Send + Sync,
{
    pub fn new(
        payment_information_repository: Arc<T>,
        authorization_policy: Arc<dyn AuthorizationPolicy>,
    ) -> Self {
        Self {
            payment_information_repository,
            authorization_policy,
        }
    }

    pub async fn create<D>(
        &self,
        caller: Caller,
        payment_method: PaymentMethod,
        details: &D,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentInformationModel>
    where
        D: Serialize + ?Sized + Sync,
    {
        if !self
            .authorization_policy
            .permits(caller.role, Capability::ManagePaymentInformation)
        {
            warn!(
                user_id = %caller.user_id,
                role = %caller.role,
                "payment_informations: create rejected for role"
            );
            return Err(PaymentError::Forbidden(
                "only patients can create payment information".to_string(),
            ));
        }

        let details = serde_json::to_value(details)
            .map_err(|err| PaymentError::invalid_input(format!("invalid payment details: {err}")))?;

        info!(
            user_id = %caller.user_id,
            %payment_method,
            "payment_informations: creating payment information"
        );

        let insert_payment_information_entity = InsertPaymentInformationEntity {
            id: new_id(),
            user_id: caller.user_id,
            payment_type: payment_method.to_string(),
            details,
            version: INITIAL_VERSION,
            created_at: Utc::now(),
        };

        let created = guarded_write(cancel, "creating payment information", || {
            self.payment_information_repository
                .create(insert_payment_information_entity)
        })
        .await?;

        info!(payment_information_id = %created.id, "payment_informations: created");
        to_model(created)
    }

    pub async fn get_by_id(
        &self,
        payment_information_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentInformationModel> {
        let payment_information_id =
            parse_identifier(payment_information_id, "payment information ID")?;
        let entity = self.load(payment_information_id, cancel).await?;
        to_model(entity)
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> UseCaseResult<Vec<PaymentInformationModel>> {
        info!(%user_id, "payment_informations: listing for user");
        let entities = guarded(cancel, "listing payment information of user", || {
            self.payment_information_repository.find_by_user_id(user_id)
        })
        .await?;
        to_models(entities)
    }

    pub async fn list_by_user_and_method(
        &self,
        user_id: Uuid,
        payment_method: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<Vec<PaymentInformationModel>> {
        let payment_method = parse_method(payment_method)?;
        info!(%user_id, %payment_method, "payment_informations: listing for user by method");
        let entities = guarded(cancel, "listing payment information of user by method", || {
            self.payment_information_repository
                .find_by_user_id_and_type(user_id, payment_method.to_string())
        })
        .await?;
        to_models(entities)
    }

    pub async fn list_all(
        &self,
        cancel: &CancellationToken,
    ) -> UseCaseResult<Vec<PaymentInformationModel>> {
        let entities = guarded(cancel, "listing payment information", || {
            self.payment_information_repository.find_all()
        })
        .await?;
        info!(count = entities.len(), "payment_informations: listed all");
        to_models(entities)
    }

    /// Applies the present fields and bumps `version` by one. Last writer wins.
    pub async fn update(
        &self,
        payment_information_id: &str,
        changes: UpdatePaymentInformationModel,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentInformationModel> {
        let payment_information_id =
            parse_identifier(payment_information_id, "payment information ID")?;
        let existing = self.load(payment_information_id, cancel).await?;

        let update_payment_information_entity = UpdatePaymentInformationEntity {
            payment_type: changes.payment_method.map(|method| method.to_string()),
            details: changes.details,
            version: Some(existing.version + 1),
        };

        info!(
            %payment_information_id,
            version = existing.version + 1,
            "payment_informations: updating"
        );

        let updated = guarded_write(cancel, "updating payment information", || {
            self.payment_information_repository
                .update(payment_information_id, update_payment_information_entity)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("payment information not found"))?;

        to_model(updated)
    }

    pub async fn delete(
        &self,
        payment_information_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<DeletedPaymentInformationModel> {
        let payment_information_id =
            parse_identifier(payment_information_id, "payment information ID")?;
        self.load(payment_information_id, cancel).await?;

        guarded_write(cancel, "deleting payment information", || {
            self.payment_information_repository
                .delete(payment_information_id)
        })
        .await?;

        info!(%payment_information_id, "payment_informations: deleted");
        Ok(DeletedPaymentInformationModel {
            id: payment_information_id,
            deleted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }

    async fn load(
        &self,
        payment_information_id: Uuid,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentInformationEntity> {
        guarded(cancel, "loading payment information", || {
            self.payment_information_repository
                .find_by_id(payment_information_id)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("payment information not found"))
    }
}

fn to_model(entity: PaymentInformationEntity) -> UseCaseResult<PaymentInformationModel> {
    PaymentInformationModel::try_from(entity).map_err(internal("decoding payment information"))
}

fn to_models(
    entities: Vec<PaymentInformationEntity>,
) -> UseCaseResult<Vec<PaymentInformationModel>> {
    entities.into_iter().map(to_model).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        policies::authorization::PatientOnlyPolicy,
        repositories::payment_informations::MockPaymentInformationRepository,
        value_objects::enums::roles::Role,
    };
    use mockall::predicate::eq;
    use serde_json::json;

    fn entity(user_id: Uuid, version: i32) -> PaymentInformationEntity {
        PaymentInformationEntity {
            id: new_id(),
            user_id,
            payment_type: "credit_card".to_string(),
            details: json!({ "last4": "4242" }),
            version,
            created_at: Utc::now(),
        }
    }

    fn usecase(
        repo: MockPaymentInformationRepository,
    ) -> PaymentInformationUseCase<MockPaymentInformationRepository> {
        PaymentInformationUseCase::new(Arc::new(repo), Arc::new(PatientOnlyPolicy))
    }

    #[tokio::test]
    async fn create_starts_at_version_one() {
        let user_id = new_id();
        let mut repo = MockPaymentInformationRepository::new();
        repo.expect_create()
            .withf(move |entity| {
                entity.user_id == user_id
                    && entity.version == 1
                    && entity.payment_type == "promptpay"
            })
            .times(1)
            .returning(|entity| Ok(entity.into()));

        let created = usecase(repo)
            .create(
                Caller::new(user_id, Role::Patient),
                PaymentMethod::PromptPay,
                &json!({ "phone": "0812345678" }),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(created.version, 1);
        assert_eq!(created.user_id, user_id);
        assert_eq!(created.payment_method, PaymentMethod::PromptPay);
    }

    #[tokio::test]
    async fn create_is_forbidden_for_non_patients() {
        let mut repo = MockPaymentInformationRepository::new();
        repo.expect_create().never();

        let result = usecase(repo)
            .create(
                Caller::new(new_id(), Role::Doctor),
                PaymentMethod::CreditCard,
                &json!({}),
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(result, Err(PaymentError::Forbidden(_))));
    }

    #[tokio::test]
    async fn update_bumps_version_and_keeps_absent_fields() {
        let existing = entity(new_id(), 3);
        let id = existing.id;
        let mut repo = MockPaymentInformationRepository::new();
        let found = existing.clone();
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        let stored = existing.clone();
        repo.expect_update()
            .withf(move |row_id, changes| {
                *row_id == id
                    && changes.version == Some(4)
                    && changes.payment_type.is_none()
                    && changes.details == Some(json!({ "last4": "1111" }))
            })
            .times(1)
            .returning(move |_, changes| {
                let mut row = stored.clone();
                row.apply(changes);
                Ok(Some(row))
            });

        let updated = usecase(repo)
            .update(
                &id.to_string(),
                UpdatePaymentInformationModel {
                    payment_method: None,
                    details: Some(json!({ "last4": "1111" })),
                },
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(updated.version, 4);
        assert_eq!(updated.payment_method, PaymentMethod::CreditCard);
    }

    #[tokio::test]
    async fn delete_of_missing_instrument_is_not_found() {
        let mut repo = MockPaymentInformationRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let result = usecase(repo)
            .delete(&new_id().to_string(), &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(PaymentError::NotFound(_))));
    }

    #[tokio::test]
    async fn malformed_id_never_reaches_the_store() {
        let mut repo = MockPaymentInformationRepository::new();
        repo.expect_find_by_id().never();

        let result = usecase(repo)
            .get_by_id("not-a-uuid", &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(PaymentError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let mut repo = MockPaymentInformationRepository::new();
        repo.expect_find_all()
            .returning(|| Err(anyhow::anyhow!("connection reset")));

        let result = usecase(repo).list_all(&CancellationToken::new()).await;

        assert!(matches!(result, Err(PaymentError::Internal { .. })));
    }

    #[tokio::test]
    async fn list_by_method_rejects_unknown_method() {
        let mut repo = MockPaymentInformationRepository::new();
        repo.expect_find_by_user_id_and_type().never();

        let result = usecase(repo)
            .list_by_user_and_method(new_id(), "cash", &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(PaymentError::InvalidInput(_))));
    }
}
