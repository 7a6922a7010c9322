use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    application::{
        cancellation::{guarded, guarded_write},
        errors::{PaymentError, UseCaseResult, internal},
        validation::{parse_identifier, parse_status},
    },
    domain::{
        entities::payment_attempts::{
            InsertPaymentAttemptEntity, PaymentAttemptEntity, UpdatePaymentAttemptEntity,
        },
        policies::{
            authorization::{AuthorizationPolicy, Capability},
            status_transitions::StatusTransitionPolicy,
        },
        repositories::{
            payment_attempts::PaymentAttemptRepository,
            payment_informations::PaymentInformationRepository,
        },
        value_objects::{
            caller::Caller,
            enums::payment_statuses::PaymentStatus,
            identifiers::new_id,
            payment_attempts::{CreatedPaymentAttemptModel, PaymentAttemptModel},
        },
    },
};

pub struct PaymentAttemptUseCase<A, I>
where
    A: PaymentAttemptRepository + Send + Sync,
    I: PaymentInformationRepository + Send + Sync,
{
    payment_attempt_repository: Arc<A>,
    payment_information_repository: Arc<I>,
    authorization_policy: Arc<dyn AuthorizationPolicy>,
    transition_policy: Arc<dyn StatusTransitionPolicy>,
}

impl<A, I> PaymentAttemptUseCase<A, I>
where
    A: PaymentAttemptRepository + Send + Sync,
    I: PaymentInformationRepository + Send + Sync,
{
    pub fn new(
        payment_attempt_repository: Arc<A>,
        payment_information_repository: Arc<I>,
        authorization_policy: Arc<dyn AuthorizationPolicy>,
        transition_policy: Arc<dyn StatusTransitionPolicy>,
    ) -> Self {
        Self {
            payment_attempt_repository,
            payment_information_repository,
            authorization_policy,
            transition_policy,
        }
    }

    /// Opens a `pending` attempt whose method is copied from the instrument.
    pub async fn create_attempt(
        &self,
        caller: Caller,
        order_id: &str,
        payment_information_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<CreatedPaymentAttemptModel> {
        if !self
            .authorization_policy
            .permits(caller.role, Capability::CreatePaymentAttempt)
        {
            warn!(
                user_id = %caller.user_id,
                role = %caller.role,
                "payment_attempts: create rejected for role"
            );
            return Err(PaymentError::Forbidden(
                "only patients can create payment attempts".to_string(),
            ));
        }

        let order_id = parse_identifier(order_id, "order ID")?;
        let payment_information_id =
            parse_identifier(payment_information_id, "payment information ID")?;

        let payment_information = guarded(cancel, "loading payment information", || {
            self.payment_information_repository
                .find_by_id(payment_information_id)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("payment information not found"))?;

        info!(
            %order_id,
            %payment_information_id,
            method = %payment_information.payment_type,
            "payment_attempts: creating attempt"
        );

        let insert_payment_attempt_entity = InsertPaymentAttemptEntity {
            id: new_id(),
            order_id,
            payment_information_id: Some(payment_information.id),
            method: payment_information.payment_type,
            status: PaymentStatus::Pending.to_string(),
            created_at: Utc::now(),
        };

        let created = guarded_write(cancel, "creating payment attempt", || {
            self.payment_attempt_repository
                .create(insert_payment_attempt_entity)
        })
        .await?;

        info!(payment_attempt_id = %created.id, "payment_attempts: created");
        Ok(CreatedPaymentAttemptModel {
            payment_attempt_id: created.id,
        })
    }

    pub async fn get_attempt(
        &self,
        payment_attempt_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentAttemptModel> {
        let payment_attempt_id = parse_identifier(payment_attempt_id, "payment attempt ID")?;
        let entity = self.load(payment_attempt_id, cancel).await?;
        to_model(entity)
    }

    /// Status is validated before the id so a bad status never touches the store.
    pub async fn update_attempt_status(
        &self,
        payment_attempt_id: &str,
        status: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentAttemptModel> {
        let next = parse_status(status)?;
        let payment_attempt_id = parse_identifier(payment_attempt_id, "payment attempt ID")?;

        let existing = self.load(payment_attempt_id, cancel).await?;
        let current = to_model(existing)?.status;

        if !self.transition_policy.allows(current, next) {
            warn!(
                %payment_attempt_id,
                from = %current,
                to = %next,
                "payment_attempts: transition rejected by policy"
            );
            return Err(PaymentError::invalid_input(format!(
                "payment attempt cannot move from {current} to {next}"
            )));
        }

        info!(
            %payment_attempt_id,
            from = %current,
            to = %next,
            "payment_attempts: updating status"
        );

        let update_payment_attempt_entity = UpdatePaymentAttemptEntity {
            status: Some(next.to_string()),
        };

        let updated = guarded_write(cancel, "updating payment attempt", || {
            self.payment_attempt_repository
                .update(payment_attempt_id, update_payment_attempt_entity)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("payment attempt not found"))?;

        to_model(updated)
    }

    pub async fn list_by_order(
        &self,
        order_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<Vec<PaymentAttemptModel>> {
        let order_id = parse_identifier(order_id, "order ID")?;
        info!(%order_id, "payment_attempts: listing for order");
        let entities = guarded(cancel, "listing payment attempts of order", || {
            self.payment_attempt_repository.find_by_order_id(order_id)
        })
        .await?;
        to_models(entities)
    }

    pub async fn list_by_order_and_status(
        &self,
        order_id: &str,
        status: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<Vec<PaymentAttemptModel>> {
        let order_id = parse_identifier(order_id, "order ID")?;
        let status = parse_status(status)?;
        info!(%order_id, %status, "payment_attempts: listing for order by status");
        let entities = guarded(cancel, "listing payment attempts of order by status", || {
            self.payment_attempt_repository
                .find_by_order_id_and_status(order_id, status.to_string())
        })
        .await?;
        to_models(entities)
    }

    pub async fn list_all(
        &self,
        cancel: &CancellationToken,
    ) -> UseCaseResult<Vec<PaymentAttemptModel>> {
        let entities = guarded(cancel, "listing payment attempts", || {
            self.payment_attempt_repository.find_all()
        })
        .await?;
        to_models(entities)
    }

    pub async fn delete_attempt(
        &self,
        payment_attempt_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<Uuid> {
        let payment_attempt_id = parse_identifier(payment_attempt_id, "payment attempt ID")?;
        self.load(payment_attempt_id, cancel).await?;

        guarded_write(cancel, "deleting payment attempt", || {
            self.payment_attempt_repository.delete(payment_attempt_id)
        })
        .await?;

        info!(%payment_attempt_id, "payment_attempts: deleted");
        Ok(payment_attempt_id)
    }

    /// Removes every attempt of the order; returns how many rows went.
    pub async fn delete_by_order(
        &self,
        order_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<usize> {
        let order_id = parse_identifier(order_id, "order ID")?;
        let removed = guarded_write(cancel, "deleting payment attempts of order", || {
            self.payment_attempt_repository.delete_by_order_id(order_id)
        })
        .await?;

        info!(%order_id, removed, "payment_attempts: deleted for order");
        Ok(removed)
    }

    async fn load(
        &self,
        payment_attempt_id: Uuid,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentAttemptEntity> {
        guarded(cancel, "loading payment attempt", || {
            self.payment_attempt_repository.find_by_id(payment_attempt_id)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("payment attempt not found"))
    }
}

fn to_model(entity: PaymentAttemptEntity) -> UseCaseResult<PaymentAttemptModel> {
    PaymentAttemptModel::try_from(entity).map_err(internal("decoding payment attempt"))
}

fn to_models(entities: Vec<PaymentAttemptEntity>) -> UseCaseResult<Vec<PaymentAttemptModel>> {
    entities.into_iter().map(to_model).collect()
}
