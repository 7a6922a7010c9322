use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    application::{
        cancellation::{guarded, guarded_write},
        errors::{PaymentError, UseCaseResult, internal},
        validation::parse_identifier,
    },
    domain::{
        entities::payments::{InsertPaymentEntity, PaymentEntity, UpdatePaymentEntity},
        policies::payment_cardinality::PaymentCardinalityPolicy,
        repositories::{payment_attempts::PaymentAttemptRepository, payments::PaymentRepository},
        value_objects::{
            enums::payment_statuses::PaymentStatus,
            identifiers::new_id,
            payment_attempts::PaymentAttemptModel,
            payments::{PaymentModel, UpdatePaymentModel},
        },
    },
};

fn ensure_non_negative(amount: Decimal) -> UseCaseResult<()> {
    if amount < Decimal::ZERO {
        return Err(PaymentError::invalid_input(
            "amount must be greater than or equal to zero",
        ));
    }
    Ok(())
}

pub struct PaymentUseCase<P, A>
where
    P: PaymentRepository + Send + Sync,
    A: PaymentAttemptRepository + Send + Sync,
{
    payment_repository: Arc<P>,
    payment_attempt_repository: Arc<A>,
    cardinality_policy: Arc<dyn PaymentCardinalityPolicy>,
}

impl<P, A> PaymentUseCase<P, A>
where
    P: PaymentRepository + Send + Sync,
    A: PaymentAttemptRepository + Send + Sync,
{
    pub fn new(
        payment_repository: Arc<P>,
        payment_attempt_repository: Arc<A>,
        cardinality_policy: Arc<dyn PaymentCardinalityPolicy>,
    ) -> Self {
        Self {
            payment_repository,
            payment_attempt_repository,
            cardinality_policy,
        }
    }

    /// Finalizes a successful attempt into a payment record.
    pub async fn create_payment(
        &self,
        attempt_id: &str,
        amount: Decimal,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentModel> {
        let attempt_id = parse_identifier(attempt_id, "attempt ID")?;
        ensure_non_negative(amount)?;

        let attempt = guarded(cancel, "loading payment attempt", || {
            self.payment_attempt_repository.find_by_id(attempt_id)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("payment attempt not found"))?;
        let attempt =
            PaymentAttemptModel::try_from(attempt).map_err(internal("decoding payment attempt"))?;

        if attempt.status != PaymentStatus::Success {
            warn!(
                %attempt_id,
                status = %attempt.status,
                "payments: refusing to finalize unsuccessful attempt"
            );
            return Err(PaymentError::invalid_input(
                "payment can only be created for successful attempts",
            ));
        }

        info!(
            %attempt_id,
            order_id = %attempt.order_id,
            %amount,
            "payments: creating payment"
        );

        let insert_payment_entity = InsertPaymentEntity {
            id: new_id(),
            attempt_id,
            order_id: attempt.order_id,
            amount,
            paid_at: Utc::now(),
        };

        let created = match self.cardinality_policy.max_payments_per_attempt() {
            Some(limit) => guarded_write(cancel, "creating payment", || {
                self.payment_repository
                    .create_capped(insert_payment_entity, limit)
            })
            .await?
            .ok_or_else(|| {
                warn!(%attempt_id, limit, "payments: attempt already finalized");
                PaymentError::invalid_input("payment attempt has already been finalized")
            })?,
            None => {
                guarded_write(cancel, "creating payment", || {
                    self.payment_repository.create(insert_payment_entity)
                })
                .await?
            }
        };

        info!(payment_id = %created.id, "payments: created");
        Ok(created.into())
    }

    pub async fn get_by_id(
        &self,
        payment_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentModel> {
        let payment_id = parse_identifier(payment_id, "payment ID")?;
        self.load(payment_id, cancel).await.map(PaymentModel::from)
    }

    pub async fn list_by_order(
        &self,
        order_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<Vec<PaymentModel>> {
        let order_id = parse_identifier(order_id, "order ID")?;
        let entities = guarded(cancel, "listing payments of order", || {
            self.payment_repository.find_by_order_id(order_id)
        })
        .await?;
        Ok(to_models(entities))
    }

    pub async fn list_by_attempt(
        &self,
        attempt_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<Vec<PaymentModel>> {
        let attempt_id = parse_identifier(attempt_id, "attempt ID")?;
        let entities = guarded(cancel, "listing payments of attempt", || {
            self.payment_repository.find_by_attempt_id(attempt_id)
        })
        .await?;
        Ok(to_models(entities))
    }

    pub async fn list_all(&self, cancel: &CancellationToken) -> UseCaseResult<Vec<PaymentModel>> {
        let entities = guarded(cancel, "listing payments", || {
            self.payment_repository.find_all()
        })
        .await?;
        Ok(to_models(entities))
    }

    /// Without an amount the stored payment is returned untouched.
    pub async fn update(
        &self,
        payment_id: &str,
        changes: UpdatePaymentModel,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentModel> {
        if let Some(amount) = changes.amount {
            ensure_non_negative(amount)?;
        }
        let payment_id = parse_identifier(payment_id, "payment ID")?;
        let existing = self.load(payment_id, cancel).await?;

        let Some(amount) = changes.amount else {
            return Ok(existing.into());
        };

        info!(%payment_id, %amount, "payments: updating amount");
        let update_payment_entity = UpdatePaymentEntity {
            amount: Some(amount),
        };

        let updated = guarded_write(cancel, "updating payment", || {
            self.payment_repository
                .update(payment_id, update_payment_entity)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("payment not found"))?;

        Ok(updated.into())
    }

    pub async fn delete(&self, payment_id: &str, cancel: &CancellationToken) -> UseCaseResult<Uuid> {
        let payment_id = parse_identifier(payment_id, "payment ID")?;
        self.load(payment_id, cancel).await?;

        guarded_write(cancel, "deleting payment", || {
            self.payment_repository.delete(payment_id)
        })
        .await?;

        info!(%payment_id, "payments: deleted");
        Ok(payment_id)
    }

    async fn load(
        &self,
        payment_id: Uuid,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PaymentEntity> {
        guarded(cancel, "loading payment", || {
            self.payment_repository.find_by_id(payment_id)
        })
        .await?
        .ok_or_else(|| PaymentError::not_found("payment not found"))
    }
}

fn to_models(entities: Vec<PaymentEntity>) -> Vec<PaymentModel> {
    entities.into_iter().map(PaymentModel::from).collect()
}
