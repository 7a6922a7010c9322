use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::{
    application::{
        cancellation::{guarded, guarded_write},
        errors::UseCaseResult,
        validation::parse_identifier,
    },
    domain::{
        repositories::transaction::TransactionalStore,
        value_objects::{
            order_records::{OrderPaymentSummaryModel, PurgedInstrumentsModel, PurgedOrderModel},
            payment_attempts::PaymentAttemptModel,
            payments::PaymentModel,
        },
    },
};

/// Maintenance spanning several tables, run through the store's transactions.
pub struct OrderPaymentRecordsUseCase<S>
where
    S: TransactionalStore,
{
    store: Arc<S>,
}

impl<S> OrderPaymentRecordsUseCase<S>
where
    S: TransactionalStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Deletes the payments and then the attempts of an order, all or nothing.
    pub async fn purge_order(
        &self,
        order_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PurgedOrderModel> {
        let order_id = parse_identifier(order_id, "order ID")?;
        info!(%order_id, "order_records: purging order");

        let (payments_removed, attempts_removed) =
            guarded_write(cancel, "purging order payment records", || {
                self.store.transaction(move |scope| {
                    let payments = scope.delete_payments_by_order(order_id)?;
                    let attempts = scope.delete_payment_attempts_by_order(order_id)?;
                    Ok((payments, attempts))
                })
            })
            .await?;

        info!(
            %order_id,
            payments_removed,
            attempts_removed,
            "order_records: order purged"
        );
        Ok(PurgedOrderModel {
            order_id,
            payments_removed,
            attempts_removed,
        })
    }

    pub async fn purge_user_instruments(
        &self,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> UseCaseResult<PurgedInstrumentsModel> {
        info!(%user_id, "order_records: purging payment information of user");

        let removed = guarded_write(cancel, "purging payment information of user", || {
            self.store
                .transaction(move |scope| scope.delete_payment_informations_by_user(user_id))
        })
        .await?;

        info!(%user_id, removed, "order_records: payment information purged");
        Ok(PurgedInstrumentsModel { user_id, removed })
    }

    /// Attempts and payments of an order read on one scope, with the amount paid.
    pub async fn order_summary(
        &self,
        order_id: &str,
        cancel: &CancellationToken,
    ) -> UseCaseResult<OrderPaymentSummaryModel> {
        let order_id = parse_identifier(order_id, "order ID")?;

        guarded(cancel, "summarizing order payments", || {
            self.store.scoped(move |scope| -> Result<OrderPaymentSummaryModel> {
                let attempts = scope
                    .find_payment_attempts_by_order(order_id, None)?
                    .into_iter()
                    .map(PaymentAttemptModel::try_from)
                    .collect::<Result<Vec<_>>>()?;
                let payments: Vec<PaymentModel> = scope
                    .find_payments_by_order(order_id)?
                    .into_iter()
                    .map(PaymentModel::from)
                    .collect();
                let total_paid = payments.iter().map(|payment| payment.amount).sum::<Decimal>();

                Ok(OrderPaymentSummaryModel {
                    order_id,
                    attempts,
                    payments,
                    total_paid,
                })
            })
        })
        .await
    }
}
