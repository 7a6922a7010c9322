#![allow(dead_code)]

use std::sync::Arc;

use payment_service::{
    application::usecases::{
        order_records::OrderPaymentRecordsUseCase, payment_attempts::PaymentAttemptUseCase,
        payment_informations::PaymentInformationUseCase, payments::PaymentUseCase,
    },
    config::config_model::PaymentPolicies,
    domain::{
        policies::authorization::PatientOnlyPolicy,
        value_objects::{
            caller::Caller,
            enums::{payment_methods::PaymentMethod, roles::Role},
            identifiers::new_id,
            payment_informations::PaymentInformationModel,
        },
    },
    infrastructure::in_memory::InMemoryPaymentStore,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub struct Harness {
    pub store: Arc<InMemoryPaymentStore>,
    pub informations: PaymentInformationUseCase<InMemoryPaymentStore>,
    pub attempts: PaymentAttemptUseCase<InMemoryPaymentStore, InMemoryPaymentStore>,
    pub payments: PaymentUseCase<InMemoryPaymentStore, InMemoryPaymentStore>,
    pub records: OrderPaymentRecordsUseCase<InMemoryPaymentStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_policies(PaymentPolicies::default())
    }

    pub fn with_policies(policies: PaymentPolicies) -> Self {
        let store = Arc::new(InMemoryPaymentStore::new());

        Self {
            informations: PaymentInformationUseCase::new(
                Arc::clone(&store),
                Arc::new(PatientOnlyPolicy),
            ),
            attempts: PaymentAttemptUseCase::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::new(PatientOnlyPolicy),
                policies.status_transitions.build(),
            ),
            payments: PaymentUseCase::new(
                Arc::clone(&store),
                Arc::clone(&store),
                policies.cardinality.build(),
            ),
            records: OrderPaymentRecordsUseCase::new(Arc::clone(&store)),
            store,
        }
    }

    pub async fn instrument(&self, owner: Caller) -> PaymentInformationModel {
        self.informations
            .create(
                owner,
                PaymentMethod::CreditCard,
                &json!({ "last4": "4242", "brand": "visa" }),
                &live(),
            )
            .await
            .unwrap()
    }

    pub async fn attempt(&self, owner: Caller, order_id: Uuid, info_id: Uuid) -> Uuid {
        self.attempts
            .create_attempt(owner, &order_id.to_string(), &info_id.to_string(), &live())
            .await
            .unwrap()
            .payment_attempt_id
    }

    /// An attempt already moved to `success`, ready to be finalized.
    pub async fn successful_attempt(&self, owner: Caller, order_id: Uuid) -> Uuid {
        let info = self.instrument(owner).await;
        let attempt_id = self.attempt(owner, order_id, info.id).await;
        self.attempts
            .update_attempt_status(&attempt_id.to_string(), "success", &live())
            .await
            .unwrap();
        attempt_id
    }
}

pub fn patient() -> Caller {
    Caller::new(new_id(), Role::Patient)
}

pub fn doctor() -> Caller {
    Caller::new(new_id(), Role::Doctor)
}

pub fn live() -> CancellationToken {
    CancellationToken::new()
}

pub fn cancelled() -> CancellationToken {
    let cancel = CancellationToken::new();
    cancel.cancel();
    cancel
}
