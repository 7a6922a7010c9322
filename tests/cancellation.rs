mod common;

use common::{Harness, cancelled, live, patient};
use payment_service::{
    application::errors::PaymentError,
    domain::value_objects::{
        enums::payment_methods::PaymentMethod, identifiers::new_id,
        payment_informations::UpdatePaymentInformationModel,
    },
};
use rust_decimal_macros::dec;
use serde_json::json;

fn assert_cancelled<T: std::fmt::Debug>(result: Result<T, PaymentError>) {
    assert!(
        matches!(result, Err(PaymentError::Cancelled)),
        "expected Cancelled, got {result:?}"
    );
}

#[tokio::test]
async fn cancelled_writes_touch_nothing() {
    let harness = Harness::new();
    let owner = patient();
    let order_id = new_id();

    assert_cancelled(
        harness
            .informations
            .create(owner, PaymentMethod::CreditCard, &json!({}), &cancelled())
            .await,
    );
    assert!(harness.informations.list_all(&live()).await.unwrap().is_empty());

    let info = harness.instrument(owner).await;
    assert_cancelled(
        harness
            .attempts
            .create_attempt(owner, &order_id.to_string(), &info.id.to_string(), &cancelled())
            .await,
    );
    assert!(harness.attempts.list_all(&live()).await.unwrap().is_empty());

    assert_cancelled(
        harness
            .informations
            .update(
                &info.id.to_string(),
                UpdatePaymentInformationModel {
                    payment_method: Some(PaymentMethod::PromptPay),
                    details: None,
                },
                &cancelled(),
            )
            .await,
    );
    assert_cancelled(
        harness
            .informations
            .delete(&info.id.to_string(), &cancelled())
            .await,
    );
    let unchanged = harness
        .informations
        .get_by_id(&info.id.to_string(), &live())
        .await
        .unwrap();
    assert_eq!(unchanged, info);
}

#[tokio::test]
async fn cancelled_finalization_and_purges_touch_nothing() {
    let harness = Harness::new();
    let owner = patient();
    let order_id = new_id();
    let attempt_id = harness.successful_attempt(owner, order_id).await;

    assert_cancelled(
        harness
            .payments
            .create_payment(&attempt_id.to_string(), dec!(30), &cancelled())
            .await,
    );
    assert!(harness.payments.list_all(&live()).await.unwrap().is_empty());

    assert_cancelled(
        harness
            .attempts
            .update_attempt_status(&attempt_id.to_string(), "failed", &cancelled())
            .await,
    );
    assert_cancelled(
        harness
            .records
            .purge_order(&order_id.to_string(), &cancelled())
            .await,
    );
    assert_cancelled(
        harness
            .records
            .purge_user_instruments(owner.user_id, &cancelled())
            .await,
    );

    let summary = harness
        .records
        .order_summary(&order_id.to_string(), &live())
        .await
        .unwrap();
    assert_eq!(summary.attempts.len(), 1);
    assert_eq!(summary.attempts[0].status.as_str(), "success");
    assert_eq!(harness.informations.list_all(&live()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn cancelled_reads_report_cancelled() {
    let harness = Harness::new();
    let order_id = new_id();
    let attempt_id = harness.successful_attempt(patient(), order_id).await;

    assert_cancelled(
        harness
            .attempts
            .get_attempt(&attempt_id.to_string(), &cancelled())
            .await,
    );
    assert_cancelled(
        harness
            .attempts
            .list_by_order(&order_id.to_string(), &cancelled())
            .await,
    );
    assert_cancelled(
        harness
            .payments
            .list_by_attempt(&attempt_id.to_string(), &cancelled())
            .await,
    );
    assert_cancelled(
        harness
            .records
            .order_summary(&order_id.to_string(), &cancelled())
            .await,
    );
}
