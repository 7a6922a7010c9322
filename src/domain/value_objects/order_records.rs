use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::{payment_attempts::PaymentAttemptModel, payments::PaymentModel};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PurgedOrderModel {
    pub order_id: Uuid,
    pub payments_removed: usize,
    pub attempts_removed: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PurgedInstrumentsModel {
    pub user_id: Uuid,
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderPaymentSummaryModel {
    pub order_id: Uuid,
    pub attempts: Vec<PaymentAttemptModel>,
    pub payments: Vec<PaymentModel>,
    pub total_paid: Decimal,
}
