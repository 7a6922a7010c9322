use std::sync::Arc;

use anyhow::{Result, bail};

/// How many payments one successful attempt may be finalized into.
pub trait PaymentCardinalityPolicy: Send + Sync {
    /// `None` means unlimited.
    fn max_payments_per_attempt(&self) -> Option<usize>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AllowMultiplePayments;

impl PaymentCardinalityPolicy for AllowMultiplePayments {
    fn max_payments_per_attempt(&self) -> Option<usize> {
        None
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SinglePaymentPerAttempt;

impl PaymentCardinalityPolicy for SinglePaymentPerAttempt {
    fn max_payments_per_attempt(&self) -> Option<usize> {
        Some(1)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CardinalityPolicyKind {
    #[default]
    Multiple,
    Single,
}

impl CardinalityPolicyKind {
    pub fn build(self) -> Arc<dyn PaymentCardinalityPolicy> {
        match self {
            CardinalityPolicyKind::Multiple => Arc::new(AllowMultiplePayments),
            CardinalityPolicyKind::Single => Arc::new(SinglePaymentPerAttempt),
        }
    }
}

impl TryFrom<&str> for CardinalityPolicyKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value.trim() {
            "multiple" => Ok(CardinalityPolicyKind::Multiple),
            "single" => Ok(CardinalityPolicyKind::Single),
            other => bail!("unknown payment cardinality policy `{other}`"),
        }
    }
}
