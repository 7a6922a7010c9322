use std::sync::Arc;

use anyhow::{Result, bail};

use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;

pub trait StatusTransitionPolicy: Send + Sync {
    fn allows(&self, from: PaymentStatus, to: PaymentStatus) -> bool;
}

/// Any status may be overwritten with any other.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnrestrictedTransitions;

impl StatusTransitionPolicy for UnrestrictedTransitions {
    fn allows(&self, _from: PaymentStatus, _to: PaymentStatus) -> bool {
        true
    }
}

/// `pending` may move anywhere; `success` and `failed` only accept themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForwardOnlyTransitions;

impl StatusTransitionPolicy for ForwardOnlyTransitions {
    fn allows(&self, from: PaymentStatus, to: PaymentStatus) -> bool {
        from == PaymentStatus::Pending || from == to
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPolicyKind {
    #[default]
    Unrestricted,
    ForwardOnly,
}

impl TransitionPolicyKind {
    pub fn build(self) -> Arc<dyn StatusTransitionPolicy> {
        match self {
            TransitionPolicyKind::Unrestricted => Arc::new(UnrestrictedTransitions),
            TransitionPolicyKind::ForwardOnly => Arc::new(ForwardOnlyTransitions),
        }
    }
}

impl TryFrom<&str> for TransitionPolicyKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value.trim() {
            "unrestricted" => Ok(TransitionPolicyKind::Unrestricted),
            "forward_only" => Ok(TransitionPolicyKind::ForwardOnly),
            other => bail!("unknown status transition policy `{other}`"),
        }
    }
}
