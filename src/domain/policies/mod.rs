pub mod authorization;
pub mod payment_cardinality;
pub mod status_transitions;
