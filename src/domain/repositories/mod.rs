pub mod payment_attempts;
pub mod payment_informations;
pub mod payments;
pub mod transaction;
