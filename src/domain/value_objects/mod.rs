pub mod caller;
pub mod enums;
pub mod identifiers;
pub mod order_records;
pub mod payment_attempts;
pub mod payment_informations;
pub mod payments;
