pub mod order_records;
pub mod payer_lookup;
pub mod payment_attempts;
pub mod payment_informations;
pub mod payments;
