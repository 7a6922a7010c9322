pub mod payment_methods;
pub mod payment_statuses;
pub mod roles;
