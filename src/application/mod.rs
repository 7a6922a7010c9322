pub mod cancellation;
pub mod errors;
pub mod interfaces;
pub mod usecases;
pub mod validation;
