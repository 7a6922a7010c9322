pub mod axum_http;
pub mod clients;
pub mod in_memory;
pub mod postgres;
