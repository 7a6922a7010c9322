pub mod appointment_directory;
pub mod user_directory;
