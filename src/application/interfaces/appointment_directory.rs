use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Passed through as the appointment service reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatestAppointment {
    pub doctor_id: String,
    pub doctor_first_name: String,
    pub doctor_last_name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
}

#[automock]
#[async_trait]
pub trait AppointmentDirectory: Send + Sync {
    /// Latest appointment of the patient the token belongs to.
    async fn latest_appointment(&self, access_token: &str) -> Result<Option<LatestAppointment>>;
}
