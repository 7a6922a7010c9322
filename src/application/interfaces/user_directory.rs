use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Profiles held by the user service.
#[automock]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `Ok(None)` when the user service has no such patient.
    async fn find_patient_profile(
        &self,
        patient_id: Uuid,
        access_token: &str,
    ) -> Result<Option<PatientProfile>>;
}
