use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::COOKIE;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::{access_token_cookie, read_optional_json};
use crate::application::interfaces::user_directory::{PatientProfile, UserDirectory};

/// Client for the user service's patient endpoints.
pub struct UserClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct PatientsByIdsRequest {
    patient_ids: Vec<Uuid>,
}

impl UserClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UserDirectory for UserClient {
    async fn find_patient_profile(
        &self,
        patient_id: Uuid,
        access_token: &str,
    ) -> Result<Option<PatientProfile>> {
        let url = format!("{}/v1/patients/batch", self.base_url);
        debug!(%url, %patient_id, "user_client: fetching patient profile");

        let resp = self
            .http
            .post(&url)
            .header(COOKIE, access_token_cookie(access_token)?)
            .json(&PatientsByIdsRequest {
                patient_ids: vec![patient_id],
            })
            .send()
            .await?;

        let profiles =
            read_optional_json::<Vec<PatientProfile>>(resp, "fetch patient profiles").await?;
        Ok(profiles.and_then(|profiles| profiles.into_iter().next()))
    }
}
