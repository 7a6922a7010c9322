use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::COOKIE;
use tracing::debug;

use super::{access_token_cookie, read_optional_json};
use crate::application::interfaces::appointment_directory::{
    AppointmentDirectory, LatestAppointment,
};

pub struct AppointmentClient {
    http: reqwest::Client,
    base_url: String,
}

impl AppointmentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AppointmentDirectory for AppointmentClient {
    async fn latest_appointment(&self, access_token: &str) -> Result<Option<LatestAppointment>> {
        let url = format!("{}/v1/patient/history/latest", self.base_url);
        debug!(%url, "appointment_client: fetching latest appointment");

        let resp = self
            .http
            .get(&url)
            .header(COOKIE, access_token_cookie(access_token)?)
            .send()
            .await?;

        read_optional_json(resp, "fetch latest appointment").await
    }
}
