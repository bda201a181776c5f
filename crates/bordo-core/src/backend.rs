//! CommandChannel — thin client over the vehicle assistant's HTTP API.
//!
//! The backend is an external collaborator; this side specifies no retry,
//! auth, or timeout. A failed fetch means "no update this tick": callers log
//! and keep their last committed state.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed user-visible text when `/command` cannot be reached or parsed.
pub const COMMAND_FALLBACK: &str = "could not process command";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Network(#[from] reqwest::Error),
}

/// Wire shape of `GET /motor`. Field names are the backend's own (Portuguese
/// sensor labels) and must not change on this side.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MotorReadings {
    /// Engine coolant temperature (ECT sensor), °C.
    #[serde(rename = "temperatura_motor_ect")]
    pub coolant_temp_c: f64,
    /// Crankshaft position (CKP sensor), degrees in [0, 360).
    #[serde(rename = "posicao_virabrequim_ckp")]
    pub crank_angle_deg: f64,
}

#[derive(Debug, Deserialize)]
struct TextReply {
    response: String,
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Backend status object. Logged only; nothing in the UI renders it.
    pub async fn status(&self) -> Result<serde_json::Value, BackendError> {
        let value = self
            .http
            .get(self.url("/status"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(value)
    }

    pub async fn motor(&self) -> Result<MotorReadings, BackendError> {
        let readings = self
            .http
            .get(self.url("/motor"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(readings)
    }

    /// Send a free-text command. Blank/whitespace-only input is a no-op and
    /// returns `None` without touching the network. A transport or decode
    /// failure never surfaces as an error — the caller gets the fixed
    /// fallback text instead.
    pub async fn send_command(&self, text: &str) -> Option<String> {
        let command = text.trim();
        if command.is_empty() {
            return None;
        }

        let body = serde_json::json!({ "command": command });
        let sent = self
            .http
            .post(self.url("/command"))
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        match sent {
            Ok(resp) => match resp.json::<TextReply>().await {
                Ok(reply) => Some(reply.response),
                Err(e) => {
                    warn!("command reply was not decodable: {e}");
                    Some(COMMAND_FALLBACK.to_string())
                }
            },
            Err(e) => {
                warn!("command transport failed: {e}");
                Some(COMMAND_FALLBACK.to_string())
            }
        }
    }

    pub async fn toggle_lights(&self) -> Result<String, BackendError> {
        self.post_for_text("/lights").await
    }

    pub async fn toggle_music(&self) -> Result<String, BackendError> {
        self.post_for_text("/music").await
    }

    /// Computer-vision payload. Arbitrary JSON; logged, never rendered.
    pub async fn camera(&self) -> Result<serde_json::Value, BackendError> {
        let value: serde_json::Value = self
            .http
            .get(self.url("/camera"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("camera payload: {value}");
        Ok(value)
    }

    async fn post_for_text(&self, path: &str) -> Result<String, BackendError> {
        let reply: TextReply = self
            .http
            .post(self.url(path))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(reply.response)
    }
}
