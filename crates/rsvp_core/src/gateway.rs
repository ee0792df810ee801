use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CACHE_CONTROL},
    Client,
};
use serde_json::Value;
use shared::protocol::{ConfirmationEnvelope, GuestRecord};
use tracing::warn;

use crate::error::{LoadError, SubmitError};

/// Seam to the remote guest-directory and confirmation-intake services.
/// Both calls suspend and resolve to a result, so the workflow above them is
/// testable without a network.
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, LoadError>;
    async fn submit_confirmation(
        &self,
        envelope: &ConfirmationEnvelope,
    ) -> Result<(), SubmitError>;
}

/// Null gateway for construction before endpoints are configured.
pub struct MissingDirectoryGateway;

#[async_trait]
impl DirectoryGateway for MissingDirectoryGateway {
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, LoadError> {
        Err(LoadError::Transport(
            "directory gateway is unconfigured".into(),
        ))
    }

    async fn submit_confirmation(
        &self,
        _envelope: &ConfirmationEnvelope,
    ) -> Result<(), SubmitError> {
        Err(SubmitError::Transport(
            "directory gateway is unconfigured".into(),
        ))
    }
}

/// HTTP gateway against the fixed remote endpoints.
pub struct HttpDirectoryGateway {
    http: Client,
    directory_url: String,
    confirm_url: String,
}

impl HttpDirectoryGateway {
    pub fn new(directory_url: impl Into<String>, confirm_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            directory_url: directory_url.into(),
            confirm_url: confirm_url.into(),
        }
    }
}

#[async_trait]
impl DirectoryGateway for HttpDirectoryGateway {
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, LoadError> {
        let response = self
            .http
            .get(&self.directory_url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|err| LoadError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|_| LoadError::Format)?;
        let Value::Array(items) = body else {
            return Err(LoadError::Format);
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<GuestRecord>(item) {
                Ok(record) => records.push(record),
                Err(err) => warn!(%err, "dropping malformed guest record"),
            }
        }
        Ok(records)
    }

    async fn submit_confirmation(
        &self,
        envelope: &ConfirmationEnvelope,
    ) -> Result<(), SubmitError> {
        let response = self
            .http
            .post(&self.confirm_url)
            .header(ACCEPT, "application/json")
            .json(envelope)
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // Best effort: the service usually explains rejections in the body.
        let body = response.text().await.unwrap_or_default();
        Err(SubmitError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
