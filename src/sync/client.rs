use crate::error::SyncError;
use crate::store::SessionRecord;
use reqwest::blocking::Client;
use std::time::Duration;

pub struct SyncClient {
    client: Client,
    url: String,
    token: Option<String>,
}

impl SyncClient {
    pub fn new(url: &str, token: Option<String>, timeout_secs: u64) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            token,
        })
    }

    /// Upload the full session sequence, replacing whatever the remote holds.
    pub fn push(&self, sessions: &[SessionRecord]) -> Result<(), SyncError> {
        let mut request = self.client.post(&self.url).json(sessions);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(SyncError::Status(response.status()));
        }
        Ok(())
    }
}
