//! reqwest transport for the MxMC remote-control interface.
//!
//! MxMC serves HTTPS with a self-signed certificate, so verification is off
//! unless the settings turn it back on. Requests are not retried.

use crate::core::query::{command_url, Query};
use crate::core::RemoteControl;
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct MxmcClient {
    base_url: String,
    client: Client,
}

impl MxmcClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_tls_verification(base_url, false)
    }

    pub fn with_tls_verification(base_url: impl Into<String>, verify: bool) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!verify)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl RemoteControl for MxmcClient {
    async fn send(&self, command: &str, query: &Query) -> Result<String> {
        // 查詢字串自己組，避免 reqwest 把 + 編碼掉
        let url = command_url(&self.base_url, command, query);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("MxMC response status: {}", status);

        // text() 會依 Content-Type 的 charset 解碼
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ExportError::RemoteError {
                command: command.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
