//! HTTP client for communicating with the CertKit server

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use super::traits::ServerClientTrait;
use crate::state::{CertificateRow, FileRow};

/// Default server address
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8440";

/// Error for requests the server answered with a non-OK status
#[derive(Debug, Error)]
#[error("server returned {status}")]
pub struct StatusError {
    pub status: reqwest::StatusCode,
}

/// Client for talking to the CertKit server over HTTP
pub struct ServerClient {
    http: Client,
    base_url: String,
}

impl ServerClient {
    pub fn new(address: impl Into<String>) -> Self {
        let base_url = address.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl ServerClientTrait for ServerClient {
    async fn check_connection(&self) -> bool {
        self.http
            .get(format!("{}/api/certificates", self.base_url))
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }

    async fn list_certificates(&self) -> Result<Vec<CertificateRow>> {
        let rows = self
            .http
            .get(format!("{}/api/certificates", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("invalid certificate listing from server")?;
        Ok(rows)
    }

    async fn list_files(&self) -> Result<Vec<FileRow>> {
        let rows = self
            .http
            .get(format!("{}/api/files", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("invalid file listing from server")?;
        Ok(rows)
    }

    async fn open_in_file_manager(&self, path: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/open", self.base_url))
            .form(&[("path", path)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatusError { status }.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = ServerClient::new("http://127.0.0.1:8440/");
        assert_eq!(client.base_url, "http://127.0.0.1:8440");
    }

    #[test]
    fn test_status_error_display() {
        let err = StatusError {
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "server returned 404 Not Found");
    }
}
