//! Trait abstraction for the server client to enable mocking in tests

use anyhow::Result;
use async_trait::async_trait;

use crate::state::{CertificateRow, FileRow};

/// Operations the CertKit server exposes to the client, enabling mocking
/// in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerClientTrait: Send + Sync {
    /// Check if the server is reachable
    async fn check_connection(&self) -> bool;

    /// List the certificates shown on the dashboard
    async fn list_certificates(&self) -> Result<Vec<CertificateRow>>;

    /// List the entries of the served directory
    async fn list_files(&self) -> Result<Vec<FileRow>>;

    /// Ask the serving host to reveal a path in its file manager
    async fn open_in_file_manager(&self, path: &str) -> Result<()>;
}
