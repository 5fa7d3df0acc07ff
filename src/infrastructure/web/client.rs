//! HTTP retrieval of raw sheet payloads.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::common::errors::RetrieveError;
use crate::domain::sheet::SheetLocator;

use super::urls;

/// Transport seam: fetch the raw visualization payload for one sheet.
///
/// The engine only depends on this trait, so tests and embedders can swap the
/// HTTP client for scripted payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SheetRetriever: Send + Sync {
    async fn retrieve(&self, locator: &SheetLocator) -> Result<String, RetrieveError>;
}

/// Retriever speaking the spreadsheet visualization endpoint over HTTP.
#[derive(Debug, Clone, Default)]
pub struct GvizClient {
    http: Client,
}

impl GvizClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SheetRetriever for GvizClient {
    async fn retrieve(&self, locator: &SheetLocator) -> Result<String, RetrieveError> {
        let url = urls::sheet_query_url(locator);
        debug!("requesting {}", url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RetrieveError::Status {
                code: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}
