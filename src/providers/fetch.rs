//! HTTP file fetcher backed by reqwest's blocking client

use std::fs::File;
use std::path::Path;

use crate::error::{ProvisionError, Result};
use crate::providers::Fetcher;

/// Downloads a URL to a local file, overwriting any existing content.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    fn fetch_error(url: &str, reason: impl ToString) -> ProvisionError {
        ProvisionError::FetchFailed {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let mut response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Self::fetch_error(url, e))?;

        // File::create truncates, giving the overwrite semantics the
        // operations rely on for repeated runs.
        let mut file = File::create(dest).map_err(|e| Self::fetch_error(url, e))?;
        response
            .copy_to(&mut file)
            .map_err(|e| Self::fetch_error(url, e))?;
        Ok(())
    }
}
