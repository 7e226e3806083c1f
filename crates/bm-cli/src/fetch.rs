use std::fs;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use bm_compiler::loader::{file_reference_path, ContentLoader, LoadedContent, RetrievalError};

const USER_AGENT: &str = "dnscrypt-proxy";

/// Loads `file:` references from disk and everything else over HTTP.
pub struct HttpLoader {
    client: Client,
}

impl HttpLoader {
    pub fn new(timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self { client })
    }
}

impl ContentLoader for HttpLoader {
    fn load(&self, reference: &str) -> Result<LoadedContent, RetrievalError> {
        if let Some(path) = file_reference_path(reference) {
            let bytes = fs::read(path).map_err(|source| RetrievalError::Io {
                reference: reference.to_string(),
                source,
            })?;
            return Ok(LoadedContent::from_bytes(&bytes, true));
        }

        let transport = |e: reqwest::Error| RetrievalError::Transport {
            reference: reference.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(reference).send().map_err(transport)?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(RetrievalError::HttpStatus {
                reference: reference.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(transport)?;
        Ok(LoadedContent::from_bytes(&bytes, false))
    }
}
