//! Archive download.

use std::{path::Path, time::Duration};

use log::info;
use reqwest::{
    Url,
    blocking::{Client, Response},
};

use crate::{
    error::{FontError, Result},
    io::{CacheFile, WriteOutcome},
};

/// Downloads a resource to a local path.
///
/// Implementations do not check whether `dest` already exists; callers skip
/// the fetch for cached files. The parent directory of `dest` must exist.
pub trait Fetch: Send + Sync {
    fn fetch(&self, uri: &Url, dest: &Path) -> Result<()>;
}

/// Streaming HTTP(S) GET using a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(FontError::Client)?;
        Ok(Self { client })
    }

    /// Uses a preconfigured client, e.g. one with proxy or TLS settings.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn get(&self, uri: &Url) -> Result<Response> {
        let response = self
            .client
            .get(uri.clone())
            .send()
            .map_err(|source| FontError::Http { uri: uri.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FontError::HttpStatus { status, uri: uri.to_string() });
        }
        Ok(response)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, uri: &Url, dest: &Path) -> Result<()> {
        info!("Downloading {uri}");
        let mut response = self.get(uri)?;

        let outcome = CacheFile::new(dest).write_with(|file| {
            response
                .copy_to(file)
                .map_err(|source| FontError::Http { uri: uri.to_string(), source })
        })?;

        if let WriteOutcome::Written(bytes) = outcome {
            let size_mb = bytes as f64 / 1024.0 / 1024.0;
            info!("  Downloaded {} ({size_mb:.2} MB)", dest.display());
        }
        Ok(())
    }
}

/// Parses an archive URI, naming the offending string on failure.
pub fn parse_uri(uri: &str) -> Result<Url> {
    Url::parse(uri)
        .map_err(|e| FontError::InvalidUri { uri: uri.to_string(), reason: e.to_string() })
}
