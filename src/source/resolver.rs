//! Source resolution for PDF data

use crate::error::{Error, Result};
use crate::server::ServerConfig;
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use url::Url;

/// Where a rulebook lives, decided once from the caller's string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRef {
    /// `http://` or `https://` URL
    Remote(Url),
    /// Anything else is a filesystem path
    Local(PathBuf),
}

impl DocumentRef {
    /// Classify a document reference by its scheme prefix.
    ///
    /// Only the literal prefixes `http://` and `https://` select a remote
    /// fetch; every other string, including other URL schemes, is a path.
    pub fn parse(reference: &str) -> Result<Self> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            let url = Url::parse(reference).map_err(|e| Error::SourceResolution {
                reason: format!("Invalid URL: {}", e),
            })?;
            Ok(DocumentRef::Remote(url))
        } else {
            Ok(DocumentRef::Local(PathBuf::from(reference)))
        }
    }

    /// Human readable name used in logs
    pub fn display_name(&self) -> String {
        match self {
            DocumentRef::Remote(url) => url.to_string(),
            DocumentRef::Local(path) => path.display().to_string(),
        }
    }
}

/// Resolved PDF data
pub struct ResolvedPdf {
    pub data: Vec<u8>,
    pub source_name: String,
}

/// Turns a [`DocumentRef`] into raw bytes
#[derive(Clone)]
pub struct Resolver {
    client: reqwest::Client,
    max_download_bytes: Option<u64>,
}

impl Resolver {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            max_download_bytes: config.max_download_bytes,
        })
    }

    /// Fetch the referenced document. Remote references never touch the
    /// filesystem and local references never touch the network.
    pub async fn resolve(&self, reference: &DocumentRef) -> Result<ResolvedPdf> {
        match reference {
            DocumentRef::Remote(url) => self.resolve_url(url).await,
            DocumentRef::Local(path) => resolve_path(path).await,
        }
    }

    async fn resolve_url(&self, url: &Url) -> Result<ResolvedPdf> {
        tracing::debug!(%url, "fetching remote PDF");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Check Content-Length header for early rejection
        if let (Some(max), Some(content_length)) =
            (self.max_download_bytes, response.content_length())
        {
            if content_length > max {
                return Err(Error::DownloadTooLarge {
                    size: content_length,
                    max_size: max,
                });
            }
        }

        let mut data = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(Error::HttpRequest)?;
            data.extend_from_slice(&chunk);
            if let Some(max) = self.max_download_bytes {
                if data.len() as u64 > max {
                    return Err(Error::DownloadTooLarge {
                        size: data.len() as u64,
                        max_size: max,
                    });
                }
            }
        }

        tracing::debug!(%url, bytes = data.len(), "remote PDF downloaded");

        Ok(ResolvedPdf {
            data,
            source_name: url.to_string(),
        })
    }
}

/// Read a local file into memory
pub async fn resolve_path<P: AsRef<Path>>(path: P) -> Result<ResolvedPdf> {
    let path = path.as_ref();

    let data = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::PdfNotFound {
            path: path.display().to_string(),
        },
        _ => Error::Io(e),
    })?;

    Ok(ResolvedPdf {
        data,
        source_name: path.display().to_string(),
    })
}
