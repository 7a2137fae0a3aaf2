//! Background loading for documents with a URL background.
//!
//! `file://` URLs are read from disk and `http(s)://` URLs are downloaded.
//! Any other scheme completes the fetch as failed so the canvas stops
//! showing progress.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use emojiart_core::{Background, EmojiArtDocument, EmojiArtModel, FetchStatus};
use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while loading a background image.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL scheme cannot be loaded by this host.
    #[error("unsupported background URL scheme: {0}")]
    UnsupportedScheme(String),
    /// A `file://` URL that does not name a local path.
    #[error("invalid file URL: {0}")]
    InvalidPath(Url),
    /// Reading the file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// HTTP layer failed (connection, timeout, error status).
    #[error("background download failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Read the bytes behind a background URL.
///
/// # Errors
///
/// Returns [`FetchError::UnsupportedScheme`] for schemes other than `file`,
/// `http` and `https`, [`FetchError::InvalidPath`] if a file URL has no
/// local path, [`FetchError::Io`] if the file cannot be read, and
/// [`FetchError::Http`] if the download fails or answers with an error
/// status.
pub fn fetch_background(url: &Url) -> Result<Vec<u8>, FetchError> {
    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| FetchError::InvalidPath(url.clone()))?;
            tracing::debug!("Reading background from {}", path.display());
            fs::read(&path).map_err(|source| FetchError::Io { path, source })
        }
        "http" | "https" => {
            tracing::debug!("Downloading background from {url}");
            let http = Client::builder()
                .user_agent(concat!("emojiart/", env!("CARGO_PKG_VERSION")))
                .timeout(FETCH_TIMEOUT)
                .no_proxy()
                .build()?;
            let response = http.get(url.clone()).send()?.error_for_status()?;
            Ok(response.bytes()?.to_vec())
        }
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// Complete an outstanding background fetch on `document`.
///
/// Returns whether a fetch was completed.
pub fn resolve_pending_background(document: &mut EmojiArtModel) -> bool {
    if *document.fetch_status() != FetchStatus::Fetching {
        return false;
    }
    let Background::Url(url) = document.background().clone() else {
        return false;
    };
    let result = fetch_background(&url).map_err(|e| e.to_string());
    document.finish_fetch(&url, result);
    true
}
