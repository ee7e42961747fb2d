//! Connector configuration sources.
//!
//! A source turns the configured URI into the raw bytes of the connector
//! configuration document. Fetching happens once, at startup, with no retry.

use std::path::Path;

use reqwest::Url;

use crate::error::{Error, Result};

/// Fetches the connector configuration document.
pub trait ConfigSource: Send + Sync {
    /// Fetch the raw document behind `uri`.
    fn fetch(&self, uri: &str) -> Result<Vec<u8>>;
}

/// Source resolving `file://` URLs, plain filesystem paths and `http(s)://` URLs.
#[derive(Debug, Clone, Default)]
pub struct UriConfigSource;

impl UriConfigSource {
    pub fn new() -> Self {
        Self
    }

    fn fetch_file(uri: &str, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| Error::Fetch {
            uri: uri.to_string(),
            reason: e.to_string(),
        })
    }

    fn fetch_http(uri: &str, url: Url) -> Result<Vec<u8>> {
        let fetch_error = |e: reqwest::Error| Error::Fetch {
            uri: uri.to_string(),
            reason: e.to_string(),
        };
        let response = reqwest::blocking::get(url)
            .and_then(|response| response.error_for_status())
            .map_err(fetch_error)?;
        let bytes = response.bytes().map_err(fetch_error)?;
        Ok(bytes.to_vec())
    }
}

impl ConfigSource for UriConfigSource {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>> {
        let url = match Url::parse(uri) {
            Ok(url) => url,
            // Not a URL: treat as a filesystem path
            Err(_) => return Self::fetch_file(uri, Path::new(uri)),
        };

        match url.scheme() {
            "file" => {
                let path = url.to_file_path().map_err(|_| Error::Fetch {
                    uri: uri.to_string(),
                    reason: "not a local file path".to_string(),
                })?;
                Self::fetch_file(uri, &path)
            }
            "http" | "https" => Self::fetch_http(uri, url),
            other => Err(Error::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Source returning a fixed document, whatever the URI.
#[derive(Debug, Clone, Default)]
pub struct InlineConfigSource {
    document: Vec<u8>,
}

impl InlineConfigSource {
    pub fn new(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl ConfigSource for InlineConfigSource {
    fn fetch(&self, _uri: &str) -> Result<Vec<u8>> {
        Ok(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fetch_file_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "transports=mqtt").unwrap();
        let url = Url::from_file_path(file.path()).unwrap();

        let bytes = UriConfigSource::new().fetch(url.as_str()).unwrap();
        assert_eq!(bytes, b"transports=mqtt");
    }

    #[test]
    fn test_fetch_plain_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "transports=amqp").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let bytes = UriConfigSource::new().fetch(&path).unwrap();
        assert_eq!(bytes, b"transports=amqp");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.properties")).unwrap();

        let err = UriConfigSource::new().fetch(url.as_str()).unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = UriConfigSource::new()
            .fetch("ftp://config.local/connectors.properties")
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedScheme(ref s) if s == "ftp"));
    }

    #[test]
    fn test_inline_source() {
        let source = InlineConfigSource::new("transports=a,b");
        assert_eq!(source.fetch("ignored").unwrap(), b"transports=a,b");
    }
}
