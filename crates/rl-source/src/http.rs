//! HTTP fetch path shared by the URL-based source variants.
//!
//! Two concerns live here: normalizing GitHub "browse" URLs to their
//! raw-content equivalents, and the blocking GET itself. The GET is a
//! single attempt with no retry, backoff, or cancellation; the first error
//! is terminal and surfaces to the caller.

use rl_common::{Error, Result};
use std::io::Read;
use tracing::debug;

const GITHUB_HOST: &str = "github.com";
const GITHUB_RAW_HOST: &str = "raw.githubusercontent.com";

/// Abstraction over the blocking HTTP GET, so adapters can be exercised
/// without a network.
///
/// Implementations map non-2xx responses to [`Error::Fetch`] with the
/// status code, and transport failures to [`Error::Fetch`] without one.
pub trait HttpFetch {
    /// Issue a GET and return the response body.
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Vec<u8>>;
}

/// `ureq`-backed fetcher used in production.
#[derive(Debug, Default)]
pub struct UreqFetcher;

impl HttpFetch for UreqFetcher {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Vec<u8>> {
        let mut request = ureq::get(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        match request.call() {
            Ok(response) => {
                let mut body = Vec::new();
                response.into_reader().read_to_end(&mut body)?;
                debug!(url, bytes = body.len(), "fetched");
                Ok(body)
            }
            Err(ureq::Error::Status(code, response)) => Err(Error::Fetch {
                status: Some(code),
                reason: response.status_text().to_string(),
            }),
            Err(err) => Err(Error::Fetch {
                status: None,
                reason: err.to_string(),
            }),
        }
    }
}

/// Rewrite a GitHub "blob" browse URL to its raw-content equivalent.
///
/// The rewrite is substring-based: when the URL mentions both the GitHub
/// host and a `blob` segment, the host becomes the raw host and `/blob/`
/// collapses to `/`. Any other URL passes through unchanged.
pub fn normalize_raw_url(url: &str) -> String {
    if url.contains(GITHUB_HOST) && url.contains("blob") {
        url.replace(GITHUB_HOST, GITHUB_RAW_HOST)
            .replace("/blob/", "/")
    } else {
        url.to_string()
    }
}

/// Build the header set for an optional bearer-style token.
///
/// GitHub's personal tokens use the `token` scheme rather than `Bearer`.
pub fn auth_headers(token: Option<&str>) -> Vec<(String, String)> {
    match token {
        Some(tok) if !tok.is_empty() => {
            vec![("Authorization".to_string(), format!("token {tok}"))]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_url_rewritten() {
        let url = "https://github.com/dataprofessor/data/blob/master/solubility.csv";
        assert_eq!(
            normalize_raw_url(url),
            "https://raw.githubusercontent.com/dataprofessor/data/master/solubility.csv"
        );
    }

    #[test]
    fn test_non_blob_url_unchanged() {
        let url = "https://raw.githubusercontent.com/dataprofessor/data/master/solubility.csv";
        assert_eq!(normalize_raw_url(url), url);

        let url = "https://example.com/data.csv";
        assert_eq!(normalize_raw_url(url), url);
    }

    #[test]
    fn test_non_github_blob_url_unchanged() {
        // "blob" alone is not enough; the GitHub host must be present too
        let url = "https://example.com/blob/data.csv";
        assert_eq!(normalize_raw_url(url), url);
    }

    #[test]
    fn test_auth_headers() {
        assert!(auth_headers(None).is_empty());
        assert!(auth_headers(Some("")).is_empty());

        let headers = auth_headers(Some("ghp_abc"));
        assert_eq!(
            headers,
            vec![("Authorization".to_string(), "token ghp_abc".to_string())]
        );
    }
}
