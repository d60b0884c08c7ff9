//! Rowlens data-source adapters.
//!
//! A data source is one of a closed, tagged set of four variants — local
//! upload, HTTP(S) fetch, public share link, object store — dispatched by a
//! single [`SourceSpec::load`]. All variants share the same terminal-error
//! semantics: no retry, no partial results, either a full [`Dataset`] or
//! nothing. An object-store spec with missing parameters loads as
//! `Ok(None)` ("not yet ready") rather than failing.

pub mod http;
pub mod object_store;
pub mod share_link;

pub use http::{HttpFetch, UreqFetcher};
pub use object_store::{ObjectFetch, ObjectRequest, ObjectStoreParams, S3Fetcher};

use rl_common::{Dataset, Result};
use tracing::{debug, info};

/// The closed set of data-source variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// A locally uploaded file.
    Upload { bytes: Vec<u8>, file_name: String },
    /// A direct HTTP(S) URL, optionally with a token for private repos.
    Http { url: String, token: Option<String> },
    /// A public sharing link with an embedded file identifier.
    ShareLink { url: String },
    /// An object-store location; parameters accumulate as the user fills
    /// them in.
    ObjectStore(ObjectStoreParams),
}

impl SourceSpec {
    /// Load the source into a [`Dataset`].
    ///
    /// Returns `Ok(None)` when the spec is not yet fully specified (only
    /// possible for the object-store variant). Any error leaves the caller's
    /// previously loaded dataset untouched; there is no partial overwrite.
    pub fn load(&self, http: &dyn HttpFetch, store: &dyn ObjectFetch) -> Result<Option<Dataset>> {
        match self {
            SourceSpec::Upload { bytes, file_name } => {
                debug!(file_name, bytes = bytes.len(), "parsing upload");
                let dataset = Dataset::from_csv_bytes(bytes)?;
                info!(
                    file_name,
                    rows = dataset.row_count(),
                    columns = dataset.column_count(),
                    "dataset loaded from upload"
                );
                Ok(Some(dataset))
            }
            SourceSpec::Http { url, token } => {
                let url = http::normalize_raw_url(url);
                debug!(%url, "fetching");
                let body = http.get(&url, &http::auth_headers(token.as_deref()))?;
                let dataset = Dataset::from_csv_bytes(&body)?;
                info!(
                    %url,
                    rows = dataset.row_count(),
                    columns = dataset.column_count(),
                    "dataset loaded over http"
                );
                Ok(Some(dataset))
            }
            SourceSpec::ShareLink { url } => {
                let file_id = share_link::extract_file_id(url)?;
                let download_url = share_link::direct_download_url(file_id);
                debug!(file_id, %download_url, "fetching share link");
                let body = http.get(&download_url, &[])?;
                let dataset = Dataset::from_csv_bytes(&body)?;
                info!(
                    file_id,
                    rows = dataset.row_count(),
                    columns = dataset.column_count(),
                    "dataset loaded from share link"
                );
                Ok(Some(dataset))
            }
            SourceSpec::ObjectStore(params) => {
                let Some(request) = params.request() else {
                    debug!("object-store parameters incomplete, nothing to load");
                    return Ok(None);
                };
                let body = store.get_object(&request)?;
                let dataset = Dataset::from_csv_bytes(&body)?;
                info!(
                    bucket = %request.bucket,
                    key = %request.key,
                    rows = dataset.row_count(),
                    columns = dataset.column_count(),
                    "dataset loaded from object store"
                );
                Ok(Some(dataset))
            }
        }
    }

    /// File name to derive a default report name from, when the source has
    /// one.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            SourceSpec::Upload { file_name, .. } => Some(file_name),
            SourceSpec::ObjectStore(params) => params.key.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rl_common::Error;
    use std::cell::RefCell;

    /// Stub fetcher that records requested URLs and replays canned results.
    struct StubHttp {
        responses: RefCell<Vec<Result<Vec<u8>>>>,
        requests: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl StubHttp {
        fn returning(response: Result<Vec<u8>>) -> Self {
            Self {
                responses: RefCell::new(vec![response]),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl HttpFetch for StubHttp {
        fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Vec<u8>> {
            self.requests
                .borrow_mut()
                .push((url.to_string(), headers.to_vec()));
            self.responses.borrow_mut().remove(0)
        }
    }

    struct StubStore(Result<Vec<u8>>);

    impl ObjectFetch for StubStore {
        fn get_object(&self, _request: &ObjectRequest) -> Result<Vec<u8>> {
            match &self.0 {
                Ok(body) => Ok(body.clone()),
                Err(Error::Storage(msg)) => Err(Error::Storage(msg.clone())),
                Err(_) => unreachable!("stub only carries storage errors"),
            }
        }
    }

    fn no_store() -> StubStore {
        StubStore(Err(Error::Storage("unexpected object-store call".into())))
    }

    #[test]
    fn test_upload_parses_csv() {
        let spec = SourceSpec::Upload {
            bytes: b"a,b\n1,2\n".to_vec(),
            file_name: "data.csv".to_string(),
        };
        let http = StubHttp::returning(Ok(Vec::new()));
        let dataset = spec.load(&http, &no_store()).expect("load").expect("dataset");
        assert_eq!(dataset.row_count(), 1);
        assert!(http.requests.borrow().is_empty());
    }

    #[test]
    fn test_upload_malformed_is_parse_error() {
        let spec = SourceSpec::Upload {
            bytes: b"a,b\n1,2,3\n".to_vec(),
            file_name: "data.csv".to_string(),
        };
        let err = spec
            .load(&StubHttp::returning(Ok(Vec::new())), &no_store())
            .expect_err("ragged csv");
        assert_eq!(err.code(), 10);
    }

    #[test]
    fn test_http_rewrites_blob_and_sends_token() {
        let spec = SourceSpec::Http {
            url: "https://github.com/u/r/blob/main/data.csv".to_string(),
            token: Some("ghp_abc".to_string()),
        };
        let http = StubHttp::returning(Ok(b"a\n1\n".to_vec()));
        spec.load(&http, &no_store()).expect("load").expect("dataset");

        let requests = http.requests.borrow();
        assert_eq!(
            requests[0].0,
            "https://raw.githubusercontent.com/u/r/main/data.csv"
        );
        assert_eq!(
            requests[0].1,
            vec![("Authorization".to_string(), "token ghp_abc".to_string())]
        );
    }

    #[test]
    fn test_http_fetch_error_propagates() {
        let spec = SourceSpec::Http {
            url: "https://example.com/data.csv".to_string(),
            token: None,
        };
        let http = StubHttp::returning(Err(Error::Fetch {
            status: Some(500),
            reason: "server error".into(),
        }));
        let err = spec.load(&http, &no_store()).expect_err("fetch failed");
        assert_eq!(err.code(), 20);
    }

    #[test]
    fn test_share_link_uses_download_url() {
        let spec = SourceSpec::ShareLink {
            url: "https://drive.google.com/file/d/FILE123/view?usp=sharing".to_string(),
        };
        let http = StubHttp::returning(Ok(b"a\n1\n".to_vec()));
        spec.load(&http, &no_store()).expect("load").expect("dataset");

        let requests = http.requests.borrow();
        assert_eq!(requests[0].0, "https://drive.google.com/uc?id=FILE123");
        assert!(requests[0].1.is_empty());
    }

    #[test]
    fn test_share_link_without_delimiter_fails_before_fetch() {
        let spec = SourceSpec::ShareLink {
            url: "https://drive.google.com/open?id=FILE123".to_string(),
        };
        let http = StubHttp::returning(Ok(Vec::new()));
        let err = spec.load(&http, &no_store()).expect_err("malformed");
        assert_eq!(err.code(), 30);
        assert!(http.requests.borrow().is_empty());
    }

    #[test]
    fn test_object_store_incomplete_params_not_ready() {
        let spec = SourceSpec::ObjectStore(ObjectStoreParams {
            access_key: Some("ak".into()),
            secret_key: Some("sk".into()),
            bucket: Some("bucket".into()),
            key: None,
            region: None,
        });
        let loaded = spec
            .load(&StubHttp::returning(Ok(Vec::new())), &no_store())
            .expect("not an error");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_object_store_auth_failure_is_storage_error() {
        let spec = SourceSpec::ObjectStore(ObjectStoreParams {
            access_key: Some("ak".into()),
            secret_key: Some("bad".into()),
            bucket: Some("bucket".into()),
            key: Some("data.csv".into()),
            region: None,
        });
        let store = StubStore(Err(Error::Storage("access denied".into())));
        let err = spec
            .load(&StubHttp::returning(Ok(Vec::new())), &store)
            .expect_err("denied");
        assert_eq!(err.code(), 40);
    }

    #[test]
    fn test_object_store_success_parses_body() {
        let spec = SourceSpec::ObjectStore(ObjectStoreParams {
            access_key: Some("ak".into()),
            secret_key: Some("sk".into()),
            bucket: Some("bucket".into()),
            key: Some("folder/data.csv".into()),
            region: None,
        });
        let store = StubStore(Ok(b"a,b\n1,2\n3,4\n".to_vec()));
        let dataset = spec
            .load(&StubHttp::returning(Ok(Vec::new())), &store)
            .expect("load")
            .expect("dataset");
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(spec.display_name(), Some("folder/data.csv"));
    }

    #[test]
    fn test_display_name() {
        let spec = SourceSpec::Upload {
            bytes: Vec::new(),
            file_name: "sales.csv".to_string(),
        };
        assert_eq!(spec.display_name(), Some("sales.csv"));

        let spec = SourceSpec::Http {
            url: "https://example.com/data.csv".to_string(),
            token: None,
        };
        assert_eq!(spec.display_name(), None);
    }
}
