//! Object-store fetch over the S3 REST API.
//!
//! The adapter needs exactly four inputs (access key, secret key, bucket,
//! object path); absent any one it produces nothing rather than erroring,
//! because a half-filled credential form is "not yet ready", not a failure.
//!
//! The GET is authenticated with an AWS Signature Version 4 header. Signing
//! is a deterministic transform of the request plus a timestamp, so it is
//! implemented as a pure function and the fetcher only supplies the clock.

use chrono::Utc;
use hmac::{Hmac, Mac};
use rl_common::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Read;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 of an empty body, hex-encoded. GET requests carry no payload.
const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";
const DEFAULT_REGION: &str = "us-east-1";

/// The four user-supplied object-store parameters, each optional until the
/// user has filled it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectStoreParams {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub bucket: Option<String>,
    pub key: Option<String>,
    /// Bucket region; defaults when left empty.
    pub region: Option<String>,
}

impl ObjectStoreParams {
    /// Whether all four required parameters are present and non-blank.
    pub fn is_ready(&self) -> bool {
        self.request().is_some()
    }

    /// Resolve into a concrete request when all required parameters are
    /// present; `None` means "not yet ready".
    pub fn request(&self) -> Option<ObjectRequest> {
        let filled = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Some(ObjectRequest {
            access_key: filled(&self.access_key)?,
            secret_key: filled(&self.secret_key)?,
            bucket: filled(&self.bucket)?,
            key: filled(&self.key)?,
            region: filled(&self.region).unwrap_or_else(|| DEFAULT_REGION.to_string()),
        })
    }
}

/// A fully specified object GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRequest {
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub key: String,
    pub region: String,
}

/// Abstraction over the object-store GET, so adapters can be exercised
/// without credentials or a network.
pub trait ObjectFetch {
    /// Fetch the object body. Auth and lookup failures map to
    /// [`Error::Storage`].
    fn get_object(&self, request: &ObjectRequest) -> Result<Vec<u8>>;
}

/// A signed request ready to send: URL plus the headers SigV4 covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Produce the SigV4-signed form of an object GET at the given instant.
///
/// `amz_date` is `YYYYMMDDTHHMMSSZ` and `date` its `YYYYMMDD` prefix.
/// Virtual-hosted-style addressing; empty query string; the signed header
/// set is fixed to host, content hash, and date.
pub fn sign_request(request: &ObjectRequest, amz_date: &str, date: &str) -> SignedRequest {
    let host = format!("{}.s3.{}.amazonaws.com", request.bucket, request.region);
    let canonical_uri = format!("/{}", uri_encode_path(&request.key));

    let canonical_headers = format!(
        "host:{host}\nx-amz-content-sha256:{EMPTY_PAYLOAD_SHA256}\nx-amz-date:{amz_date}\n"
    );
    let canonical_request = format!(
        "GET\n{canonical_uri}\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{EMPTY_PAYLOAD_SHA256}"
    );

    let scope = format!("{date}/{}/s3/aws4_request", request.region);
    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let secret = format!("AWS4{}", request.secret_key);
    let k_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, request.region.as_bytes());
    let k_service = hmac_sha256(&k_region, b"s3");
    let k_signing = hmac_sha256(&k_service, b"aws4_request");
    let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes()));

    let authorization = format!(
        "AWS4-HMAC-SHA256 Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        request.access_key
    );

    SignedRequest {
        url: format!("https://{host}{canonical_uri}"),
        headers: vec![
            ("Authorization".to_string(), authorization),
            (
                "x-amz-content-sha256".to_string(),
                EMPTY_PAYLOAD_SHA256.to_string(),
            ),
            ("x-amz-date".to_string(), amz_date.to_string()),
        ],
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC-SHA256 accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Percent-encode an object key for the canonical URI: unreserved
/// characters and `/` pass through, everything else becomes `%XX`.
fn uri_encode_path(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// `ureq`-backed object fetcher used in production.
#[derive(Debug, Default)]
pub struct S3Fetcher;

impl ObjectFetch for S3Fetcher {
    fn get_object(&self, request: &ObjectRequest) -> Result<Vec<u8>> {
        let now = Utc::now();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();
        let signed = sign_request(request, &amz_date, &date);

        let mut get = ureq::get(&signed.url);
        for (name, value) in &signed.headers {
            get = get.set(name, value);
        }

        match get.call() {
            Ok(response) => {
                let mut body = Vec::new();
                response.into_reader().read_to_end(&mut body)?;
                debug!(
                    bucket = %request.bucket,
                    key = %request.key,
                    bytes = body.len(),
                    "object fetched"
                );
                Ok(body)
            }
            Err(ureq::Error::Status(403, _)) => Err(Error::Storage(format!(
                "access denied for s3://{}/{}",
                request.bucket, request.key
            ))),
            Err(ureq::Error::Status(404, _)) => Err(Error::Storage(format!(
                "object not found: s3://{}/{}",
                request.bucket, request.key
            ))),
            Err(ureq::Error::Status(code, response)) => Err(Error::Storage(format!(
                "unexpected response (HTTP {code}): {}",
                response.status_text()
            ))),
            Err(err) => Err(Error::Storage(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(missing: Option<&str>) -> ObjectStoreParams {
        let field = |name: &str| {
            if missing == Some(name) {
                None
            } else {
                Some(name.to_string())
            }
        };
        ObjectStoreParams {
            access_key: field("access_key"),
            secret_key: field("secret_key"),
            bucket: field("bucket"),
            key: field("key"),
            region: None,
        }
    }

    fn request() -> ObjectRequest {
        ObjectRequest {
            access_key: "AKIDEXAMPLE".to_string(),
            secret_key: "secret".to_string(),
            bucket: "my-bucket".to_string(),
            key: "folder/data.csv".to_string(),
            region: "us-east-1".to_string(),
        }
    }

    #[test]
    fn test_all_params_present_is_ready() {
        assert!(params(None).is_ready());
    }

    #[test]
    fn test_any_missing_param_is_not_ready() {
        for field in ["access_key", "secret_key", "bucket", "key"] {
            assert!(!params(Some(field)).is_ready(), "missing {field}");
        }
    }

    #[test]
    fn test_blank_param_is_not_ready() {
        let mut p = params(None);
        p.bucket = Some("   ".to_string());
        assert!(!p.is_ready());
    }

    #[test]
    fn test_region_defaults() {
        let req = params(None).request().expect("ready");
        assert_eq!(req.region, "us-east-1");
    }

    #[test]
    fn test_signed_request_shape() {
        let signed = sign_request(&request(), "20260824T120000Z", "20260824");
        assert_eq!(
            signed.url,
            "https://my-bucket.s3.us-east-1.amazonaws.com/folder/data.csv"
        );

        let auth = &signed.headers[0];
        assert_eq!(auth.0, "Authorization");
        assert!(auth.1.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20260824/us-east-1/s3/aws4_request"
        ));
        assert!(auth.1.contains("SignedHeaders=host;x-amz-content-sha256;x-amz-date"));

        let signature = auth
            .1
            .rsplit("Signature=")
            .next()
            .expect("signature suffix");
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let a = sign_request(&request(), "20260824T120000Z", "20260824");
        let b = sign_request(&request(), "20260824T120000Z", "20260824");
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_depends_on_secret() {
        let a = sign_request(&request(), "20260824T120000Z", "20260824");
        let mut other = request();
        other.secret_key = "different".to_string();
        let b = sign_request(&other, "20260824T120000Z", "20260824");
        assert_ne!(a.headers[0].1, b.headers[0].1);
    }

    #[test]
    fn test_uri_encode_path() {
        assert_eq!(uri_encode_path("folder/data.csv"), "folder/data.csv");
        assert_eq!(uri_encode_path("a b/c"), "a%20b/c");
        assert_eq!(uri_encode_path("name+x.csv"), "name%2Bx.csv");
    }
}
