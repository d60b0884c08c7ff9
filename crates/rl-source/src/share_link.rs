//! Public sharing-link handling.
//!
//! A Drive sharing URL embeds the file identifier between `/d/` and the
//! next `/`. The adapter extracts it and builds the direct-download form;
//! access-controlled links are out of scope.

use rl_common::{Error, Result};

const ID_DELIMITER: &str = "/d/";
const DOWNLOAD_BASE: &str = "https://drive.google.com/uc?id=";

/// Extract the embedded file identifier from a sharing URL.
///
/// The identifier is the path segment following `/d/`, up to the next `/`
/// or the end of the string. A URL without the delimiter (or with nothing
/// after it) is malformed.
pub fn extract_file_id(url: &str) -> Result<&str> {
    let (_, rest) = url.split_once(ID_DELIMITER).ok_or_else(|| Error::MalformedUrl {
        url: url.to_string(),
    })?;
    let id = rest.split('/').next().unwrap_or("");
    if id.is_empty() {
        return Err(Error::MalformedUrl {
            url: url.to_string(),
        });
    }
    Ok(id)
}

/// Direct-download URL for a file identifier.
pub fn direct_download_url(file_id: &str) -> String {
    format!("{DOWNLOAD_BASE}{file_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_sharing_url() {
        let url = "https://drive.google.com/file/d/1AbC_dEf/view?usp=sharing";
        assert_eq!(extract_file_id(url).expect("id"), "1AbC_dEf");
    }

    #[test]
    fn test_extract_without_trailing_segment() {
        let url = "https://drive.google.com/file/d/1AbC_dEf";
        assert_eq!(extract_file_id(url).expect("id"), "1AbC_dEf");
    }

    #[test]
    fn test_missing_delimiter_is_malformed() {
        let url = "https://drive.google.com/open?id=1AbC_dEf";
        let err = extract_file_id(url).expect_err("no /d/");
        assert_eq!(err.code(), 30);
    }

    #[test]
    fn test_empty_id_is_malformed() {
        let url = "https://drive.google.com/file/d//view";
        assert!(extract_file_id(url).is_err());
    }

    #[test]
    fn test_direct_download_url() {
        assert_eq!(
            direct_download_url("1AbC_dEf"),
            "https://drive.google.com/uc?id=1AbC_dEf"
        );
    }
}
