use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::github::client::{CodeHost, ContentPayload, ContentRef, HostError};

/// Why one file could not be turned into text. Never aborts a search.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("not a file with inline content")]
    NotAFile,
    #[error("unsupported content encoding: {0}")]
    UnsupportedEncoding(String),
    #[error("invalid base64 content: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("content is not valid UTF-8 (binary file?)")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Retrieve the full text of one file.
pub async fn fetch_content(host: &dyn CodeHost, content_ref: &ContentRef) -> Result<String, FetchError> {
    let payload = host.get_content(content_ref).await?;
    decode_payload(payload)
}

fn decode_payload(payload: ContentPayload) -> Result<String, FetchError> {
    let entry = match payload {
        ContentPayload::Entry(entry) if entry.kind == "file" => entry,
        _ => return Err(FetchError::NotAFile),
    };
    let content = entry.content.ok_or(FetchError::NotAFile)?;

    match entry.encoding.as_deref() {
        Some("base64") => decode_base64_text(&content),
        // Files over 1MB come back with encoding "none" and no usable body
        Some(other) => Err(FetchError::UnsupportedEncoding(other.to_string())),
        None => Err(FetchError::UnsupportedEncoding("missing".to_string())),
    }
}

/// GitHub wraps base64 bodies at 60 columns; the line breaks are not data.
fn decode_base64_text(encoded: &str) -> Result<String, FetchError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::ContentEntry;

    fn file(encoding: Option<&str>, content: Option<&str>) -> ContentPayload {
        ContentPayload::Entry(ContentEntry {
            kind: "file".to_string(),
            encoding: encoding.map(str::to_string),
            content: content.map(str::to_string),
        })
    }

    #[test]
    fn test_decodes_wrapped_base64() {
        // "def merge_sort(xs):\n    pass\n" split across lines
        let encoded = "ZGVmIG1lcmdlX3NvcnQoeHMp\nOgogICAgcGFzcwo=\n";
        let text = decode_payload(file(Some("base64"), Some(encoded))).unwrap();
        assert_eq!(text, "def merge_sort(xs):\n    pass\n");
    }

    #[test]
    fn test_empty_file_decodes_to_empty_string() {
        let text = decode_payload(file(Some("base64"), Some(""))).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_directory_listing_is_not_a_file() {
        let err = decode_payload(ContentPayload::Listing(vec![])).unwrap_err();
        assert!(matches!(err, FetchError::NotAFile));
    }

    #[test]
    fn test_symlink_is_not_a_file() {
        let payload = ContentPayload::Entry(ContentEntry {
            kind: "symlink".to_string(),
            encoding: None,
            content: None,
        });
        assert!(matches!(decode_payload(payload), Err(FetchError::NotAFile)));
    }

    #[test]
    fn test_large_file_without_body_is_rejected() {
        let err = decode_payload(file(Some("none"), Some(""))).unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedEncoding(e) if e == "none"));
    }

    #[test]
    fn test_invalid_base64_is_a_decode_error() {
        let err = decode_payload(file(Some("base64"), Some("!!not base64!!"))).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_binary_content_is_rejected() {
        // 0xff 0xfe 0x00 is not valid UTF-8
        let encoded = STANDARD.encode([0xffu8, 0xfe, 0x00]);
        let err = decode_payload(file(Some("base64"), Some(&encoded))).unwrap_err();
        assert!(matches!(err, FetchError::NotUtf8(_)));
    }
}
