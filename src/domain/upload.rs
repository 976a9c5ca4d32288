//! 업로드한 설정 파일 바이트를 JSON 문서로 해석한다. 스키마는 검사하지 않는다.

use std::path::PathBuf;

use serde_json::Value;

const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("file is not valid UTF-8 text: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("file is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// 업로드된 파일(이름 + 원본 바이트).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    /// 읽어 온 원본 파일 경로(알 수 있을 때만)
    pub source: Option<PathBuf>,
}

/// 해석에 성공해 현재 병합 대상이 된 문서.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub name: String,
    pub data: Value,
    /// 내보내기가 이 파일을 덮어쓰지 않도록 보관한다.
    pub source: Option<PathBuf>,
}

pub fn parse_document(bytes: &[u8]) -> Result<Value, UploadError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_well_formed_json() {
        assert_eq!(parse_document(b"[1, 2]").unwrap(), serde_json::json!([1, 2]));
        assert_eq!(parse_document(b"\"x\"").unwrap(), serde_json::json!("x"));
    }

    #[test]
    fn strips_leading_bom() {
        let bytes = "\u{feff}{\"a\": 1}".as_bytes();
        assert_eq!(parse_document(bytes).unwrap()["a"], 1);
    }

    #[test]
    fn reports_encoding_and_syntax_failures_separately() {
        assert!(matches!(
            parse_document(&[0xff, 0xfe, 0x00]),
            Err(UploadError::InvalidUtf8(_))
        ));
        let err = parse_document(b"{ not json").unwrap_err();
        assert!(matches!(err, UploadError::InvalidJson(_)));
        assert!(err.to_string().starts_with("file is not valid JSON"));
    }
}
