//! 기존 설정 문서를 파일에서 읽는 어댑터.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::DocumentSource;
use crate::domain::upload::UploadedFile;

pub struct FileDocumentSource;

impl DocumentSource for FileDocumentSource {
    /// 파일 이름(경로의 마지막 요소)을 업로드 이름으로 쓴다.
    fn read(&self, path: &Path) -> Result<UploadedFile> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read document at {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(UploadedFile {
            name,
            bytes,
            source: Some(path.to_path_buf()),
        })
    }
}
