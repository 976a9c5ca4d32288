//! 생성 결과 내보내기 어댑터(표준 출력/파일).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::OutputSink;

/// 복사는 표준 출력이나 지정 파일로, 다운로드는 디렉터리 아래 파일로 쓴다.
pub struct FileOutputSink;

impl OutputSink for FileOutputSink {
    fn copy(&self, text: &str, target: Option<&Path>) -> Result<()> {
        match target {
            Some(path) => write_file(path, text),
            None => {
                let mut out = io::stdout().lock();
                writeln!(out, "{text}").context("failed to write to stdout")?;
                out.flush().context("failed to flush stdout")
            }
        }
    }

    fn download(&self, dir: &Path, file_name: &str, text: &str) -> Result<PathBuf> {
        let path = dir.join(file_name);
        write_file(&path, text)?;
        Ok(path)
    }

    /// 둘 다 존재하면 정규화한 경로로, 아니면 경로 그대로 비교한다.
    fn same_file(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, format!("{text}\n"))
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_writes_under_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let path = FileOutputSink
            .download(&out, "openclaw.json", "{\n  \"a\": 1\n}")
            .unwrap();
        assert_eq!(path, out.join("openclaw.json"));
        assert_eq!(fs::read_to_string(path).unwrap(), "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn same_file_sees_through_relative_segments() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("openclaw.json");
        fs::write(&file, "{}").unwrap();
        let nested = dir.path().join("sub");
        fs::create_dir(&nested).unwrap();

        assert!(FileOutputSink.same_file(&nested.join("..").join("openclaw.json"), &file));
        assert!(!FileOutputSink.same_file(&nested.join("openclaw.json"), &file));
    }

    #[test]
    fn copy_to_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("snippet.txt");
        fs::write(&target, "old").unwrap();
        FileOutputSink.copy("  \"models\": {}", Some(&target)).unwrap();
        assert_eq!(fs::read_to_string(target).unwrap(), "  \"models\": {}\n");
    }
}
