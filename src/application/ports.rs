//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::config::Settings;
use crate::domain::draft::Draft;
use crate::domain::upload::UploadedFile;

/// 도구 설정 로딩/점검을 담당하는 저장소 포트.
pub trait SettingsRepository: Send + Sync {
    fn load(&self) -> Result<Settings>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 편집 초안을 읽고 쓰는 저장소 포트.
pub trait DraftRepository: Send + Sync {
    fn load(&self, path: &Path) -> Result<Draft>;
    fn save(&self, path: &Path, draft: &Draft) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

/// 기존 설정 문서(업로드 대상)의 원본 바이트를 읽는 포트.
pub trait DocumentSource: Send + Sync {
    fn read(&self, path: &Path) -> Result<UploadedFile>;
}

/// 생성된 텍스트를 내보내는 포트(복사/다운로드).
pub trait OutputSink: Send + Sync {
    /// 텍스트를 복사 대상으로 내보낸다. `target`이 없으면 표준 출력.
    fn copy(&self, text: &str, target: Option<&Path>) -> Result<()>;
    /// 전체 문서를 디렉터리에 파일로 저장하고 경로를 반환한다.
    fn download(&self, dir: &Path, file_name: &str, text: &str) -> Result<PathBuf>;
    /// 두 경로가 같은 파일을 가리키는지 확인한다.
    fn same_file(&self, a: &Path, b: &Path) -> bool;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
