//! 생성 결과를 복사/다운로드로 내보내는 유스케이스.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::application::ports::{OutputSink, Reporter};
use crate::application::session::ConfigSession;

/// 내보내기 동작.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportAction {
    /// 현재 모드의 텍스트를 복사한다(`None`이면 표준 출력).
    Copy { target: Option<PathBuf> },
    /// 전체 문서를 디렉터리에 파일로 저장한다.
    /// 불러온 원본 파일 자리는 `overwrite_source`일 때만 덮어쓴다.
    Download { dir: PathBuf, overwrite_source: bool },
}

pub struct ExportUseCase<'a> {
    pub sink: &'a dyn OutputSink,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ExportUseCase<'a> {
    /// 검증 오류가 있거나 모드가 허용하지 않으면 내보내지 않는다.
    /// 다운로드한 경우 저장 경로를 반환한다.
    pub fn execute(
        &self,
        session: &ConfigSession,
        action: &ExportAction,
        fallback_name: Option<&str>,
    ) -> Result<Option<PathBuf>> {
        let errors = session.errors();
        if !errors.is_empty() {
            for issue in &errors {
                self.reporter.status("Validation", &issue.to_string());
            }
            bail!(
                "{} validation error(s); copy and download are disabled",
                errors.len()
            );
        }

        let permissions = session.permissions();
        match action {
            ExportAction::Copy { target } => {
                if !permissions.copy {
                    bail!("copy is not permitted right now");
                }
                let text = session.render_current();
                self.sink.copy(&text, target.as_deref())?;
                if let Some(target) = target {
                    self.reporter.status(
                        "Copy",
                        &format!("{} output written to {}", session.effective_mode(), target.display()),
                    );
                }
                Ok(None)
            }
            ExportAction::Download {
                dir,
                overwrite_source,
            } => {
                if !permissions.download {
                    bail!(
                        "download needs full output mode; a {} is not a standalone document",
                        session.effective_mode()
                    );
                }
                let name = session.download_name(fallback_name);
                let target = dir.join(&name);
                if let Some(source) = session.document().and_then(|doc| doc.source.as_deref())
                    && self.sink.same_file(&target, source)
                {
                    if !*overwrite_source {
                        bail!(
                            "refusing to overwrite the loaded document {}: the merged output drops auth profiles (choose another output directory or use --force)",
                            source.display()
                        );
                    }
                    tracing::warn!("overwriting loaded document {}", source.display());
                }
                let text = session.render_current();
                let path = self.sink.download(Path::new(dir), &name, &text)?;
                self.reporter
                    .status("Download", &format!("saved {}", path.display()));
                Ok(Some(path))
            }
        }
    }
}
