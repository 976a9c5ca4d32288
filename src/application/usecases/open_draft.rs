//! 설정과 초안 파일을 읽어 편집 세션을 여는 유스케이스.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::application::config::Settings;
use crate::application::ports::{DraftRepository, SettingsRepository};
use crate::application::session::ConfigSession;
use crate::domain::draft::Draft;
use crate::domain::output::OutputMode;

/// 열린 세션과 그 출처.
pub struct OpenedDraft {
    pub path: PathBuf,
    pub settings: Settings,
    pub session: ConfigSession,
}

pub struct OpenDraftUseCase<'a> {
    pub settings_repo: &'a dyn SettingsRepository,
    pub draft_repo: &'a dyn DraftRepository,
}

impl<'a> OpenDraftUseCase<'a> {
    /// `path`가 없으면 설정의 기본 초안 경로를 쓴다.
    /// `allow_missing`이면 초안 파일이 없을 때 빈 초안으로 시작한다.
    pub fn execute(
        &self,
        path: Option<&Path>,
        mode: Option<OutputMode>,
        allow_missing: bool,
    ) -> Result<OpenedDraft> {
        let settings = self.settings_repo.load()?;
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(settings.draft_path()));

        let draft = if self.draft_repo.exists(&path) {
            self.draft_repo.load(&path)?
        } else if allow_missing {
            tracing::debug!("draft {} not found, starting empty", path.display());
            Draft::default()
        } else {
            bail!(
                "draft not found: {} (run `clawgen init` to create one)",
                path.display()
            );
        };

        let mode = mode.unwrap_or_else(|| settings.output_mode());
        Ok(OpenedDraft {
            path,
            settings,
            session: ConfigSession::new(draft, mode),
        })
    }
}
