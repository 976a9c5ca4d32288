//! 빈 초안 파일을 만드는 유스케이스.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::application::ports::{DraftRepository, SettingsRepository};
use crate::domain::draft::Draft;

pub struct InitDraftUseCase<'a> {
    pub settings_repo: &'a dyn SettingsRepository,
    pub draft_repo: &'a dyn DraftRepository,
}

impl<'a> InitDraftUseCase<'a> {
    /// 기존 파일은 `force`일 때만 덮어쓴다.
    pub fn execute(&self, path: Option<&Path>, force: bool) -> Result<PathBuf> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(self.settings_repo.load()?.draft_path()),
        };
        if self.draft_repo.exists(&path) && !force {
            bail!(
                "draft already exists: {} (use --force to overwrite)",
                path.display()
            );
        }
        self.draft_repo.save(&path, &Draft::default())?;
        Ok(path)
    }
}
