//! 편집 중인 초안을 파일로 저장하는 유스케이스.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::DraftRepository;
use crate::application::session::ConfigSession;

pub struct SaveDraftUseCase<'a> {
    pub draft_repo: &'a dyn DraftRepository,
}

impl<'a> SaveDraftUseCase<'a> {
    pub fn execute(&self, session: &ConfigSession, path: &Path) -> Result<()> {
        self.draft_repo.save(path, session.draft())?;
        tracing::info!("draft saved to {}", path.display());
        Ok(())
    }
}
