//! 초안 검증 결과를 조회하는 유스케이스.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{DraftRepository, SettingsRepository};
use crate::application::usecases::open_draft::OpenDraftUseCase;
use crate::domain::validate::ValidationIssue;

/// 검증 결과와 해석된 대표 모델.
pub struct DraftReport {
    pub primary: String,
    pub issues: Vec<ValidationIssue>,
}

pub struct CheckDraftUseCase<'a> {
    pub settings_repo: &'a dyn SettingsRepository,
    pub draft_repo: &'a dyn DraftRepository,
}

impl<'a> CheckDraftUseCase<'a> {
    pub fn execute(&self, path: Option<&Path>, primary: Option<&str>) -> Result<DraftReport> {
        let opened = OpenDraftUseCase {
            settings_repo: self.settings_repo,
            draft_repo: self.draft_repo,
        }
        .execute(path, None, false)?;

        let mut session = opened.session;
        if let Some(primary) = primary {
            session.draft_mut().set_primary(primary);
        }
        Ok(DraftReport {
            primary: session.primary(),
            issues: session.errors(),
        })
    }
}
