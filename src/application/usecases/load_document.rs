//! 기존 설정 문서를 읽어 세션에 병합 대상으로 올리는 유스케이스.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{DocumentSource, Reporter};
use crate::application::session::ConfigSession;

pub struct LoadDocumentUseCase<'a> {
    pub document_source: &'a dyn DocumentSource,
    pub reporter: &'a dyn Reporter,
}

impl<'a> LoadDocumentUseCase<'a> {
    /// 파일을 읽지 못하면 오류를 반환한다.
    /// 내용 해석 실패는 세션에 기록만 하고 계속 진행한다(`Ok(false)`).
    pub fn execute(&self, session: &mut ConfigSession, path: &Path) -> Result<bool> {
        let file = self.document_source.read(path)?;
        let name = file.name.clone();
        match session.load(Some(file)) {
            Ok(()) => {
                self.reporter.status("Upload", &format!("loaded {name}"));
                Ok(true)
            }
            Err(err) => {
                self.reporter
                    .status("Upload", &format!("{name}: {err}; continuing without it"));
                Ok(false)
            }
        }
    }
}
