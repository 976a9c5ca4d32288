//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::check_draft::CheckDraftUseCase;
use crate::application::usecases::export::ExportUseCase;
use crate::application::usecases::generate::GenerateConfigUseCase;
use crate::application::usecases::init_draft::InitDraftUseCase;
use crate::application::usecases::inspect_settings::InspectSettingsUseCase;
use crate::application::usecases::load_document::LoadDocumentUseCase;
use crate::application::usecases::open_draft::OpenDraftUseCase;
use crate::application::usecases::save_draft::SaveDraftUseCase;
use crate::infrastructure::adapters::{
    ConsoleReporter, FileDocumentSource, FileOutputSink, JsonDraftRepository,
    JsonSettingsRepository,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    settings_repo: JsonSettingsRepository,
    draft_repo: JsonDraftRepository,
    document_source: FileDocumentSource,
    sink: FileOutputSink,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new()
    }
}

impl AppComposition {
    pub fn new() -> Self {
        Self {
            settings_repo: JsonSettingsRepository,
            draft_repo: JsonDraftRepository,
            document_source: FileDocumentSource,
            sink: FileOutputSink,
            reporter: ConsoleReporter::new(),
        }
    }

    /// REPL 화면 출력용 리포터.
    pub fn reporter(&self) -> &ConsoleReporter {
        &self.reporter
    }

    /// 초안 생성 유스케이스를 생성한다.
    pub fn init_draft_usecase(&self) -> InitDraftUseCase<'_> {
        InitDraftUseCase {
            settings_repo: &self.settings_repo,
            draft_repo: &self.draft_repo,
        }
    }

    /// 초안 열기 유스케이스를 생성한다.
    pub fn open_draft_usecase(&self) -> OpenDraftUseCase<'_> {
        OpenDraftUseCase {
            settings_repo: &self.settings_repo,
            draft_repo: &self.draft_repo,
        }
    }

    pub fn save_draft_usecase(&self) -> SaveDraftUseCase<'_> {
        SaveDraftUseCase {
            draft_repo: &self.draft_repo,
        }
    }

    /// 초안 검증 유스케이스를 생성한다.
    pub fn check_draft_usecase(&self) -> CheckDraftUseCase<'_> {
        CheckDraftUseCase {
            settings_repo: &self.settings_repo,
            draft_repo: &self.draft_repo,
        }
    }

    pub fn load_document_usecase(&self) -> LoadDocumentUseCase<'_> {
        LoadDocumentUseCase {
            document_source: &self.document_source,
            reporter: &self.reporter,
        }
    }

    pub fn export_usecase(&self) -> ExportUseCase<'_> {
        ExportUseCase {
            sink: &self.sink,
            reporter: &self.reporter,
        }
    }

    /// 설정 생성 유스케이스를 생성한다.
    pub fn generate_usecase(&self) -> GenerateConfigUseCase<'_> {
        GenerateConfigUseCase {
            settings_repo: &self.settings_repo,
            draft_repo: &self.draft_repo,
            document_source: &self.document_source,
            sink: &self.sink,
            reporter: &self.reporter,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_settings_usecase(&self) -> InspectSettingsUseCase<'_> {
        InspectSettingsUseCase {
            settings_repo: &self.settings_repo,
        }
    }
}
