//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod document_source;
mod draft_repository;
mod output_sink;
mod reporter;
mod settings_repository;

pub use document_source::FileDocumentSource;
pub use draft_repository::JsonDraftRepository;
pub use output_sink::FileOutputSink;
pub use reporter::ConsoleReporter;
pub use settings_repository::JsonSettingsRepository;
