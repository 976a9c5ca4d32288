//! 편집 세션: 초안, 불러온 문서, 출력 모드를 보관하고 모든 산출물을 매번 새로 계산한다.
//!
//! 캐시를 두지 않으므로 상태가 바뀌면 다음 조회가 곧바로 최신 결과가 된다.

use serde_json::Value;

use crate::domain::config::CanonicalConfig;
use crate::domain::draft::Draft;
use crate::domain::merge::merge_config;
use crate::domain::output::{self, ActionPermissions, DEFAULT_DOWNLOAD_NAME, OutputMode};
use crate::domain::synthesize::{ModelOption, model_options, resolve_primary, synthesize};
use crate::domain::upload::{LoadedDocument, UploadError, UploadedFile, parse_document};
use crate::domain::validate::{ValidationIssue, validate};

#[derive(Debug, Clone)]
pub struct ConfigSession {
    draft: Draft,
    requested_mode: OutputMode,
    document: Option<LoadedDocument>,
    upload_error: Option<String>,
}

impl ConfigSession {
    pub fn new(draft: Draft, requested_mode: OutputMode) -> Self {
        Self {
            draft,
            requested_mode,
            document: None,
            upload_error: None,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn model_options(&self) -> Vec<ModelOption> {
        model_options(&self.draft.providers)
    }

    /// 현재 유효한 대표 모델 참조.
    pub fn primary(&self) -> String {
        resolve_primary(&self.draft.providers, &self.draft.primary)
    }

    pub fn errors(&self) -> Vec<ValidationIssue> {
        validate(&self.draft, &self.primary())
    }

    pub fn canonical(&self) -> CanonicalConfig {
        synthesize(&self.draft)
    }

    pub fn merged(&self) -> Value {
        merge_config(&self.canonical(), self.document.as_ref().map(|doc| &doc.data))
    }

    pub fn requested_mode(&self) -> OutputMode {
        self.requested_mode
    }

    pub fn set_mode(&mut self, mode: OutputMode) {
        self.requested_mode = mode;
    }

    pub fn effective_mode(&self) -> OutputMode {
        self.requested_mode.effective(self.document.is_some())
    }

    /// 요청한 모드를 문서 로딩 상태에 맞춰 보정한 뒤 직렬화한다.
    pub fn render(&self, mode: OutputMode) -> String {
        let canonical = self.canonical();
        let effective = mode.effective(self.document.is_some());
        let merged = merge_config(&canonical, self.document.as_ref().map(|doc| &doc.data));
        output::render(effective, &canonical, &merged)
    }

    pub fn render_current(&self) -> String {
        self.render(self.requested_mode)
    }

    pub fn permissions(&self) -> ActionPermissions {
        ActionPermissions::evaluate(self.effective_mode(), self.errors().len())
    }

    /// 업로드 파일을 해석해 병합 대상으로 삼는다. 실패하면 이전 문서도 비운다.
    pub fn load(&mut self, file: Option<UploadedFile>) -> Result<(), UploadError> {
        let Some(file) = file else {
            return Ok(());
        };
        match parse_document(&file.bytes) {
            Ok(data) => {
                tracing::debug!("loaded document {}", file.name);
                self.document = Some(LoadedDocument {
                    name: file.name,
                    data,
                    source: file.source,
                });
                self.upload_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("failed to load document {}: {}", file.name, err);
                self.document = None;
                self.upload_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        self.document = None;
        self.upload_error = None;
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }

    /// 불러온 문서 이름을 그대로 쓰고, 없으면 `fallback`을 쓴다.
    pub fn download_name(&self, fallback: Option<&str>) -> String {
        match (&self.document, fallback) {
            (Some(doc), _) => doc.name.clone(),
            (None, Some(name)) => name.to_string(),
            (None, None) => DEFAULT_DOWNLOAD_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{ModelDraft, ProviderDraft};

    fn valid_session() -> ConfigSession {
        let draft = Draft {
            providers: vec![ProviderDraft {
                key: "nvidia".into(),
                base_url: "https://integrate.api.nvidia.com/v1".into(),
                api_key: "sk-x".into(),
                models: vec![ModelDraft {
                    id: "minimaxai/minimax-m2".into(),
                    name: "mini-max-thinking".into(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            primary: String::new(),
        };
        ConfigSession::new(draft, OutputMode::Snippet)
    }

    fn upload(name: &str, body: &str) -> Option<UploadedFile> {
        Some(UploadedFile {
            name: name.into(),
            bytes: body.as_bytes().to_vec(),
            source: None,
        })
    }

    #[test]
    fn merged_equals_canonical_without_document() {
        let session = valid_session();
        assert_eq!(session.merged(), session.canonical().to_value());
        assert_eq!(session.primary(), "nvidia/minimaxai/minimax-m2");
    }

    #[test]
    fn failed_upload_clears_document_and_records_message() {
        let mut session = valid_session();
        session.load(upload("a.json", r#"{"gateway": {}}"#)).unwrap();
        assert!(session.document().is_some());

        assert!(session.load(upload("b.json", "not json")).is_err());
        assert!(session.document().is_none());
        assert!(!session.upload_error().unwrap_or_default().is_empty());
        assert_eq!(session.merged(), session.canonical().to_value());

        session.load(upload("c.json", r#"{"x": 1}"#)).unwrap();
        assert!(session.upload_error().is_none());
        assert_eq!(session.merged()["x"], 1);
        assert_eq!(session.download_name(None), "c.json");
    }

    #[test]
    fn missing_upload_is_a_no_op() {
        let mut session = valid_session();
        session.load(upload("a.json", "{}")).unwrap();
        session.load(None).unwrap();
        assert!(session.document().is_some());
    }

    #[test]
    fn clear_removes_document_and_error() {
        let mut session = valid_session();
        let _ = session.load(upload("bad.json", "{"));
        session.clear();
        assert!(session.document().is_none());
        assert!(session.upload_error().is_none());
        assert_eq!(session.download_name(Some("mine.json")), "mine.json");
    }

    #[test]
    fn loaded_document_switches_snippet_to_full_and_enables_download() {
        let mut session = valid_session();
        assert_eq!(session.effective_mode(), OutputMode::Snippet);
        assert_eq!(
            session.permissions(),
            ActionPermissions { copy: true, download: false }
        );

        session.load(upload("openclaw.json", r#"{"auth": {"profiles": {}}}"#)).unwrap();
        assert_eq!(session.effective_mode(), OutputMode::Full);
        assert_eq!(
            session.permissions(),
            ActionPermissions { copy: true, download: true }
        );
        let text = session.render(OutputMode::Snippet);
        assert!(text.starts_with('{'));
        assert!(!text.contains("\"auth\""));
    }

    #[test]
    fn validation_errors_block_every_action() {
        let mut session = valid_session();
        session.set_mode(OutputMode::Full);
        session.draft_mut().providers[0].api_key.clear();
        assert_eq!(session.errors().len(), 1);
        assert_eq!(
            session.permissions(),
            ActionPermissions { copy: false, download: false }
        );
    }

    #[test]
    fn edits_are_reflected_on_next_query() {
        let mut session = valid_session();
        let idx = session.draft_mut().add_provider();
        let provider = session.draft_mut().provider_mut(idx).unwrap();
        provider.key = "second".into();
        provider.models[0].id = "b".into();
        session.draft_mut().set_primary("second/b");
        assert_eq!(session.primary(), "second/b");
        assert!(session.canonical().models.providers.contains_key("second"));

        session.draft_mut().remove_provider(idx).unwrap();
        assert_eq!(session.primary(), "nvidia/minimaxai/minimax-m2");
    }
}
