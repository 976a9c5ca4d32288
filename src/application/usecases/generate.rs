//! 초안(+기존 문서)에서 설정을 생성해 내보내는 유스케이스.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{
    DocumentSource, DraftRepository, OutputSink, Reporter, SettingsRepository,
};
use crate::application::usecases::export::{ExportAction, ExportUseCase};
use crate::application::usecases::load_document::LoadDocumentUseCase;
use crate::application::usecases::open_draft::OpenDraftUseCase;
use crate::domain::output::OutputMode;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub draft_path: Option<PathBuf>,
    pub base_path: Option<PathBuf>,
    pub mode: Option<OutputMode>,
    pub primary: Option<String>,
    pub download: bool,
    /// 복사 결과를 쓸 파일(없으면 표준 출력)
    pub output: Option<PathBuf>,
    /// 다운로드 디렉터리(없으면 설정값)
    pub output_dir: Option<PathBuf>,
    /// 다운로드가 `--base` 파일 자리를 덮어쓰는 것을 허용한다.
    pub force: bool,
}

pub struct GenerateConfigUseCase<'a> {
    pub settings_repo: &'a dyn SettingsRepository,
    pub draft_repo: &'a dyn DraftRepository,
    pub document_source: &'a dyn DocumentSource,
    pub sink: &'a dyn OutputSink,
    pub reporter: &'a dyn Reporter,
}

impl<'a> GenerateConfigUseCase<'a> {
    pub fn execute(&self, options: GenerateOptions) -> Result<Option<PathBuf>> {
        let opened = OpenDraftUseCase {
            settings_repo: self.settings_repo,
            draft_repo: self.draft_repo,
        }
        .execute(options.draft_path.as_deref(), options.mode, false)?;
        let settings = opened.settings;
        let mut session = opened.session;

        if let Some(primary) = options.primary.as_deref() {
            session.draft_mut().set_primary(primary);
        }
        if let Some(base) = options.base_path.as_deref() {
            LoadDocumentUseCase {
                document_source: self.document_source,
                reporter: self.reporter,
            }
            .execute(&mut session, base)?;
        }
        tracing::debug!(
            "generating from {} (mode={}, effective={})",
            opened.path.display(),
            session.requested_mode(),
            session.effective_mode()
        );

        let action = if options.download {
            ExportAction::Download {
                dir: options
                    .output_dir
                    .unwrap_or_else(|| PathBuf::from(settings.output_dir())),
                overwrite_source: options.force,
            }
        } else {
            ExportAction::Copy {
                target: options.output,
            }
        };

        let fallback_name = settings.download_name();
        ExportUseCase {
            sink: self.sink,
            reporter: self.reporter,
        }
        .execute(&session, &action, Some(&fallback_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::{Component, Path};
    use std::sync::Mutex;

    use crate::application::config::Settings;
    use crate::domain::draft::{Draft, ModelDraft, ProviderDraft};
    use crate::domain::upload::UploadedFile;

    struct StubSettings;

    impl SettingsRepository for StubSettings {
        fn load(&self) -> Result<Settings> {
            Ok(Settings::default())
        }

        fn inspect_pretty_json(&self) -> Result<String> {
            Ok("{}".to_string())
        }
    }

    struct MemoryDrafts(Draft);

    impl DraftRepository for MemoryDrafts {
        fn load(&self, _path: &Path) -> Result<Draft> {
            Ok(self.0.clone())
        }

        fn save(&self, _path: &Path, _draft: &Draft) -> Result<()> {
            Ok(())
        }

        fn exists(&self, _path: &Path) -> bool {
            true
        }
    }

    struct MemoryDocuments(HashMap<PathBuf, String>);

    impl DocumentSource for MemoryDocuments {
        fn read(&self, path: &Path) -> Result<UploadedFile> {
            let body = self
                .0
                .get(path)
                .ok_or_else(|| anyhow::anyhow!("no such file: {}", path.display()))?;
            Ok(UploadedFile {
                name: path.display().to_string(),
                bytes: body.as_bytes().to_vec(),
                source: Some(path.to_path_buf()),
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        copied: Mutex<Vec<String>>,
        downloaded: Mutex<Vec<(String, String)>>,
    }

    impl OutputSink for RecordingSink {
        fn copy(&self, text: &str, _target: Option<&Path>) -> Result<()> {
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn download(&self, dir: &Path, file_name: &str, text: &str) -> Result<PathBuf> {
            self.downloaded
                .lock()
                .unwrap()
                .push((file_name.to_string(), text.to_string()));
            Ok(dir.join(file_name))
        }

        fn same_file(&self, a: &Path, b: &Path) -> bool {
            let plain = |p: &Path| -> PathBuf {
                p.components()
                    .filter(|c| !matches!(c, Component::CurDir))
                    .collect()
            };
            plain(a) == plain(b)
        }
    }

    #[derive(Default)]
    struct SilentReporter(Mutex<Vec<String>>);

    impl Reporter for SilentReporter {
        fn section(&self, _name: &str) {}
        fn kv(&self, _key: &str, _value: &str) {}
        fn status(&self, scope: &str, message: &str) {
            self.0.lock().unwrap().push(format!("{scope}: {message}"));
        }
        fn raw(&self, _line: &str) {}
    }

    fn valid_draft() -> Draft {
        Draft {
            providers: vec![ProviderDraft {
                key: "p".into(),
                base_url: "https://p.test/v1".into(),
                api_key: "sk".into(),
                models: vec![ModelDraft {
                    id: "m".into(),
                    name: "M".into(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            primary: String::new(),
        }
    }

    fn run(
        draft: Draft,
        docs: &[(&str, &str)],
        options: GenerateOptions,
    ) -> (Result<Option<PathBuf>>, RecordingSink, SilentReporter) {
        let drafts = MemoryDrafts(draft);
        let documents = MemoryDocuments(
            docs.iter()
                .map(|(p, b)| (PathBuf::from(p), b.to_string()))
                .collect(),
        );
        let sink = RecordingSink::default();
        let reporter = SilentReporter::default();
        let result = GenerateConfigUseCase {
            settings_repo: &StubSettings,
            draft_repo: &drafts,
            document_source: &documents,
            sink: &sink,
            reporter: &reporter,
        }
        .execute(options);
        (result, sink, reporter)
    }

    #[test]
    fn copies_snippet_by_default() {
        let (result, sink, _) = run(valid_draft(), &[], GenerateOptions::default());
        assert_eq!(result.unwrap(), None);
        let copied = sink.copied.lock().unwrap();
        assert!(copied[0].starts_with("  \"models\""));
    }

    #[test]
    fn snippet_download_is_refused() {
        let (result, sink, _) = run(
            valid_draft(),
            &[],
            GenerateOptions {
                download: true,
                ..Default::default()
            },
        );
        assert!(result.is_err());
        assert!(sink.downloaded.lock().unwrap().is_empty());
    }

    #[test]
    fn base_document_forces_full_download_under_its_name() {
        let (result, sink, _) = run(
            valid_draft(),
            &[("openclaw.json", r#"{"gateway": {"port": 1}}"#)],
            GenerateOptions {
                base_path: Some(PathBuf::from("openclaw.json")),
                download: true,
                output_dir: Some(PathBuf::from("out")),
                ..Default::default()
            },
        );
        assert_eq!(result.unwrap(), Some(PathBuf::from("out/openclaw.json")));
        let downloaded = sink.downloaded.lock().unwrap();
        assert_eq!(downloaded[0].0, "openclaw.json");
        assert!(downloaded[0].1.contains("\"gateway\""));
    }

    #[test]
    fn download_onto_the_base_file_needs_force() {
        let docs = [("openclaw.json", r#"{"auth": {"profiles": {"a": {}}}}"#)];
        let (result, sink, _) = run(
            valid_draft(),
            &docs,
            GenerateOptions {
                base_path: Some(PathBuf::from("openclaw.json")),
                download: true,
                output_dir: Some(PathBuf::from(".")),
                ..Default::default()
            },
        );
        assert!(result.is_err());
        assert!(sink.downloaded.lock().unwrap().is_empty());

        let (result, sink, _) = run(
            valid_draft(),
            &docs,
            GenerateOptions {
                base_path: Some(PathBuf::from("openclaw.json")),
                download: true,
                output_dir: Some(PathBuf::from(".")),
                force: true,
                ..Default::default()
            },
        );
        assert_eq!(result.unwrap(), Some(PathBuf::from("./openclaw.json")));
        assert_eq!(sink.downloaded.lock().unwrap().len(), 1);
    }

    #[test]
    fn unparsable_base_is_reported_and_generation_continues() {
        let (result, sink, reporter) = run(
            valid_draft(),
            &[("broken.json", "{ nope")],
            GenerateOptions {
                base_path: Some(PathBuf::from("broken.json")),
                mode: Some(OutputMode::Full),
                ..Default::default()
            },
        );
        assert!(result.is_ok());
        assert!(sink.copied.lock().unwrap()[0].starts_with('{'));
        assert!(
            reporter
                .0
                .lock()
                .unwrap()
                .iter()
                .any(|line| line.starts_with("Upload: broken.json"))
        );
    }

    #[test]
    fn validation_errors_block_export() {
        let mut draft = valid_draft();
        draft.providers[0].base_url.clear();
        let (result, sink, reporter) = run(draft, &[], GenerateOptions::default());
        assert!(result.is_err());
        assert!(sink.copied.lock().unwrap().is_empty());
        assert_eq!(reporter.0.lock().unwrap().len(), 1);
    }
}
