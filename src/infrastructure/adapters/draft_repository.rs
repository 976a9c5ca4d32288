//! 초안 저장소 포트 구현 어댑터.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::DraftRepository;
use crate::domain::draft::Draft;

/// 초안을 사람이 편집할 수 있는 JSON 파일로 보관한다.
pub struct JsonDraftRepository;

impl DraftRepository for JsonDraftRepository {
    fn load(&self, path: &Path) -> Result<Draft> {
        tracing::debug!("loading draft {}", path.display());
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read draft at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse draft JSON in {}", path.display()))
    }

    fn save(&self, path: &Path, draft: &Draft) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let rendered = serde_json::to_string_pretty(draft)?;
        fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("failed to write draft at {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
