//! 애플리케이션이 사용하는 도구 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

use crate::domain::output::{DEFAULT_DOWNLOAD_NAME, OutputMode};

pub const DEFAULT_DRAFT_PATH: &str = "clawgen-draft.json";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Settings {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsSettings {
    /// 기본 출력 모드(full/snippet)
    pub output_mode: Option<String>,
    /// 다운로드 파일을 쓸 디렉터리
    pub output_dir: Option<String>,
    /// 초안 파일 경로
    pub draft_path: Option<String>,
    /// 불러온 문서가 없을 때의 다운로드 파일 이름
    pub download_name: Option<String>,
}

impl Settings {
    /// 알 수 없는 모드 문자열은 기본값(snippet)으로 본다.
    pub fn output_mode(&self) -> OutputMode {
        self.defaults
            .output_mode
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn output_dir(&self) -> String {
        self.defaults
            .output_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
    }

    pub fn draft_path(&self) -> String {
        self.defaults
            .draft_path
            .clone()
            .unwrap_or_else(|| DEFAULT_DRAFT_PATH.to_string())
    }

    pub fn download_name(&self) -> String {
        self.defaults
            .download_name
            .clone()
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Settings) {
        self.defaults.merge_from(other.defaults);
    }
}

impl DefaultsSettings {
    pub fn merge_from(&mut self, other: DefaultsSettings) {
        if other.output_mode.is_some() {
            self.output_mode = other.output_mode;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.draft_path.is_some() {
            self.draft_path = other.draft_path;
        }
        if other.download_name.is_some() {
            self.download_name = other.download_name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_values_override_earlier_ones_field_by_field() {
        let mut base: Settings =
            serde_json::from_str(r#"{"defaults": {"output_mode": "full", "output_dir": "/tmp"}}"#)
                .unwrap();
        let overlay: Settings =
            serde_json::from_str(r#"{"defaults": {"output_dir": "out"}}"#).unwrap();
        base.merge_from(overlay);
        assert_eq!(base.output_mode(), OutputMode::Full);
        assert_eq!(base.output_dir(), "out");
        assert_eq!(base.draft_path(), DEFAULT_DRAFT_PATH);
    }

    #[test]
    fn unknown_mode_falls_back_to_snippet() {
        let settings: Settings =
            serde_json::from_str(r#"{"defaults": {"output_mode": "diff"}}"#).unwrap();
        assert_eq!(settings.output_mode(), OutputMode::Snippet);
        assert_eq!(settings.download_name(), "openclaw-model-config.json");
    }
}
