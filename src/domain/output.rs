//! 출력 모드별 직렬화와 복사/다운로드 허용 규칙.

use std::fmt;
use std::str::FromStr;

use serde_json::{Value, json};

use crate::domain::config::CanonicalConfig;

pub const DEFAULT_DOWNLOAD_NAME: &str = "openclaw-model-config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// 병합된 전체 문서
    Full,
    /// `models`/`agents` 조각(바깥 중괄호 제거)
    #[default]
    Snippet,
}

impl OutputMode {
    pub fn code(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Snippet => "snippet",
        }
    }

    /// 문서를 불러온 상태에서는 조각 모드를 쓸 수 없어 전체 모드로 바뀐다.
    pub fn effective(self, document_loaded: bool) -> Self {
        if document_loaded { Self::Full } else { self }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "snippet" => Ok(Self::Snippet),
            other => Err(format!("unknown output mode: {other} (expected full|snippet)")),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 현재 허용되는 출력 동작.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionPermissions {
    pub copy: bool,
    pub download: bool,
}

impl ActionPermissions {
    /// 검증 오류가 있으면 모두 막고, 다운로드는 전체 모드에서만 허용한다.
    pub fn evaluate(effective: OutputMode, error_count: usize) -> Self {
        let valid = error_count == 0;
        Self {
            copy: valid,
            download: valid && effective == OutputMode::Full,
        }
    }
}

/// 병합 결과를 들여쓰기 2칸의 JSON으로 직렬화한다.
pub fn render_full(merged: &Value) -> String {
    format!("{merged:#}")
}

/// 정규 설정의 `models`/`agents`만 직렬화하고 바깥 중괄호를 벗겨 낸다.
pub fn render_snippet(canonical: &CanonicalConfig) -> String {
    let value = canonical.to_value();
    let snippet = json!({
        "models": value["models"],
        "agents": value["agents"],
    });
    let text = format!("{snippet:#}");
    let text = text.strip_prefix("{\n").unwrap_or(&text);
    let text = text.strip_suffix("\n}").unwrap_or(text);
    text.to_string()
}

pub fn render(mode: OutputMode, canonical: &CanonicalConfig, merged: &Value) -> String {
    match mode {
        OutputMode::Full => render_full(merged),
        OutputMode::Snippet => render_snippet(canonical),
    }
}
