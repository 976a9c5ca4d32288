//! 편집 중인 provider/model 초안(draft) 모델과 편집 동작.
//!
//! 숫자 필드는 입력 도중의 값을 허용하기 위해 문자열로 보관한다.

use serde::{Deserialize, Serialize};

use crate::domain::config::{DEFAULT_API, DEFAULT_CONTEXT_WINDOW};

pub const API_OPENAI_COMPLETIONS: &str = "openai-completions";
pub const API_OPENAI_RESPONSES: &str = "openai-responses";

/// 초안 편집 동작의 실패 사유.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("provider {0} does not exist")]
    ProviderIndex(usize),
    #[error("model {model} of provider {provider} does not exist")]
    ModelIndex { provider: usize, model: usize },
    #[error("unknown {scope} field: {field}")]
    UnknownField { scope: &'static str, field: String },
    #[error("expected a boolean for {field}, got '{value}'")]
    InvalidBool { field: String, value: String },
}

/// provider API 선택값.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApiSelection {
    #[default]
    OpenAiCompletions,
    OpenAiResponses,
    Custom(String),
}

impl ApiSelection {
    /// 출력에 기록할 api 값을 해석한다. 비어 있으면 기본값을 쓴다.
    pub fn resolve(&self) -> String {
        let value = match self {
            Self::OpenAiCompletions => API_OPENAI_COMPLETIONS,
            Self::OpenAiResponses => API_OPENAI_RESPONSES,
            Self::Custom(name) => name.trim(),
        };
        if value.is_empty() {
            DEFAULT_API.to_string()
        } else {
            value.to_string()
        }
    }
}

impl From<String> for ApiSelection {
    fn from(value: String) -> Self {
        match value.as_str() {
            API_OPENAI_COMPLETIONS => Self::OpenAiCompletions,
            API_OPENAI_RESPONSES => Self::OpenAiResponses,
            _ => Self::Custom(value),
        }
    }
}

impl From<ApiSelection> for String {
    fn from(value: ApiSelection) -> Self {
        match value {
            ApiSelection::OpenAiCompletions => API_OPENAI_COMPLETIONS.to_string(),
            ApiSelection::OpenAiResponses => API_OPENAI_RESPONSES.to_string(),
            ApiSelection::Custom(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelDraft {
    pub id: String,
    pub name: String,
    pub reasoning: bool,
    pub supports_text: bool,
    pub supports_image: bool,
    pub max_tokens_text: String,
    pub context_window_text: String,
    pub cost_input_text: String,
    pub cost_output_text: String,
    pub cost_cache_read_text: String,
    pub cost_cache_write_text: String,
    /// 고급 필드 패널 표시 여부(출력에는 포함되지 않음)
    pub advanced_visible: bool,
}

impl Default for ModelDraft {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            reasoning: false,
            supports_text: true,
            supports_image: false,
            max_tokens_text: "4096".to_string(),
            context_window_text: (DEFAULT_CONTEXT_WINDOW as u64).to_string(),
            cost_input_text: "0".to_string(),
            cost_output_text: "0".to_string(),
            cost_cache_read_text: "0".to_string(),
            cost_cache_write_text: "0".to_string(),
            advanced_visible: false,
        }
    }
}

impl ModelDraft {
    /// 이름으로 지정한 필드를 갱신한다.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), DraftError> {
        match field {
            "id" => self.id = value.to_string(),
            "name" => self.name = value.to_string(),
            "reasoning" => self.reasoning = parse_flag(field, value)?,
            "text" | "supportsText" => self.supports_text = parse_flag(field, value)?,
            "image" | "supportsImage" => self.supports_image = parse_flag(field, value)?,
            "maxTokens" => self.max_tokens_text = value.to_string(),
            "contextWindow" => self.context_window_text = value.to_string(),
            "costInput" => self.cost_input_text = value.to_string(),
            "costOutput" => self.cost_output_text = value.to_string(),
            "costCacheRead" => self.cost_cache_read_text = value.to_string(),
            "costCacheWrite" => self.cost_cache_write_text = value.to_string(),
            _ => {
                return Err(DraftError::UnknownField {
                    scope: "model",
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderDraft {
    pub key: String,
    pub base_url: String,
    pub api_key: String,
    pub api: ApiSelection,
    pub models: Vec<ModelDraft>,
}

impl Default for ProviderDraft {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_url: String::new(),
            api_key: String::new(),
            api: ApiSelection::default(),
            models: vec![ModelDraft::default()],
        }
    }
}

impl ProviderDraft {
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), DraftError> {
        match field {
            "key" => self.key = value.to_string(),
            "baseUrl" => self.base_url = value.to_string(),
            "apiKey" => self.api_key = value.to_string(),
            "api" => self.api = ApiSelection::from(value.to_string()),
            _ => {
                return Err(DraftError::UnknownField {
                    scope: "provider",
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// 폼 전체 상태. `primary`는 대표 모델 선택 힌트이며 오래된 값일 수 있다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    pub providers: Vec<ProviderDraft>,
    pub primary: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            providers: vec![ProviderDraft::default()],
            primary: String::new(),
        }
    }
}

impl Draft {
    pub fn add_provider(&mut self) -> usize {
        self.providers.push(ProviderDraft::default());
        self.providers.len() - 1
    }

    pub fn remove_provider(&mut self, index: usize) -> Result<ProviderDraft, DraftError> {
        if index >= self.providers.len() {
            return Err(DraftError::ProviderIndex(index + 1));
        }
        Ok(self.providers.remove(index))
    }

    pub fn provider_mut(&mut self, index: usize) -> Result<&mut ProviderDraft, DraftError> {
        self.providers
            .get_mut(index)
            .ok_or(DraftError::ProviderIndex(index + 1))
    }

    pub fn model_mut(
        &mut self,
        provider: usize,
        model: usize,
    ) -> Result<&mut ModelDraft, DraftError> {
        self.provider_mut(provider)?
            .models
            .get_mut(model)
            .ok_or(DraftError::ModelIndex {
                provider: provider + 1,
                model: model + 1,
            })
    }

    pub fn add_model(&mut self, provider: usize) -> Result<usize, DraftError> {
        let models = &mut self.provider_mut(provider)?.models;
        models.push(ModelDraft::default());
        Ok(models.len() - 1)
    }

    /// 모델을 제거한다. 마지막 모델을 지우면 빈 모델 하나로 대체한다.
    pub fn remove_model(&mut self, provider: usize, model: usize) -> Result<ModelDraft, DraftError> {
        let models = &mut self.provider_mut(provider)?.models;
        if model >= models.len() {
            return Err(DraftError::ModelIndex {
                provider: provider + 1,
                model: model + 1,
            });
        }
        let removed = models.remove(model);
        if models.is_empty() {
            models.push(ModelDraft::default());
        }
        Ok(removed)
    }

    pub fn toggle_advanced(&mut self, provider: usize, model: usize) -> Result<bool, DraftError> {
        let model = self.model_mut(provider, model)?;
        model.advanced_visible = !model.advanced_visible;
        Ok(model.advanced_visible)
    }

    pub fn set_primary(&mut self, value: &str) {
        self.primary = value.to_string();
    }
}

/// `provider/model` 형태의 모델 참조 문자열을 만든다.
pub fn model_ref(provider_key: &str, model_id: &str) -> String {
    format!("{provider_key}/{model_id}")
}

fn parse_flag(field: &str, value: &str) -> Result<bool, DraftError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(DraftError::InvalidBool {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}
