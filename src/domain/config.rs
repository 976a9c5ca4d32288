//! 초안에서 합성되는 정규(canonical) 설정 스키마.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Value, json};

pub const DEFAULT_API: &str = "openai-completions";
pub const DEFAULT_CONTEXT_WINDOW: f64 = 200_000.0;
pub const DEFAULT_MAX_TOKENS: f64 = 0.0;
pub const DEFAULT_COST: f64 = 0.0;
pub const MERGE_MODE: &str = "merge";
pub const COMPACTION_MODE: &str = "safeguard";
pub const DEFAULT_MAX_CONCURRENT: u32 = 4;
pub const DEFAULT_SUBAGENT_MAX_CONCURRENT: u32 = 8;

/// JSON 숫자 값. 정수로 표현 가능한 값은 정수로 직렬화한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeric(pub f64);

/// 2^53: f64가 정수를 손실 없이 표현하는 한계.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Numeric {
    /// 손실 없이 정수로 표현되는 값이면 그 정수.
    pub fn as_integer(self) -> Option<i64> {
        let value = self.0;
        (value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER).then_some(value as i64)
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(whole) => serializer.serialize_i64(whole),
            None => serializer.serialize_f64(self.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalConfig {
    pub models: ModelsSection,
    pub agents: AgentsSection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelsSection {
    pub mode: String,
    pub providers: IndexMap<String, ProviderConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub api: String,
    pub models: Vec<ModelConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputModality {
    Text,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub id: String,
    pub name: String,
    pub reasoning: bool,
    pub input: Vec<InputModality>,
    pub cost: ModelCost,
    pub context_window: Numeric,
    pub max_tokens: Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCost {
    pub input: Numeric,
    pub output: Numeric,
    pub cache_read: Numeric,
    pub cache_write: Numeric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentsSection {
    pub defaults: AgentDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDefaults {
    pub model: PrimaryModel,
    /// `provider/model` -> 표시 별칭
    pub models: IndexMap<String, ModelAlias>,
    pub compaction: Compaction,
    pub max_concurrent: u32,
    pub subagents: Subagents,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimaryModel {
    pub primary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAlias {
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compaction {
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subagents {
    pub max_concurrent: u32,
}

impl AgentDefaults {
    pub fn new(primary: String, models: IndexMap<String, ModelAlias>) -> Self {
        Self {
            model: PrimaryModel { primary },
            models,
            compaction: Compaction {
                mode: COMPACTION_MODE.to_string(),
            },
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            subagents: Subagents {
                max_concurrent: DEFAULT_SUBAGENT_MAX_CONCURRENT,
            },
        }
    }
}

impl CanonicalConfig {
    pub fn primary(&self) -> &str {
        &self.agents.defaults.model.primary
    }

    /// 병합/직렬화용 JSON 값으로 변환한다.
    pub fn to_value(&self) -> Value {
        json!({
            "models": self.models,
            "agents": self.agents,
        })
    }
}
