//! 초안 -> 정규 설정 합성 규칙.

use indexmap::IndexMap;

use crate::domain::config::{
    AgentDefaults, AgentsSection, CanonicalConfig, DEFAULT_CONTEXT_WINDOW, DEFAULT_COST,
    DEFAULT_MAX_TOKENS, InputModality, MERGE_MODE, ModelAlias, ModelConfig, ModelCost,
    ModelsSection, Numeric, ProviderConfig,
};
use crate::domain::draft::{Draft, ModelDraft, ProviderDraft, model_ref};

/// 대표 모델 선택 목록의 항목.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOption {
    pub key: String,
    pub label: String,
}

/// key/id가 모두 채워진 모델을 provider 순서, 모델 순서대로 나열한다.
pub fn model_options(providers: &[ProviderDraft]) -> Vec<ModelOption> {
    providers
        .iter()
        .flat_map(|provider| {
            let provider_key = provider.key.trim();
            provider.models.iter().filter_map(move |model| {
                let model_id = model.id.trim();
                if provider_key.is_empty() || model_id.is_empty() {
                    return None;
                }
                let key = model_ref(provider_key, model_id);
                let name = if model.name.is_empty() {
                    "(unnamed)"
                } else {
                    model.name.as_str()
                };
                let label = format!("{key} - {name}");
                Some(ModelOption { key, label })
            })
        })
        .collect()
}

/// 선택 힌트가 현재 유효하면 그대로, 아니면 첫 번째 후보를, 후보가 없으면 빈 문자열을 쓴다.
pub fn resolve_primary(providers: &[ProviderDraft], hint: &str) -> String {
    let options = model_options(providers);
    if !hint.is_empty() && options.iter().any(|opt| opt.key == hint) {
        return hint.to_string();
    }
    options
        .into_iter()
        .next()
        .map(|opt| opt.key)
        .unwrap_or_default()
}

pub fn synthesize(draft: &Draft) -> CanonicalConfig {
    let primary = resolve_primary(&draft.providers, &draft.primary);
    let mut providers: IndexMap<String, ProviderConfig> = IndexMap::new();
    let mut aliases: IndexMap<String, ModelAlias> = IndexMap::new();

    for provider in &draft.providers {
        let provider_key = provider.key.trim();
        if provider_key.is_empty() {
            continue;
        }

        let models = provider
            .models
            .iter()
            .map(|model| {
                let config = synthesize_model(model);
                if !config.id.is_empty() {
                    let alias = if config.name.is_empty() {
                        config.id.clone()
                    } else {
                        config.name.clone()
                    };
                    aliases.insert(model_ref(provider_key, &config.id), ModelAlias { alias });
                }
                config
            })
            .collect();

        // 같은 key가 다시 나오면 값은 덮어쓰고 위치는 처음 자리를 유지한다.
        providers.insert(
            provider_key.to_string(),
            ProviderConfig {
                base_url: provider.base_url.trim().to_string(),
                api_key: provider.api_key.trim().to_string(),
                api: provider.api.resolve(),
                models,
            },
        );
    }

    CanonicalConfig {
        models: ModelsSection {
            mode: MERGE_MODE.to_string(),
            providers,
        },
        agents: AgentsSection {
            defaults: AgentDefaults::new(primary, aliases),
        },
    }
}

fn synthesize_model(model: &ModelDraft) -> ModelConfig {
    let mut input = Vec::new();
    if model.supports_text {
        input.push(InputModality::Text);
    }
    if model.supports_image {
        input.push(InputModality::Image);
    }

    ModelConfig {
        id: model.id.trim().to_string(),
        name: model.name.trim().to_string(),
        reasoning: model.reasoning,
        input,
        cost: ModelCost {
            input: numeric_or(&model.cost_input_text, DEFAULT_COST),
            output: numeric_or(&model.cost_output_text, DEFAULT_COST),
            cache_read: numeric_or(&model.cost_cache_read_text, DEFAULT_COST),
            cache_write: numeric_or(&model.cost_cache_write_text, DEFAULT_COST),
        },
        context_window: numeric_or(&model.context_window_text, DEFAULT_CONTEXT_WINDOW),
        max_tokens: numeric_or(&model.max_tokens_text, DEFAULT_MAX_TOKENS),
    }
}

/// 숫자 텍스트를 해석한다. 비었거나 숫자가 아니면 `None`.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn numeric_or(text: &str, default: f64) -> Numeric {
    Numeric(parse_numeric(text).unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::ApiSelection;

    fn provider(key: &str, model_ids: &[&str]) -> ProviderDraft {
        ProviderDraft {
            key: key.into(),
            base_url: "https://example.test/v1".into(),
            api_key: "sk".into(),
            api: ApiSelection::OpenAiCompletions,
            models: model_ids
                .iter()
                .map(|id| ModelDraft {
                    id: id.to_string(),
                    name: format!("{id}-name"),
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn nvidia_scenario_produces_expected_model_entry() {
        let draft = Draft {
            providers: vec![ProviderDraft {
                key: "nvidia".into(),
                base_url: "https://integrate.api.nvidia.com/v1".into(),
                api_key: "sk-x".into(),
                api: ApiSelection::OpenAiCompletions,
                models: vec![ModelDraft {
                    id: "minimaxai/minimax-m2".into(),
                    name: "mini-max-thinking".into(),
                    max_tokens_text: "4096".into(),
                    ..Default::default()
                }],
            }],
            primary: String::new(),
        };

        let value = synthesize(&draft).to_value();
        assert_eq!(
            value["models"]["providers"]["nvidia"]["models"][0],
            serde_json::json!({
                "id": "minimaxai/minimax-m2",
                "name": "mini-max-thinking",
                "reasoning": false,
                "input": ["text"],
                "cost": { "input": 0, "output": 0, "cacheRead": 0, "cacheWrite": 0 },
                "contextWindow": 200000,
                "maxTokens": 4096
            })
        );
        assert_eq!(
            value["agents"]["defaults"]["model"]["primary"],
            "nvidia/minimaxai/minimax-m2"
        );
        assert_eq!(
            value["agents"]["defaults"]["models"]["nvidia/minimaxai/minimax-m2"],
            serde_json::json!({ "alias": "mini-max-thinking" })
        );
    }

    #[test]
    fn blank_provider_keys_are_skipped() {
        let draft = Draft {
            providers: vec![provider("   ", &["a"]), provider("kept", &["b"])],
            primary: String::new(),
        };
        let cfg = synthesize(&draft);
        assert_eq!(cfg.models.providers.keys().collect::<Vec<_>>(), vec!["kept"]);
        assert_eq!(cfg.primary(), "kept/b");
    }

    #[test]
    fn duplicate_provider_keys_last_write_wins_in_first_position() {
        let mut second = provider(" dup ", &["late"]);
        second.base_url = "https://second.test".into();
        let draft = Draft {
            providers: vec![provider("dup", &["early"]), provider("other", &["x"]), second],
            primary: String::new(),
        };
        let cfg = synthesize(&draft);
        let keys: Vec<_> = cfg.models.providers.keys().cloned().collect();
        assert_eq!(keys, vec!["dup", "other"]);
        assert_eq!(cfg.models.providers["dup"].base_url, "https://second.test");
        assert_eq!(cfg.models.providers["dup"].models[0].id, "late");
    }

    #[test]
    fn invalid_numeric_text_falls_back_to_field_defaults() {
        let mut p = provider("p", &["m"]);
        let model = &mut p.models[0];
        model.max_tokens_text = "lots".into();
        model.context_window_text = "".into();
        model.cost_input_text = "abc".into();
        model.cost_output_text = " 1.5 ".into();
        let draft = Draft {
            providers: vec![p],
            primary: String::new(),
        };
        let cfg = synthesize(&draft);
        let m = &cfg.models.providers["p"].models[0];
        assert_eq!(m.max_tokens, Numeric(0.0));
        assert_eq!(m.context_window, Numeric(200_000.0));
        assert_eq!(m.cost.input, Numeric(0.0));
        assert_eq!(m.cost.output, Numeric(1.5));
    }

    #[test]
    fn input_follows_text_then_image_order() {
        let mut p = provider("p", &["both", "none"]);
        p.models[0].supports_image = true;
        p.models[1].supports_text = false;
        let draft = Draft {
            providers: vec![p],
            primary: String::new(),
        };
        let cfg = synthesize(&draft);
        let models = &cfg.models.providers["p"].models;
        assert_eq!(models[0].input, vec![InputModality::Text, InputModality::Image]);
        assert!(models[1].input.is_empty());
    }

    #[test]
    fn alias_uses_id_when_name_blank_and_skips_blank_ids() {
        let mut p = provider("p", &["m1", "  "]);
        p.models[0].name = "   ".into();
        let draft = Draft {
            providers: vec![p],
            primary: String::new(),
        };
        let cfg = synthesize(&draft);
        let aliases = &cfg.agents.defaults.models;
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases["p/m1"].alias, "m1");
        // 빈 id 모델도 provider 모델 목록에는 남는다.
        assert_eq!(cfg.models.providers["p"].models.len(), 2);
    }

    #[test]
    fn primary_hint_kept_when_valid_and_replaced_when_stale() {
        let providers = vec![provider("a", &["1"]), provider("b", &["2"])];
        assert_eq!(resolve_primary(&providers, "b/2"), "b/2");
        assert_eq!(resolve_primary(&providers, "c/9"), "a/1");
        assert_eq!(resolve_primary(&providers, ""), "a/1");
        assert_eq!(resolve_primary(&[provider("", &["x"])], "x"), "");
    }

    #[test]
    fn model_options_label_unnamed_models() {
        let mut p = provider("p", &["m"]);
        p.models[0].name.clear();
        let options = model_options(&[p]);
        assert_eq!(options[0].label, "p/m - (unnamed)");
    }
}
