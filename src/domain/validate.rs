//! 초안 검증 규칙. 결과는 권고용이며 편집을 막지 않는다.

use crate::domain::draft::Draft;
use crate::domain::synthesize::parse_numeric;

/// 검증 오류 항목. 인덱스는 1부터 센다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("Provider {provider}: provider key is required")]
    ProviderKey { provider: usize },
    #[error("Provider {provider}: base URL is required")]
    BaseUrl { provider: usize },
    #[error("Provider {provider}: API key is required")]
    ApiKey { provider: usize },
    #[error("Provider {provider}, model {model}: model ID is required")]
    ModelId { provider: usize, model: usize },
    #[error("Provider {provider}, model {model}: model name is required")]
    ModelName { provider: usize, model: usize },
    #[error("Provider {provider}, model {model}: select at least one input type (text or image)")]
    ModelInput { provider: usize, model: usize },
    #[error("Provider {provider}, model {model}: max tokens must be a number")]
    MaxTokens { provider: usize, model: usize },
    #[error("Select a primary model")]
    PrimaryModel,
}

/// provider별 오류, 그 provider의 모델 오류 순서로 모은 뒤 대표 모델 오류를 덧붙인다.
pub fn validate(draft: &Draft, primary: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (idx, provider) in draft.providers.iter().enumerate() {
        let p = idx + 1;
        if provider.key.trim().is_empty() {
            issues.push(ValidationIssue::ProviderKey { provider: p });
        }
        if provider.base_url.trim().is_empty() {
            issues.push(ValidationIssue::BaseUrl { provider: p });
        }
        if provider.api_key.trim().is_empty() {
            issues.push(ValidationIssue::ApiKey { provider: p });
        }

        for (m_idx, model) in provider.models.iter().enumerate() {
            let m = m_idx + 1;
            if model.id.trim().is_empty() {
                issues.push(ValidationIssue::ModelId { provider: p, model: m });
            }
            if model.name.trim().is_empty() {
                issues.push(ValidationIssue::ModelName { provider: p, model: m });
            }
            if !model.supports_text && !model.supports_image {
                issues.push(ValidationIssue::ModelInput { provider: p, model: m });
            }
            if parse_numeric(&model.max_tokens_text).is_none() {
                issues.push(ValidationIssue::MaxTokens { provider: p, model: m });
            }
        }
    }

    if primary.is_empty() {
        issues.push(ValidationIssue::PrimaryModel);
    }
    issues
}
