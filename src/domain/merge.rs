//! 정규 설정을 기존에 내보낸 설정 문서 위에 병합하는 규칙.
//!
//! 문서 형태는 알 수 없으므로, 객체가 와야 할 자리에 다른 값이 있으면 빈 객체로 취급한다.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::config::{CanonicalConfig, MERGE_MODE, Numeric};

/// 불러온 문서가 없으면 정규 설정을 그대로, 있으면 문서 사본에 병합한 결과를 반환한다.
/// 입력 문서는 변경하지 않는다.
pub fn merge_config(canonical: &CanonicalConfig, document: Option<&Value>) -> Value {
    let generated = canonical.to_value();
    let Some(document) = document else {
        return generated;
    };

    let mut root = match document.clone() {
        Value::Object(map) => map,
        other => {
            tracing::debug!("uploaded document root is {}, starting from an empty object", kind(&other));
            Map::new()
        }
    };

    with_object(&mut root, "models", |models| {
        models.insert("mode".to_string(), Value::String(MERGE_MODE.to_string()));
        with_object(models, "providers", |providers| {
            if let Some(incoming) = generated
                .pointer("/models/providers")
                .and_then(Value::as_object)
            {
                for (key, provider) in incoming {
                    merge_provider(providers, key, provider);
                }
            }
        });
    });

    with_object(&mut root, "agents", |agents| {
        with_object(agents, "defaults", |defaults| {
            with_object(defaults, "model", |model| {
                model.insert(
                    "primary".to_string(),
                    Value::String(canonical.primary().to_string()),
                );
            });
            with_object(defaults, "models", |aliases| {
                if let Some(incoming) = generated
                    .pointer("/agents/defaults/models")
                    .and_then(Value::as_object)
                {
                    for (key, alias) in incoming {
                        aliases.insert(key.clone(), alias.clone());
                    }
                }
            });
        });
    });

    redact_auth_profiles(&mut root);
    Value::Object(root)
}

/// 저장된 인증 프로필은 다시 내보내지 않는다. 비게 된 `auth`는 통째로 제거한다.
fn redact_auth_profiles(root: &mut Map<String, Value>) {
    let keep = match root.get_mut("auth") {
        None => return,
        Some(Value::Object(auth)) => {
            auth.shift_remove("profiles");
            !auth.is_empty()
        }
        Some(_) => false,
    };
    if !keep {
        root.shift_remove("auth");
    }
}

fn merge_provider(providers: &mut Map<String, Value>, key: &str, incoming: &Value) {
    with_object(providers, key, |merged| {
        let existing_models = match merged.get("models") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        let incoming_models = match incoming.get("models") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };

        if let Some(fields) = incoming.as_object() {
            for (field, value) in fields {
                if field != "models" {
                    merged.insert(field.clone(), value.clone());
                }
            }
        }

        // id 기준 중복 제거: 기존 위치를 유지한 채 값만 교체하고, 새 id는 뒤에 붙인다.
        let mut by_id: IndexMap<String, Value> = IndexMap::new();
        for model in existing_models.iter().chain(incoming_models) {
            if let Some(id) = model_identity(model) {
                by_id.insert(id, model.clone());
            }
        }
        merged.insert(
            "models".to_string(),
            Value::Array(by_id.into_values().collect()),
        );
    });
}

/// 모델 항목의 식별자. 비어 있거나 거짓 값이면 식별자가 없는 것으로 본다.
/// 정수로 표현되는 숫자는 정수 표기(`1.0` -> `"1"`)로 맞춘다.
fn model_identity(model: &Value) -> Option<String> {
    match model.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            let value = n.as_f64().filter(|v| *v != 0.0)?;
            Some(match Numeric(value).as_integer() {
                Some(whole) => whole.to_string(),
                None => n.to_string(),
            })
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// `map[key]`를 객체로 꺼내 `edit`에 넘긴 뒤 같은 자리에 되돌려 놓는다.
/// 객체가 아닌 값은 빈 객체로 바꾸고, 없던 키는 끝에 추가된다.
fn with_object<R>(
    map: &mut Map<String, Value>,
    key: &str,
    edit: impl FnOnce(&mut Map<String, Value>) -> R,
) -> R {
    let mut inner = match map.get_mut(key).map(Value::take) {
        Some(Value::Object(inner)) => inner,
        Some(other) => {
            tracing::debug!("replacing non-object '{}' ({}) with an empty object", key, kind(&other));
            Map::new()
        }
        None => Map::new(),
    };
    let result = edit(&mut inner);
    map.insert(key.to_string(), Value::Object(inner));
    result
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
