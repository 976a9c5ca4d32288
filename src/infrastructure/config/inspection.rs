//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedSettings;
use crate::application::config::DefaultsSettings;

#[derive(Debug, Clone, Serialize)]
pub struct SettingsInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsSettings,
    pub effective_defaults: EffectiveDefaults,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub output_mode: String,
    pub output_dir: String,
    pub draft_path: String,
    pub download_name: String,
}

impl SettingsInspection {
    pub(crate) fn from_loaded(loaded: LoadedSettings) -> Self {
        let settings = &loaded.settings;
        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: settings.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                output_mode: settings.output_mode().code().to_string(),
                output_dir: settings.output_dir(),
                draft_path: settings.draft_path(),
                download_name: settings.download_name(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::application::config::Settings;

    #[test]
    fn effective_defaults_fill_unset_fields() {
        let mut settings = Settings::default();
        settings.defaults.output_dir = Some("out".into());
        let inspection = SettingsInspection::from_loaded(LoadedSettings {
            settings,
            searched_paths: vec![PathBuf::from("/etc/clawgen/config.json")],
            loaded_paths: Vec::new(),
        });

        let value = serde_json::to_value(&inspection).unwrap();
        assert_eq!(value["defaults"]["output_dir"], "out");
        assert!(value["defaults"]["output_mode"].is_null());
        assert_eq!(value["effective_defaults"]["output_mode"], "snippet");
        assert_eq!(value["effective_defaults"]["output_dir"], "out");
        assert_eq!(
            value["effective_defaults"]["download_name"],
            "openclaw-model-config.json"
        );
    }
}
