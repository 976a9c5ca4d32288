//! 설정 저장소 포트 구현 어댑터.

use anyhow::Result;

use crate::application::config::Settings;
use crate::application::ports::SettingsRepository;
use crate::infrastructure::config;

/// JSON 기반 설정 저장소 어댑터.
pub struct JsonSettingsRepository;

impl SettingsRepository for JsonSettingsRepository {
    fn load(&self) -> Result<Settings> {
        config::load()
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        config::inspect_pretty_json()
    }
}
