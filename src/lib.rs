//! clawgen library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use std::path::PathBuf;

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::usecases::generate::GenerateOptions;
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 생성 함수. 다운로드한 경우 저장 경로를 반환한다.
pub fn generate(options: GenerateOptions) -> Result<Option<PathBuf>> {
    let composition = AppComposition::default();
    composition.generate_usecase().execute(options)
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_settings_pretty_json() -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_settings_usecase().execute()
}
