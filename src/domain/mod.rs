//! Domain layer
//! 설정 합성/검증/병합/직렬화 규칙을 외부 입출력 없이 순수 함수로 표현한다.

pub mod config;
pub mod draft;
pub mod merge;
pub mod output;
pub mod synthesize;
pub mod upload;
pub mod validate;
