//! 애플리케이션 유스케이스 모음.

pub mod check_draft;
pub mod export;
pub mod generate;
pub mod init_draft;
pub mod inspect_settings;
pub mod load_document;
pub mod open_draft;
pub mod save_draft;
