//! 콘솔 리포터 포트 구현 어댑터.
//!
//! 표준 출력은 생성된 JSON 전용이므로 진행 상황은 모두 표준 에러로 쓴다.

use std::io::{self, IsTerminal};

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터.
pub struct ConsoleReporter {
    interactive: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// stderr가 TTY일 때만 상태 색상을 쓴다.
    pub fn new() -> Self {
        Self {
            interactive: io::stderr().is_terminal(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        eprintln!();
        eprintln!("==================== {} ====================", name);
    }

    fn kv(&self, key: &str, value: &str) {
        eprintln!("{:<12}: {}", key, value);
    }

    fn status(&self, scope: &str, message: &str) {
        let scope = format!("{scope:<12}");
        if self.interactive {
            eprintln!("[{}] {}", colorize_scope(&scope), message);
        } else {
            eprintln!("[{}] {}", scope, message);
        }
    }

    fn raw(&self, line: &str) {
        eprintln!("{}", line);
    }
}

fn colorize_scope(scope: &str) -> String {
    match scope.trim_end() {
        "Validation" | "Error" => format!("\x1b[31m{scope}\x1b[0m"),
        "Upload" => format!("\x1b[33m{scope}\x1b[0m"),
        "Copy" | "Download" | "Saved" => format!("\x1b[32m{scope}\x1b[0m"),
        _ => scope.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_scopes_are_colored_and_padding_kept() {
        assert_eq!(
            colorize_scope("Validation  "),
            "\x1b[31mValidation  \x1b[0m"
        );
        assert_eq!(colorize_scope("Mode        "), "Mode        ");
    }
}
