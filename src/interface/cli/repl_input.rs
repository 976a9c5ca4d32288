//! REPL 입력 처리기.
//! `/`로 시작하면 입력 중 실시간으로 명령 추천과 사용법 힌트를 표시한다.

use std::env;
use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::output::OutputMode;

pub(crate) struct Suggestion {
    pub slash: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    /// 인자 없이 실행할 수 없는 명령
    pub needs_args: bool,
    /// Tab으로 완성할 하위 명령
    pub subcommands: &'static [&'static str],
}

pub(crate) const SUGGESTIONS: [Suggestion; 13] = [
    Suggestion {
        slash: "/show",
        description: "print providers, primary model and output",
        usage: "/show",
        needs_args: false,
        subcommands: &[],
    },
    Suggestion {
        slash: "/errors",
        description: "list validation errors",
        usage: "/errors",
        needs_args: false,
        subcommands: &[],
    },
    Suggestion {
        slash: "/options",
        description: "list primary model candidates",
        usage: "/options",
        needs_args: false,
        subcommands: &[],
    },
    Suggestion {
        slash: "/provider",
        description: "add, remove or edit a provider",
        usage: "/provider add | rm <p> | set <p> <field> <value>",
        needs_args: true,
        subcommands: &["add", "rm", "set"],
    },
    Suggestion {
        slash: "/model",
        description: "add, remove or edit a model",
        usage: "/model add <p> | rm <p> <m> | set <p> <m> <field> <value> | advanced <p> <m>",
        needs_args: true,
        subcommands: &["add", "rm", "set", "advanced"],
    },
    Suggestion {
        slash: "/primary",
        description: "choose the primary model",
        usage: "/primary <provider/model>",
        needs_args: true,
        subcommands: &[],
    },
    Suggestion {
        slash: "/load",
        description: "merge into an existing openclaw.json",
        usage: "/load <file>",
        needs_args: true,
        subcommands: &[],
    },
    Suggestion {
        slash: "/clear",
        description: "forget the loaded document",
        usage: "/clear",
        needs_args: false,
        subcommands: &[],
    },
    Suggestion {
        slash: "/mode",
        description: "switch output mode",
        usage: "/mode full|snippet",
        needs_args: true,
        subcommands: &["full", "snippet"],
    },
    Suggestion {
        slash: "/copy",
        description: "copy output to stdout or a file",
        usage: "/copy [file]",
        needs_args: false,
        subcommands: &[],
    },
    Suggestion {
        slash: "/download",
        description: "save the full document",
        usage: "/download [dir] [--force]",
        needs_args: false,
        subcommands: &[],
    },
    Suggestion {
        slash: "/save",
        description: "write the draft file",
        usage: "/save [path]",
        needs_args: false,
        subcommands: &[],
    },
    Suggestion {
        slash: "/exit",
        description: "exit interactive editor",
        usage: "/exit",
        needs_args: false,
        subcommands: &[],
    },
];

const PROMPT: &str = "clawgen> ";

/// REPL 한 줄 입력을 읽는다.
/// - TTY + 지원 터미널: 실시간 추천 + 방향키 선택
/// - non-TTY/미지원 터미널: 일반 라인 입력
pub fn read_repl_input() -> Result<Option<String>> {
    if !supports_interactive_input() {
        return read_line_fallback();
    }

    match read_line_interactive() {
        Ok(v) => Ok(v),
        Err(err) => {
            tracing::debug!("interactive input unavailable: {err}");
            read_line_fallback()
        }
    }
}

fn supports_interactive_input() -> bool {
    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return false;
    }

    // dumb 터미널에서는 제어 시퀀스 기반 UI를 비활성화한다.
    if let Ok(term) = env::var("TERM")
        && term.eq_ignore_ascii_case("dumb")
    {
        return false;
    }

    true
}

fn read_line_fallback() -> Result<Option<String>> {
    // 프롬프트도 stderr로 보내 stdout에는 생성 결과만 남긴다.
    eprint!("{PROMPT}");
    io::stderr().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(trim_newline(line)))
}

fn read_line_interactive() -> Result<Option<String>> {
    let mut out = io::stderr();
    let _guard = InputGuard::enter(&mut out)?;

    let mut input = String::new();
    let mut cursor_chars = 0usize;
    let mut selected_idx = 0usize;

    loop {
        let suggestions = match_suggestions(&input);
        if suggestions.is_empty() {
            selected_idx = 0;
        } else if selected_idx >= suggestions.len() {
            selected_idx = suggestions.len() - 1;
        }

        render_frame(&mut out, &input, cursor_chars, &suggestions, selected_idx)?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => {
                // 인자가 필요한 명령은 즉시 실행하지 않고 인자 입력 상태로 확장한다.
                if let Some(expanded) = expand_input(&input, &suggestions, selected_idx) {
                    input = expanded;
                    cursor_chars = input.chars().count();
                    continue;
                }
                let final_input = finalize_input(&input, &suggestions, selected_idx);
                finish_frame(&mut out, &final_input)?;
                return Ok(Some(final_input));
            }
            KeyCode::Backspace => {
                if cursor_chars > 0 {
                    remove_char_at(&mut input, cursor_chars - 1);
                    cursor_chars -= 1;
                }
            }
            KeyCode::Delete => {
                if cursor_chars < input.chars().count() {
                    remove_char_at(&mut input, cursor_chars);
                }
            }
            KeyCode::Left => cursor_chars = cursor_chars.saturating_sub(1),
            KeyCode::Right => cursor_chars = (cursor_chars + 1).min(input.chars().count()),
            KeyCode::Home => cursor_chars = 0,
            KeyCode::End => cursor_chars = input.chars().count(),
            KeyCode::Up => selected_idx = selected_idx.saturating_sub(1),
            KeyCode::Down => {
                if !suggestions.is_empty() {
                    selected_idx = (selected_idx + 1).min(suggestions.len() - 1);
                }
            }
            KeyCode::Tab => {
                if !suggestions.is_empty() {
                    input = suggestions[selected_idx].slash.to_string();
                    cursor_chars = input.chars().count();
                } else if let Some(completed) = complete_subcommand(&input) {
                    input = completed;
                    cursor_chars = input.chars().count();
                }
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                finish_frame(&mut out, "")?;
                return Ok(None);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                finish_frame(&mut out, "")?;
                return Ok(Some("/exit".to_string()));
            }
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    insert_char_at(&mut input, cursor_chars, ch);
                    cursor_chars += 1;
                }
            }
            _ => {}
        }
    }
}

/// 공백 전까지의 `/` 입력에 맞는 명령 목록.
fn match_suggestions(input: &str) -> Vec<&'static Suggestion> {
    if !input.starts_with('/') || input.contains(' ') {
        return Vec::new();
    }

    let q = input.to_ascii_lowercase();
    SUGGESTIONS
        .iter()
        .filter(|s| s.slash.starts_with(&q))
        .collect()
}

fn finalize_input(input: &str, suggestions: &[&Suggestion], selected_idx: usize) -> String {
    if input.starts_with('/') && !input.contains(' ') && !suggestions.is_empty() {
        return suggestions[selected_idx].slash.to_string();
    }
    input.to_string()
}

/// 인자가 필요한 명령을 단독 입력 시 공백을 추가해 확장한다.
fn expand_input(input: &str, suggestions: &[&Suggestion], selected_idx: usize) -> Option<String> {
    if input.contains(' ') || suggestions.is_empty() {
        return None;
    }
    let chosen = suggestions[selected_idx];
    chosen.needs_args.then(|| format!("{} ", chosen.slash))
}

fn find_command(name: &str) -> Option<&'static Suggestion> {
    SUGGESTIONS.iter().find(|s| s.slash == name)
}

/// 입력 중인 명령의 실시간 힌트.
fn realtime_hint(input: &str) -> Option<(Color, String)> {
    let trimmed = input.trim_start();
    let (head, rest) = trimmed.split_once(' ')?;
    let Some(command) = find_command(head) else {
        return Some((Color::Red, format!("error: unknown command `{head}`")));
    };

    let rest = rest.trim();
    if command.slash == "/mode" && !rest.is_empty() {
        return Some(match rest.parse::<OutputMode>() {
            Ok(mode) => (Color::Green, format!("ready: switch to {mode} output")),
            Err(err) => (Color::Red, format!("error: {err}")),
        });
    }

    if let Some(sub) = rest.split_whitespace().next()
        && !command.subcommands.is_empty()
        && !command.subcommands.contains(&sub)
        && !command.subcommands.iter().any(|s| s.starts_with(sub))
    {
        return Some((Color::Red, format!("error: unknown subcommand `{sub}`")));
    }

    Some((Color::Yellow, format!("usage: {}", command.usage)))
}

/// 하위 명령 탭 완성을 시도한다.
fn complete_subcommand(input: &str) -> Option<String> {
    let (head, rest) = input.trim_start().split_once(' ')?;
    let command = find_command(head)?;
    let rest = rest.trim();
    if rest.contains(' ') {
        return None;
    }

    let matches: Vec<&str> = command
        .subcommands
        .iter()
        .copied()
        .filter(|s| s.starts_with(rest))
        .collect();
    if matches.len() == 1 && rest != matches[0] {
        return Some(format!("{head} {} ", matches[0]));
    }
    None
}

fn render_frame(
    out: &mut io::Stderr,
    input: &str,
    cursor_chars: usize,
    suggestions: &[&Suggestion],
    selected_idx: usize,
) -> Result<()> {
    let (w, _) = terminal::size().unwrap_or((120, 40));
    let width = (w as usize).max(20);

    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::FromCursorDown)
    )?;
    write!(out, "{}", clip_line_display(&format!("{PROMPT}{input}"), width))?;

    // 프롬프트 아래 줄에 힌트와 추천을 표시하고 다시 입력줄로 돌아온다.
    let mut extra_rows = 0u16;
    if let Some((color, line)) = realtime_hint(input) {
        write_line_below(out, &clip_line_display(&line, width), color)?;
        extra_rows += 1;
    }
    for (idx, item) in suggestions.iter().enumerate() {
        let marker = if idx == selected_idx { ">" } else { " " };
        let color = if idx == selected_idx { Color::Cyan } else { Color::White };
        let line = format!("{marker} {:<10} - {}", item.slash, item.description);
        write_line_below(out, &clip_line_display(&line, width), color)?;
        extra_rows += 1;
    }
    if extra_rows > 0 {
        execute!(out, cursor::MoveUp(extra_rows))?;
    }

    let before_cursor: String = input.chars().take(cursor_chars).collect();
    let col = (display_width(PROMPT) + display_width(&before_cursor)).min(width - 1);
    execute!(out, cursor::MoveToColumn(col as u16), cursor::Show)?;
    out.flush()?;
    Ok(())
}

fn write_line_below(out: &mut io::Stderr, text: &str, fg: Color) -> Result<()> {
    write!(out, "\r\n")?;
    execute!(out, SetForegroundColor(fg))?;
    write!(out, "{text}")?;
    execute!(out, ResetColor)?;
    Ok(())
}

/// 추천 영역을 지우고 확정된 입력만 남긴다.
fn finish_frame(out: &mut io::Stderr, final_input: &str) -> Result<()> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::FromCursorDown),
        ResetColor
    )?;
    write!(out, "{PROMPT}{final_input}\r\n")?;
    out.flush()?;
    Ok(())
}

fn clip_line_display(line: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(line) <= max_width {
        return line.to_string();
    }

    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0usize;
    let cap = max_width - 3;

    for ch in line.chars() {
        let cw = char_display_width(ch);
        if used + cw > cap {
            break;
        }
        out.push(ch);
        used += cw;
    }

    out.push_str("...");
    out
}

fn trim_newline(mut s: String) -> String {
    while matches!(s.chars().last(), Some('\n' | '\r')) {
        s.pop();
    }
    s
}

// unicode-width 크레이트로 터미널 표시 폭을 계산한다.
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn char_display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

struct InputGuard;

impl InputGuard {
    fn enter(out: &mut io::Stderr) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, cursor::Show)?;
        Ok(Self)
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        let mut out = io::stderr();
        let _ = execute!(out, cursor::Show, ResetColor);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}

fn insert_char_at(input: &mut String, char_idx: usize, ch: char) {
    let byte_idx = byte_index_at_char(input, char_idx);
    input.insert(byte_idx, ch);
}

fn remove_char_at(input: &mut String, char_idx: usize) {
    let start = byte_index_at_char(input, char_idx);
    let end = byte_index_at_char(input, char_idx + 1);
    if start < end && end <= input.len() {
        input.replace_range(start..end, "");
    }
}

fn byte_index_at_char(input: &str, char_idx: usize) -> usize {
    input
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_lists_every_command_and_prefix_narrows() {
        assert_eq!(match_suggestions("/").len(), SUGGESTIONS.len());
        let slashes: Vec<_> = match_suggestions("/mo").iter().map(|s| s.slash).collect();
        assert_eq!(slashes, vec!["/model", "/mode"]);
        assert!(match_suggestions("/model add").is_empty());
        assert!(match_suggestions("show").is_empty());
    }

    #[test]
    fn enter_expands_commands_that_need_arguments() {
        let suggestions = match_suggestions("/pri");
        assert_eq!(
            expand_input("/pri", &suggestions, 0),
            Some("/primary ".to_string())
        );
        let suggestions = match_suggestions("/sh");
        assert_eq!(expand_input("/sh", &suggestions, 0), None);
        assert_eq!(finalize_input("/sh", &suggestions, 0), "/show");
    }

    #[test]
    fn tab_completes_unique_subcommand() {
        assert_eq!(
            complete_subcommand("/model adv"),
            Some("/model advanced ".to_string())
        );
        assert_eq!(complete_subcommand("/mode sn"), Some("/mode snippet ".to_string()));
        assert_eq!(complete_subcommand("/provider "), None);
        assert_eq!(complete_subcommand("/save x"), None);
    }

    #[test]
    fn hints_flag_unknown_commands_and_bad_modes() {
        let (color, line) = realtime_hint("/nope x").unwrap();
        assert_eq!(color, Color::Red);
        assert!(line.contains("/nope"));

        let (color, _) = realtime_hint("/mode diff").unwrap();
        assert_eq!(color, Color::Red);
        let (color, _) = realtime_hint("/mode full").unwrap();
        assert_eq!(color, Color::Green);

        let (color, line) = realtime_hint("/provider set").unwrap();
        assert_eq!(color, Color::Yellow);
        assert!(line.starts_with("usage: /provider"));
        assert!(realtime_hint("/show").is_none());
    }

    #[test]
    fn editing_respects_multibyte_characters() {
        let mut input = "모델".to_string();
        insert_char_at(&mut input, 1, 'x');
        assert_eq!(input, "모x델");
        remove_char_at(&mut input, 2);
        assert_eq!(input, "모x");
    }

    #[test]
    fn clipping_counts_display_width() {
        assert_eq!(clip_line_display("abcdef", 10), "abcdef");
        assert_eq!(clip_line_display("abcdefghij", 6), "abc...");
        assert_eq!(clip_line_display("모델모델모델", 7), "모델...");
    }
}
