//! `clawgen` 대화형 편집기(REPL) 인터페이스.
//!
//! 초안을 메모리에서 편집하고, 명령마다 검증/출력 상태를 다시 계산해 보여 준다.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::config::Settings;
use crate::application::ports::Reporter;
use crate::application::session::ConfigSession;
use crate::application::usecases::export::ExportAction;
use crate::domain::output::OutputMode;
use crate::interface::cli::composition::AppComposition;
use crate::interface::cli::repl_input::read_repl_input;

/// 대화형 입력으로 `/command`를 처리한다.
pub fn run_repl(composition: &AppComposition, draft: Option<&Path>) -> Result<()> {
    let opened = composition.open_draft_usecase().execute(draft, None, true)?;
    let mut state = ReplState {
        path: opened.path,
        settings: opened.settings,
        session: opened.session,
        dirty: false,
        exit_warned: false,
    };
    print_welcome(&state);

    loop {
        let Some(raw_input) = read_repl_input()? else {
            break;
        };
        let input = raw_input.trim();
        if input.is_empty() {
            continue;
        }

        match parse_repl_command(input) {
            Ok(ReplCommand::Exit) => {
                if state.dirty && !state.exit_warned {
                    state.exit_warned = true;
                    composition.reporter().status(
                        "Draft",
                        "unsaved changes; /save first or /exit again to discard",
                    );
                    continue;
                }
                break;
            }
            Ok(cmd) => {
                if let Err(err) = execute_command(composition, &mut state, cmd) {
                    eprintln!("error: {err:#}");
                }
            }
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!("hint: type / for command suggestions");
            }
        }
    }

    Ok(())
}

struct ReplState {
    path: PathBuf,
    settings: Settings,
    session: ConfigSession,
    dirty: bool,
    exit_warned: bool,
}

/// 인덱스는 모두 0부터 센다. 입력은 1부터 받는다.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Show,
    Errors,
    Options,
    ProviderAdd,
    ProviderRemove(usize),
    ProviderSet {
        provider: usize,
        field: String,
        value: String,
    },
    ModelAdd(usize),
    ModelRemove {
        provider: usize,
        model: usize,
    },
    ModelSet {
        provider: usize,
        model: usize,
        field: String,
        value: String,
    },
    ModelAdvanced {
        provider: usize,
        model: usize,
    },
    Primary(String),
    Load(PathBuf),
    Clear,
    Mode(OutputMode),
    Copy(Option<PathBuf>),
    Download {
        dir: Option<PathBuf>,
        force: bool,
    },
    Save(Option<PathBuf>),
}

impl ReplCommand {
    /// 초안 내용을 바꾸는 명령인지 여부.
    fn edits_draft(&self) -> bool {
        matches!(
            self,
            Self::ProviderAdd
                | Self::ProviderRemove(_)
                | Self::ProviderSet { .. }
                | Self::ModelAdd(_)
                | Self::ModelRemove { .. }
                | Self::ModelSet { .. }
                | Self::ModelAdvanced { .. }
                | Self::Primary(_)
        )
    }
}

fn execute_command(
    composition: &AppComposition,
    state: &mut ReplState,
    command: ReplCommand,
) -> Result<()> {
    let reporter = composition.reporter();
    let edits = command.edits_draft();

    match command {
        ReplCommand::Exit => {}
        ReplCommand::Show => show_session(reporter, state),
        ReplCommand::Errors => show_errors(reporter, &state.session),
        ReplCommand::Options => show_options(reporter, &state.session),
        ReplCommand::ProviderAdd => {
            let idx = state.session.draft_mut().add_provider();
            reporter.status("Provider", &format!("added provider {}", idx + 1));
        }
        ReplCommand::ProviderRemove(provider) => {
            let removed = state.session.draft_mut().remove_provider(provider)?;
            reporter.status("Provider", &format!("removed {}", display_key(&removed.key)));
        }
        ReplCommand::ProviderSet {
            provider,
            field,
            value,
        } => {
            state.session.draft_mut().provider_mut(provider)?.set_field(&field, &value)?;
        }
        ReplCommand::ModelAdd(provider) => {
            let idx = state.session.draft_mut().add_model(provider)?;
            reporter.status(
                "Model",
                &format!("added model {} to provider {}", idx + 1, provider + 1),
            );
        }
        ReplCommand::ModelRemove { provider, model } => {
            let removed = state.session.draft_mut().remove_model(provider, model)?;
            reporter.status("Model", &format!("removed {}", display_key(&removed.id)));
        }
        ReplCommand::ModelSet {
            provider,
            model,
            field,
            value,
        } => {
            state.session.draft_mut().model_mut(provider, model)?.set_field(&field, &value)?;
        }
        ReplCommand::ModelAdvanced { provider, model } => {
            let visible = state.session.draft_mut().toggle_advanced(provider, model)?;
            let state_text = if visible { "shown" } else { "hidden" };
            reporter.status("Model", &format!("advanced fields {state_text}"));
        }
        ReplCommand::Primary(reference) => state.session.draft_mut().set_primary(&reference),
        ReplCommand::Load(path) => {
            composition
                .load_document_usecase()
                .execute(&mut state.session, &path)?;
            show_mode(reporter, &state.session);
        }
        ReplCommand::Clear => {
            state.session.clear();
            reporter.status("Upload", "cleared; generating from the draft only");
            show_mode(reporter, &state.session);
        }
        ReplCommand::Mode(mode) => {
            state.session.set_mode(mode);
            show_mode(reporter, &state.session);
        }
        ReplCommand::Copy(target) => {
            composition.export_usecase().execute(
                &state.session,
                &ExportAction::Copy { target },
                Some(&state.settings.download_name()),
            )?;
        }
        ReplCommand::Download { dir, force } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(state.settings.output_dir()));
            composition.export_usecase().execute(
                &state.session,
                &ExportAction::Download {
                    dir,
                    overwrite_source: force,
                },
                Some(&state.settings.download_name()),
            )?;
        }
        ReplCommand::Save(path) => {
            if let Some(path) = path {
                state.path = path;
            }
            composition
                .save_draft_usecase()
                .execute(&state.session, &state.path)?;
            state.dirty = false;
            state.exit_warned = false;
            reporter.status("Saved", &state.path.display().to_string());
        }
    }

    if edits {
        state.dirty = true;
        state.exit_warned = false;
        show_summary(reporter, &state.session);
    }
    Ok(())
}

fn parse_repl_command(input: &str) -> Result<ReplCommand, String> {
    if !input.starts_with('/') {
        return Err("slash command only. example: /show".to_string());
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some((&head, args)) = parts.split_first() else {
        return Err("empty command".to_string());
    };

    match head {
        "/exit" | "/quit" => no_args(args, ReplCommand::Exit, "/exit"),
        "/show" => no_args(args, ReplCommand::Show, "/show"),
        "/errors" => no_args(args, ReplCommand::Errors, "/errors"),
        "/options" => no_args(args, ReplCommand::Options, "/options"),
        "/clear" => no_args(args, ReplCommand::Clear, "/clear"),
        "/provider" => parse_provider_command(args),
        "/model" => parse_model_command(args),
        "/primary" => match args {
            [reference] => Ok(ReplCommand::Primary((*reference).to_string())),
            _ => Err("usage: /primary <provider/model>".to_string()),
        },
        "/load" => match args {
            [] => Err("usage: /load <file>".to_string()),
            _ => Ok(ReplCommand::Load(PathBuf::from(args.join(" ")))),
        },
        "/mode" => match args {
            [mode] => mode.parse().map(ReplCommand::Mode),
            _ => Err("usage: /mode full|snippet".to_string()),
        },
        "/copy" => Ok(ReplCommand::Copy(optional_path(args))),
        "/download" => {
            let force = args.contains(&"--force");
            let rest: Vec<&str> = args.iter().copied().filter(|a| *a != "--force").collect();
            Ok(ReplCommand::Download {
                dir: optional_path(&rest),
                force,
            })
        }
        "/save" => Ok(ReplCommand::Save(optional_path(args))),
        other => Err(format!("unknown command: {other}")),
    }
}

fn parse_provider_command(args: &[&str]) -> Result<ReplCommand, String> {
    const USAGE: &str = "usage: /provider add | rm <p> | set <p> <field> <value>";
    match args {
        ["add"] => Ok(ReplCommand::ProviderAdd),
        ["rm", p] => Ok(ReplCommand::ProviderRemove(parse_index(p)?)),
        ["set", p, field, value @ ..] => Ok(ReplCommand::ProviderSet {
            provider: parse_index(p)?,
            field: (*field).to_string(),
            value: value.join(" "),
        }),
        _ => Err(USAGE.to_string()),
    }
}

fn parse_model_command(args: &[&str]) -> Result<ReplCommand, String> {
    const USAGE: &str =
        "usage: /model add <p> | rm <p> <m> | set <p> <m> <field> <value> | advanced <p> <m>";
    match args {
        ["add", p] => Ok(ReplCommand::ModelAdd(parse_index(p)?)),
        ["rm", p, m] => Ok(ReplCommand::ModelRemove {
            provider: parse_index(p)?,
            model: parse_index(m)?,
        }),
        ["set", p, m, field, value @ ..] => Ok(ReplCommand::ModelSet {
            provider: parse_index(p)?,
            model: parse_index(m)?,
            field: (*field).to_string(),
            value: value.join(" "),
        }),
        ["advanced", p, m] => Ok(ReplCommand::ModelAdvanced {
            provider: parse_index(p)?,
            model: parse_index(m)?,
        }),
        _ => Err(USAGE.to_string()),
    }
}

fn no_args(args: &[&str], command: ReplCommand, usage: &str) -> Result<ReplCommand, String> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(format!("usage: {usage}"))
    }
}

fn optional_path(args: &[&str]) -> Option<PathBuf> {
    (!args.is_empty()).then(|| PathBuf::from(args.join(" ")))
}

/// 1부터 시작하는 번호를 0부터 시작하는 인덱스로 바꾼다.
fn parse_index(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a number starting at 1, got `{raw}`")),
    }
}

fn display_key(key: &str) -> &str {
    if key.trim().is_empty() { "(unnamed)" } else { key }
}

fn show_session(reporter: &dyn Reporter, state: &ReplState) {
    let session = &state.session;
    reporter.section("Draft");
    reporter.kv("file", &state.path.display().to_string());
    for (p, provider) in session.draft().providers.iter().enumerate() {
        reporter.kv(
            &format!("provider {}", p + 1),
            &format!(
                "{} {} ({})",
                display_key(&provider.key),
                provider.base_url,
                provider.api.resolve()
            ),
        );
        for (m, model) in provider.models.iter().enumerate() {
            let mut line = format!(
                "{} name={} maxTokens={}",
                display_key(&model.id),
                model.name,
                model.max_tokens_text
            );
            if model.advanced_visible {
                line.push_str(&format!(
                    " contextWindow={} cost={}/{}/{}/{} reasoning={} text={} image={}",
                    model.context_window_text,
                    model.cost_input_text,
                    model.cost_output_text,
                    model.cost_cache_read_text,
                    model.cost_cache_write_text,
                    model.reasoning,
                    model.supports_text,
                    model.supports_image
                ));
            }
            reporter.kv(&format!("  model {}", m + 1), &line);
        }
    }
    show_summary(reporter, session);
    show_mode(reporter, session);

    reporter.section("Output");
    println!("{}", session.render_current());
}

fn show_summary(reporter: &dyn Reporter, session: &ConfigSession) {
    let primary = session.primary();
    reporter.kv(
        "primary",
        if primary.is_empty() { "(none)" } else { &primary },
    );
    let errors = session.errors().len();
    if errors == 0 {
        reporter.kv("errors", "none");
    } else {
        reporter.kv("errors", &format!("{errors} (see /errors)"));
    }
}

fn show_mode(reporter: &dyn Reporter, session: &ConfigSession) {
    let requested = session.requested_mode();
    let effective = session.effective_mode();
    if requested == effective {
        reporter.kv("mode", effective.code());
    } else {
        reporter.kv("mode", &format!("{effective} (requested {requested})"));
    }
    match (session.document(), session.upload_error()) {
        (Some(doc), _) => reporter.kv("merging", &doc.name),
        (None, Some(err)) => reporter.kv("upload", err),
        (None, None) => {}
    }
    let permissions = session.permissions();
    reporter.kv(
        "actions",
        &format!(
            "copy={} download={}",
            on_off(permissions.copy),
            on_off(permissions.download)
        ),
    );
}

fn show_errors(reporter: &dyn Reporter, session: &ConfigSession) {
    let errors = session.errors();
    if errors.is_empty() {
        reporter.status("Validation", "no errors");
        return;
    }
    for issue in errors {
        reporter.status("Validation", &issue.to_string());
    }
}

fn show_options(reporter: &dyn Reporter, session: &ConfigSession) {
    let options = session.model_options();
    if options.is_empty() {
        reporter.status("Primary", "no selectable models yet");
        return;
    }
    let primary = session.primary();
    for option in options {
        let marker = if option.key == primary { "*" } else { " " };
        reporter.raw(&format!("{marker} {}", option.label));
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn print_welcome(state: &ReplState) {
    let interactive = io::stderr().is_terminal();
    let title = paint("clawgen interactive editor", "1;36", interactive);
    let subtitle = paint("OpenClaw model provider config", "2;37", interactive);

    eprintln!("+------------------------------------------------------------+");
    eprintln!("| {:<58} |", title);
    eprintln!("| {:<58} |", subtitle);
    eprintln!("+------------------------------------------------------------+");
    let draft_line = format!("Draft: {}", state.path.display());
    eprintln!("| {:<58} |", fit_box_line(&draft_line, 58));
    let mode_line = format!("Mode: {}", state.session.requested_mode());
    eprintln!("| {:<58} |", mode_line);
    eprintln!("+------------------------------------------------------------+");
    eprintln!("| {:<58} |", "Type / for commands, /show to preview, /exit to quit");
    eprintln!("+------------------------------------------------------------+");
    eprintln!();
}

fn paint(text: &str, ansi: &str, interactive: bool) -> String {
    if interactive {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn fit_box_line(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }

    if width <= 3 {
        return ".".repeat(width);
    }

    let keep = width - 3;
    let head: String = chars.into_iter().take(keep).collect();
    format!("{head}...")
}
