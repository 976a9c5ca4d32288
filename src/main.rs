//! `clawgen` 바이너리 진입점.

use clawgen::interface::cli::{AppComposition, Cli, CliAction, run_repl};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::default();

    let result = match action {
        CliAction::Interactive { draft } => run_repl(&composition, draft.as_deref()),
        CliAction::Init { draft, force } => composition
            .init_draft_usecase()
            .execute(draft.as_deref(), force)
            .map(|path| eprintln!("draft created: {}", path.display())),
        CliAction::Check { draft, primary } => {
            match composition
                .check_draft_usecase()
                .execute(draft.as_deref(), primary.as_deref())
            {
                Ok(report) => {
                    if report.primary.is_empty() {
                        eprintln!("primary: (none)");
                    } else {
                        eprintln!("primary: {}", report.primary);
                    }
                    if report.issues.is_empty() {
                        eprintln!("ok: no validation errors");
                        Ok(())
                    } else {
                        for issue in &report.issues {
                            println!("{issue}");
                        }
                        std::process::exit(1);
                    }
                }
                Err(err) => Err(err),
            }
        }
        CliAction::Generate(options) => composition
            .generate_usecase()
            .execute(options)
            .map(|_| ()),
        CliAction::InspectSettings => composition
            .inspect_settings_usecase()
            .execute()
            .map(|json| println!("{json}")),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
