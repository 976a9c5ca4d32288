//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::usecases::generate::GenerateOptions;
use crate::domain::output::OutputMode;

#[derive(Debug, Parser)]
#[command(name = "clawgen")]
#[command(about = "Build, validate and merge OpenClaw model provider configs")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Draft file used by the interactive editor
    #[arg(long, global = true)]
    draft: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write a starter draft with one empty provider and model
    Init {
        /// Overwrite an existing draft
        #[arg(long)]
        force: bool,
    },
    /// Validate the draft and list every problem
    Check {
        /// Primary model reference (provider/model)
        #[arg(long)]
        primary: Option<String>,
    },
    /// Render the config and copy or download it
    Generate {
        /// Existing openclaw.json to merge into
        #[arg(long)]
        base: Option<PathBuf>,
        /// Output mode: full or snippet
        #[arg(long, value_parser = parse_mode)]
        mode: Option<OutputMode>,
        /// Primary model reference (provider/model)
        #[arg(long)]
        primary: Option<String>,
        /// Save the full document instead of copying text
        #[arg(long)]
        download: bool,
        /// Write copied text to this file instead of stdout
        #[arg(long, conflicts_with = "download")]
        output: Option<PathBuf>,
        /// Directory for --download
        #[arg(long, requires = "download")]
        out_dir: Option<PathBuf>,
        /// Let --download replace the --base file itself
        #[arg(long, requires = "download")]
        force: bool,
    },
    /// Show the effective merged tool settings
    Settings,
}

pub enum CliAction {
    Interactive { draft: Option<PathBuf> },
    Init { draft: Option<PathBuf>, force: bool },
    Check { draft: Option<PathBuf>, primary: Option<String> },
    Generate(GenerateOptions),
    InspectSettings,
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        let draft = self.draft;
        match self.command {
            None => Ok(CliAction::Interactive { draft }),
            Some(Commands::Init { force }) => Ok(CliAction::Init { draft, force }),
            Some(Commands::Check { primary }) => Ok(CliAction::Check { draft, primary }),
            Some(Commands::Generate {
                base,
                mode,
                primary,
                download,
                output,
                out_dir,
                force,
            }) => Ok(CliAction::Generate(GenerateOptions {
                draft_path: draft,
                base_path: base,
                mode,
                primary,
                download,
                output,
                output_dir: out_dir,
                force,
            })),
            Some(Commands::Settings) => Ok(CliAction::InspectSettings),
        }
    }
}

fn parse_mode(raw: &str) -> Result<OutputMode, String> {
    raw.parse()
}
