//! Top-level CLI definition and dispatch.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::control;
use serde_json::{Value, json};
use thiserror::Error;

use result_printer::cli::console::ConsoleSink;
use result_printer::core::config::Config;
use result_printer::core::errors::RpError;
use result_printer::logger::jsonl::{JsonlConfig, JsonlWriter};
use result_printer::logger::listener::LoggingListener;
use result_printer::model::result::TestRunResult;
use result_printer::model::transcript::{RunTranscript, load_coverage};
use result_printer::report::renderer::{
    CoverageBlock, RenderOptions, ReportRenderer, render_coverage,
};
use result_printer::report::replay::replay;
use result_printer::report::sink::{MemorySink, Sink};
use result_printer::report::summary::build_footer;

/// Test-run result printer with per-class coverage breakdown.
#[derive(Debug, Parser)]
#[command(
    name = "rprint",
    author,
    version,
    about = "Render test-run progress, summaries and coverage tables",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Blank line before a footer that reports problems.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Replay a recorded run through the reporter.
    Replay(ReplayArgs),
    /// Print the coverage block for a coverage report.
    Coverage(CoverageArgs),
    /// Inspect configuration.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
struct ReplayArgs {
    /// Run transcript (JSON).
    #[arg(value_name = "TRANSCRIPT")]
    transcript: PathBuf,
    /// Skip the coverage block even if the transcript carries a report.
    #[arg(long)]
    no_coverage: bool,
}

#[derive(Debug, Clone, Args)]
struct CoverageArgs {
    /// Coverage report (JSON).
    #[arg(value_name = "REPORT")]
    report: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Debug, Clone, Subcommand)]
enum ConfigCommand {
    /// Print the config file path in use.
    Path,
    /// Print the effective configuration.
    Show,
    /// Validate the configuration and exit.
    Validate,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad input: flags, config, or data files.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// Internal bug or invariant violation.
    #[error("{0}")]
    Internal(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Internal(_) | Self::Json(_) => 3,
        }
    }
}

impl From<RpError> for CliError {
    fn from(error: RpError) -> Self {
        match error {
            RpError::Io { .. } => Self::Runtime(error.to_string()),
            _ => Self::User(error.to_string()),
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if let Command::Completions(args) = &cli.command {
        let mut command = Cli::command();
        let binary_name = command.get_name().to_string();
        generate(args.shell, &mut command, binary_name, &mut io::stdout());
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.verbose {
        config.output.verbose = true;
    }
    if cli.no_color || !config.output.color {
        control::set_override(false);
    }

    match &cli.command {
        Command::Replay(args) => run_replay(cli, &config, args),
        Command::Coverage(args) => run_coverage(cli, args),
        Command::Config(args) => run_config(cli, &config, args),
        Command::Completions(_) => Ok(()),
    }
}

fn run_replay(cli: &Cli, config: &Config, args: &ReplayArgs) -> Result<(), CliError> {
    let transcript = RunTranscript::from_path(&args.transcript)?;
    let include_coverage = config.coverage.enabled && !args.no_coverage;

    match output_mode(cli) {
        OutputMode::Human => {
            let sink = ConsoleSink::new(io::stdout(), "<stdout>");
            replay_into(sink, config, &transcript, include_coverage)?;
        }
        OutputMode::Json => {
            let (result, sink) =
                replay_into(MemorySink::new(), config, &transcript, include_coverage)?;
            let coverage = match transcript.coverage.as_ref().filter(|_| include_coverage) {
                Some(report) => Some(CoverageBlock::build(report)?),
                None => None,
            };
            let payload = json!({
                "command": "replay",
                "result": result,
                "footer": build_footer(&result),
                "coverage": coverage,
                "output": sink.text(),
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

/// Replay through a renderer on `sink`, wrapped in the activity log when
/// logging is enabled. Hands the sink back for inspection.
fn replay_into<S: Sink>(
    sink: S,
    config: &Config,
    transcript: &RunTranscript,
    include_coverage: bool,
) -> Result<(TestRunResult, S), CliError> {
    let renderer = ReportRenderer::new(sink, RenderOptions::from(config));

    if config.log.enabled {
        let log = JsonlWriter::open(JsonlConfig::from(&config.log));
        let mut listener = LoggingListener::new(renderer, log);
        let result = replay(transcript, &mut listener, include_coverage)?;
        Ok((result, listener.into_inner().into_sink()))
    } else {
        let mut renderer = renderer;
        let result = replay(transcript, &mut renderer, include_coverage)?;
        Ok((result, renderer.into_sink()))
    }
}

fn run_coverage(cli: &Cli, args: &CoverageArgs) -> Result<(), CliError> {
    let report = load_coverage(&args.report)?;
    match output_mode(cli) {
        OutputMode::Human => {
            let mut sink = ConsoleSink::new(io::stdout(), "<stdout>");
            render_coverage(&report, &mut sink)?;
        }
        OutputMode::Json => {
            let block = CoverageBlock::build(&report)?;
            write_json_line(&json!({
                "command": "coverage",
                "coverage": block,
            }))?;
        }
    }
    Ok(())
}

fn run_config(cli: &Cli, config: &Config, args: &ConfigArgs) -> Result<(), CliError> {
    let mode = output_mode(cli);
    match args.command.as_ref().unwrap_or(&ConfigCommand::Show) {
        ConfigCommand::Path => match mode {
            OutputMode::Human => println!("{}", config.paths.config_file.display()),
            OutputMode::Json => write_json_line(&json!({
                "command": "config path",
                "path": config.paths.config_file,
                "exists": config.paths.config_file.exists(),
            }))?,
        },
        ConfigCommand::Show => {
            let hash = config.stable_hash()?;
            match mode {
                OutputMode::Human => {
                    let rendered = toml::to_string_pretty(config)
                        .map_err(|e| CliError::Internal(format!("failed to render config: {e}")))?;
                    println!("# config hash: {hash}");
                    print!("{rendered}");
                }
                OutputMode::Json => write_json_line(&json!({
                    "command": "config show",
                    "hash": hash,
                    "config": config,
                }))?,
            }
        }
        ConfigCommand::Validate => match mode {
            OutputMode::Human => println!(
                "configuration is valid: {}",
                config.paths.config_file.display()
            ),
            OutputMode::Json => write_json_line(&json!({
                "command": "config validate",
                "valid": true,
            }))?,
        },
    }
    Ok(())
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("RPRINT_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref())
}

/// `--json` wins, then `RPRINT_OUTPUT_FORMAT`; human otherwise.
fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }
    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        _ => OutputMode::Human,
    }
}
