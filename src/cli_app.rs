//! Top-level CLI definition and dispatch.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use thiserror::Error;

use nasa_tlx::cli::administer::{SessionOutcome, run_session};
use nasa_tlx::core::errors::TlxError;
use nasa_tlx::core::paths::settings_file;
use nasa_tlx::core::settings::Settings;
use nasa_tlx::export::csv::CsvExporter;
use nasa_tlx::protocol::session::SessionRecord;

/// NASA-TLX workload assessor.
#[derive(Debug, Parser)]
#[command(
    name = "tlx",
    author,
    version,
    about = "NASA TLX - Workload Assessment",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Administer one assessment session interactively.
    Run(RunArgs),
    /// View and update persisted settings.
    Settings(SettingsArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Pre-fill the participant ID page.
    #[arg(long, value_name = "ID")]
    participant: Option<String>,
    /// Append to this file instead of the configured output path.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Seed the comparison-order RNG for a reproducible agenda.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Args)]
struct SettingsArgs {
    #[command(subcommand)]
    action: SettingsAction,
}

#[derive(Debug, Clone, Subcommand)]
enum SettingsAction {
    /// Print the active settings and where they come from.
    Show,
    /// Change one or more settings.
    Set(SettingsSetArgs),
    /// Delete the settings file, restoring defaults.
    Clear,
}

#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = true)]
struct SettingsSetArgs {
    /// CSV file session rows are appended to.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Whether a graphical host should open fullscreen.
    #[arg(long, value_name = "BOOL")]
    fullscreen: Option<bool>,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completions for.
    shell: CompletionShell,
}

/// Binary-level error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Tlx(#[from] TlxError),
    #[error("io failure: {0}")]
    Io(#[from] io::Error),
}

/// Dispatch a parsed command line.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    match &cli.command {
        Command::Run(args) => run_assessment(cli, args),
        Command::Settings(args) => run_settings(cli, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

fn run_assessment(cli: &Cli, args: &RunArgs) -> Result<(), CliError> {
    let settings = Settings::load(&settings_file())?;
    let output_path = args.output.clone().unwrap_or(settings.output_file);

    let mut rng = args.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();

    let outcome = run_session(
        &mut reader,
        &mut writer,
        &mut rng,
        args.participant.as_deref(),
    )?;

    match outcome {
        SessionOutcome::Saved(record) => {
            let exporter = CsvExporter::new(&output_path);
            exporter.append(&record)?;
            emit_saved(cli, &record, &exporter)
        }
        SessionOutcome::Cancelled => {
            if cli.json {
                println!("{}", json!({ "saved": false }));
            } else {
                println!("\n  Session cancelled — nothing was saved.");
            }
            Ok(())
        }
    }
}

fn emit_saved(cli: &Cli, record: &SessionRecord, exporter: &CsvExporter) -> Result<(), CliError> {
    if cli.json {
        let payload = json!({
            "saved": true,
            "output_file": exporter.path(),
            "overall_workload": record.overall_workload(),
            "record": record,
        });
        println!("{}", serde_json::to_string_pretty(&payload).map_err(TlxError::from)?);
        return Ok(());
    }

    let mut out = io::stdout();
    writeln!(out)?;
    writeln!(out, "  {}", "Session saved.".green().bold())?;
    writeln!(out)?;
    for score in &record.scores {
        writeln!(
            out,
            "    {:<16} raw {:>3}   wins {}   weighted {:>2}",
            score.factor.name(),
            score.raw,
            score.tally,
            score.weighted
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "    {:<16} {}",
        "Overall workload".bold(),
        record.overall_workload()
    )?;
    writeln!(out)?;
    writeln!(out, "  Appended to {}", exporter.path().display())?;
    Ok(())
}

fn run_settings(cli: &Cli, args: &SettingsArgs) -> Result<(), CliError> {
    let path = settings_file();

    match &args.action {
        SettingsAction::Show => {
            let settings = Settings::load(&path)?;
            if cli.json {
                let payload = json!({
                    "settings_file": path,
                    "output_file": settings.output_file,
                    "fullscreen": settings.fullscreen,
                });
                println!("{}", serde_json::to_string_pretty(&payload).map_err(TlxError::from)?);
            } else {
                println!("  output_file: {}", settings.output_file.display());
                println!("  fullscreen:  {}", settings.fullscreen);
                println!("  (settings file: {})", path.display());
            }
            Ok(())
        }

        SettingsAction::Set(set) => {
            let mut settings = Settings::load(&path)?;
            if let Some(output) = &set.output {
                settings.output_file.clone_from(output);
            }
            if let Some(fullscreen) = set.fullscreen {
                settings.fullscreen = fullscreen;
            }
            settings.save(&path)?;
            if cli.json {
                println!("{}", json!({ "saved": true, "settings_file": path }));
            } else {
                println!("  {}", "Your settings have been saved!".green());
            }
            Ok(())
        }

        SettingsAction::Clear => {
            Settings::clear_all(&path)?;
            if cli.json {
                println!("{}", json!({ "cleared": true, "settings_file": path }));
            } else {
                println!("  {}", "Your settings have been cleared!".green());
            }
            Ok(())
        }
    }
}
