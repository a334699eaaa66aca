//! CardioPredict CLI entry point.

use anyhow::{bail, Result};
use cardiopredict::cli::{Args, Commands, Verbosity};
use cardiopredict::config::Config;
use cardiopredict::{display, form, report};
use cardiopredict::{PredictionClient, Session, SessionEvent};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("{} could not load config ({e}); using defaults", "warning:".yellow());
        Config::default()
    });

    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| config.service.endpoint.clone());
    let timeout = args.timeout.unwrap_or(config.service.timeout_secs);
    let report_dir = args
        .report_dir
        .clone()
        .or_else(|| config.report.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let default_model = args
        .model
        .as_deref()
        .and_then(cardiopredict::profile::ModelVariant::from_wire_name)
        .unwrap_or_else(|| config.default_model());

    match args.command {
        Some(Commands::Check) => check(&endpoint, timeout).await,
        Some(Commands::Config) => show_config(&config),
        Some(Commands::Disclaimer) => {
            print_disclaimer();
            Ok(())
        }
        Some(Commands::Assess) | None => {
            assess(&args, &endpoint, timeout, &report_dir, default_model).await
        }
    }
}

/// The interactive assessment loop: form, prediction, result, repeat.
async fn assess(
    args: &Args,
    endpoint: &str,
    timeout: u64,
    report_dir: &std::path::Path,
    default_model: cardiopredict::profile::ModelVariant,
) -> Result<()> {
    let client = PredictionClient::new(endpoint, timeout)?;
    let mut editor = DefaultEditor::new()?;
    let mut session = Session::new();

    if args.verbosity() != Verbosity::Quiet {
        println!();
        println!("{}", "CardioPredict - Heart Disease Risk Assessment".cyan().bold());
        println!("Enter your health information to receive a risk prediction.");
        println!("{}", "Educational use only; not a substitute for medical advice.".dimmed());
    }
    if args.verbosity() == Verbosity::Verbose {
        println!("{}", format!("Endpoint: {endpoint} (timeout {timeout}s)").dimmed());
    }

    if let Some(draft) = session.draft_mut() {
        draft.model = default_model;
    }

    loop {
        // Form phase: prompt until the draft is complete or the user quits
        let profile = {
            let Some(draft) = session.draft_mut() else {
                bail!("session not in an editable state");
            };
            if !form::collect(&mut editor, draft)? {
                println!("\nAssessment cancelled.");
                return Ok(());
            }
            match draft.finish() {
                Ok(profile) => profile,
                Err(field) => {
                    // collect() fills every field, so this is unreachable in
                    // practice, but the type system cannot know that
                    bail!("missing field: {field}");
                }
            }
        };

        session.apply(SessionEvent::Submit)?;
        let spinner = start_spinner("Analyzing...");
        let outcome = client.predict(&profile).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(assessment) => {
                session.apply(SessionEvent::PredictionReady(assessment.clone()))?;
                display::show_result(&profile, &assessment);

                loop {
                    let choice = editor
                        .readline("  [n]ew assessment, [d]ownload report, [q]uit: ")
                        .unwrap_or_else(|_| "q".to_string());
                    match choice.trim().to_ascii_lowercase().as_str() {
                        "d" | "download" => {
                            match report::save_report(&profile, &assessment, report_dir) {
                                Ok(path) => {
                                    println!("  Report saved to {}", path.display().to_string().green())
                                }
                                Err(e) => eprintln!("  {} {e}", "error:".red().bold()),
                            }
                        }
                        "n" | "new" => {
                            session.apply(SessionEvent::Reset)?;
                            if let Some(draft) = session.draft_mut() {
                                draft.model = default_model;
                            }
                            break;
                        }
                        "q" | "quit" => return Ok(()),
                        _ => println!("  n, d or q"),
                    }
                }
            }
            Err(e) => {
                // Back to the form with the entered values retained
                session.apply(SessionEvent::PredictionFailed)?;
                display::show_prediction_error(&e);
                let choice = editor
                    .readline("  [r]esubmit (values kept) or [q]uit: ")
                    .unwrap_or_else(|_| "q".to_string());
                if choice.trim().eq_ignore_ascii_case("q") {
                    return Ok(());
                }
            }
        }
    }
}

/// `check` subcommand: probe the prediction service
async fn check(endpoint: &str, timeout: u64) -> Result<()> {
    let client = PredictionClient::new(endpoint, timeout)?;
    println!("Checking {endpoint} ...");
    if client.is_available().await {
        println!("{}", "reachable".green().bold());
        Ok(())
    } else {
        println!("{}", "unreachable".red().bold());
        bail!("prediction service did not respond");
    }
}

/// `config` subcommand: print path and active values
fn show_config(config: &Config) -> Result<()> {
    if let Ok(path) = Config::config_path() {
        println!("# {}", path.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn print_disclaimer() {
    println!("{}", "Medical Disclaimer".bold());
    println!();
    println!(
        "CardioPredict is an educational tool. Its predictions are produced by \
machine learning models trained on a public cardiovascular dataset and do not \
constitute a medical diagnosis, medical advice, or a substitute for \
consultation with a qualified healthcare provider. If you have concerns about \
your cardiovascular health, contact a medical professional. Never disregard \
professional medical advice because of a result shown by this tool."
    );
}

fn start_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
