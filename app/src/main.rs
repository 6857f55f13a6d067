use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use chrono::Utc;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use freshtrack_core::application::{create_demo_workflow, create_workflow};
use freshtrack_core::domain::common::FreshTrackConfig;
use freshtrack_core::domain::workflow::script::{DemoScript, ScriptEvent, play};
use freshtrack_core::domain::workflow::{ReportKind, ReportOutcome, SubmitOutcome};

mod args;
mod render;

use args::{Args, CliCommand, StockAction};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_filter))
        .init();

    match args.command.clone() {
        CliCommand::Scan { images, yes } => {
            run_scan(FreshTrackConfig::from(args), images, yes).await
        }
        CliCommand::Stock { action } => run_stock(FreshTrackConfig::from(args), action).await,
        CliCommand::Reminders => run_report(FreshTrackConfig::from(args), ReportKind::Reminders).await,
        CliCommand::Nutrition => run_report(FreshTrackConfig::from(args), ReportKind::Nutrition).await,
        CliCommand::Recipes => run_report(FreshTrackConfig::from(args), ReportKind::Recipes).await,
        CliCommand::Demo => run_demo().await,
    }
}

async fn run_scan(config: FreshTrackConfig, images: Vec<PathBuf>, yes: bool) -> Result<()> {
    require_api_key(&config)?;

    let shots = images.len();
    debug!(frames = shots, auto_commit = yes, "starting scan session");
    let workflow = create_workflow(config, images)?;

    workflow.start_camera().await?;
    for taken in 1..=shots {
        let outcome = workflow.capture_frame().await?;
        println!("Captured frame {} of {}", taken, shots);
        if outcome.auto_stopped {
            println!("Frame limit reached, camera released.");
            break;
        }
    }
    workflow.stop_camera().await;

    println!("Analyzing {} frame(s)...", workflow.frames_buffered().await);
    match workflow.submit_scan().await? {
        SubmitOutcome::CandidateReady => {}
        SubmitOutcome::NoCandidate => {
            println!("No item could be identified. Try clearer or closer shots.");
            return Ok(());
        }
        SubmitOutcome::Failed { reason } => bail!("analysis failed: {}", reason),
        SubmitOutcome::Superseded => return Ok(()),
    }

    let pending = workflow
        .pending()
        .await
        .ok_or_else(|| anyhow!("candidate vanished before review"))?;
    println!("{}", render::candidate_card(&pending.report));

    let commit = yes || confirm("Add this item to the inventory?")?;
    if commit {
        let item = workflow.commit_candidate().await?;
        println!("Added {} ({}).", item.name, item.id);
    } else {
        workflow.discard_candidate().await?;
        println!("Discarded.");
    }

    Ok(())
}

async fn run_stock(config: FreshTrackConfig, action: StockAction) -> Result<()> {
    let workflow = create_workflow(config, Vec::new())?;

    match action {
        StockAction::List => {
            let items = workflow.show_inventory().await;
            println!("{}", render::inventory_table(&items, Utc::now()));
        }
        StockAction::Remove { id } => {
            if workflow.remove_item(id).await? {
                println!("Removed {}.", id);
            } else {
                println!("No item with id {}.", id);
            }
        }
    }

    Ok(())
}

async fn run_report(config: FreshTrackConfig, kind: ReportKind) -> Result<()> {
    require_api_key(&config)?;

    let workflow = create_workflow(config, Vec::new())?;
    let items = workflow.items().await;

    match workflow.run_report(kind).await {
        ReportOutcome::Ready(report) => println!("{}", render::report(kind, &report, &items)),
        ReportOutcome::Failed { reason } => println!("Report unavailable right now: {}", reason),
        ReportOutcome::Superseded => {}
    }

    Ok(())
}

async fn run_demo() -> Result<()> {
    let workflow = create_demo_workflow();
    play(&workflow, DemoScript::guided_tour(), print_event).await?;
    Ok(())
}

fn print_event(event: ScriptEvent) {
    match event {
        ScriptEvent::Narration(text) => println!("\n== {}", text),
        ScriptEvent::CameraStarted => println!("Camera started."),
        ScriptEvent::FrameCaptured {
            frames_buffered,
            auto_stopped,
        } => {
            println!("Captured frame {}.", frames_buffered);
            if auto_stopped {
                println!("Frame limit reached, camera released.");
            }
        }
        ScriptEvent::ScanSubmitted(outcome) => match outcome {
            SubmitOutcome::CandidateReady => println!("Candidate identified."),
            SubmitOutcome::NoCandidate => {
                println!("No item could be identified. Try clearer or closer shots.")
            }
            SubmitOutcome::Failed { reason } => println!("Analysis failed: {}", reason),
            SubmitOutcome::Superseded => println!("Scan superseded by navigation."),
        },
        ScriptEvent::CandidateCommitted(item) => println!("Added {} to the inventory.", item.name),
        ScriptEvent::InventoryShown(items) => {
            println!("{}", render::inventory_table(&items, Utc::now()))
        }
        ScriptEvent::ReportFinished(kind, outcome) => match outcome {
            ReportOutcome::Ready(report) => println!("{}", render::report(kind, &report, &[])),
            ReportOutcome::Failed { reason } => println!("Report unavailable right now: {}", reason),
            ReportOutcome::Superseded => {}
        },
    }
}

fn require_api_key(config: &FreshTrackConfig) -> Result<()> {
    if config.llm.gemini_api_key.is_empty() {
        bail!("GEMINI_API_KEY is not set; this command needs model access");
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
