mod api;
mod commands;
mod history;
mod intake;
mod messages;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::{Application, TailorClient};
use crate::commands::{Command, HELP};
use crate::history::{HistoryEntry, SessionHistory};
use crate::messages::friendly_error_message;

/// Tailor cover letters and CV bullets to job descriptions from the terminal.
#[derive(Debug, Parser)]
#[command(name = "tailor", version)]
struct Args {
    /// Resume file (.txt or .pdf), read as raw text.
    #[arg(long)]
    resume: PathBuf,

    /// Base URL of the tailor API.
    #[arg(long, env = "TAILOR_SERVER", default_value = "http://localhost:8080")]
    server: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let resume = intake::read_resume(&args.resume).await?;
    if resume.trim().is_empty() {
        anyhow::bail!("Resume file '{}' is empty", args.resume.display());
    }

    let client = TailorClient::new(&args.server);
    info!("Using endpoint {}", client.endpoint());
    println!("Resume loaded ({} characters). Type 'help' for commands.", resume.chars().count());

    let mut history = SessionHistory::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(usage) => {
                println!("{usage}");
                continue;
            }
        };

        match command {
            Command::Generate(path) => {
                generate(&client, &resume, &path, &mut history).await;
            }
            Command::History => print_history(&history),
            Command::Show(n) => match history.get(n) {
                Some(entry) => print_entry(entry),
                None => println!("No application #{n} in this session."),
            },
            Command::Clear => {
                history.clear();
                println!("History cleared.");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}

async fn generate(
    client: &TailorClient,
    resume: &str,
    job_path: &Path,
    history: &mut SessionHistory,
) {
    let job_description = match intake::read_text_lossy(job_path).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            println!("Missing information: the job description file is empty.");
            return;
        }
        Err(e) => {
            println!("{e:#}");
            return;
        }
    };

    println!("Generating...");
    match client.generate_application(resume, &job_description).await {
        Ok(application) => {
            print_application(&application);
            let entry = history.record(&job_description, &application);
            println!("Saved to history as #1 ({}).", entry.job_title);
        }
        Err(e) => {
            error!("Generation failed: {e}");
            println!("Generation failed: {}", friendly_error_message(&e.to_string()));
        }
    }
}

fn print_application(application: &Application) {
    println!("\n=== Cover letter ===\n{}\n", application.cover_letter);
    println!("=== CV bullets ===");
    for bullet in &application.cv_bullets {
        println!("• {bullet}");
    }
    println!();
}

fn print_history(history: &SessionHistory) {
    if history.is_empty() {
        println!("No applications generated yet.");
        return;
    }
    println!("{} application(s) this session:", history.len());
    for (i, entry) in history.entries().iter().enumerate() {
        println!("{:>3}. [{}] {}", i + 1, entry.timestamp, entry.job_title);
    }
}

fn print_entry(entry: &HistoryEntry) {
    println!("[{}] {} (id {})", entry.timestamp, entry.job_title, entry.id);
    print_application(&Application {
        cover_letter: entry.cover_letter.clone(),
        cv_bullets: entry.cv_bullets.clone(),
    });
}
