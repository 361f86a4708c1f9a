//! Backfill - CLI entry point
//!
//! Loads a transcript, finds notes through AnkiConnect and writes matched
//! context back after confirmation.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

use backfill::anki::{AnkiConnect, NoteStore};
use backfill::cli::Cli;
use backfill::config::Config;
use backfill::loader::{FileType, load_lines};
use backfill::run::{default_tag, plan_updates, search_query};
use corpusindex::{ContextWindow, CorpusIndex};

fn setup_logging(verbose: bool) -> Result<()> {
    // stdout carries the report, logs go to stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to install tracing subscriber: {}", e))?;

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

/// Ask for an explicit "yes" before writing to Anki
fn confirm() -> Result<bool> {
    let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
    println!("Type '{}' to confirm:", "yes".yellow());

    match rl.readline("> ") {
        Ok(line) => Ok(line == "yes"),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(false),
        Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);

    // Load the transcript before touching Anki so bad input fails fast
    let file_type = match cli.file_type {
        Some(file_type) => file_type,
        None => FileType::detect(&cli.file)?,
    };
    if file_type == FileType::Renji {
        println!("Reading {} as a texthooker-ui export", cli.file.display().to_string().cyan());
    }
    let lines = load_lines(&cli.file, file_type).context("Failed to load transcript")?;
    let index = CorpusIndex::build(lines);
    info!(line_count = index.len(), "Transcript indexed");

    let query = match &cli.query {
        Some(query) => query.clone(),
        None => {
            let tag = cli
                .tag
                .clone()
                .or_else(|| default_tag(&cli.file))
                .ok_or_else(|| eyre::eyre!("Cannot derive a tag from {}, pass --tag", cli.file.display()))?;
            search_query(&config.notes, &tag)
        }
    };
    println!("Querying Anki with: '{}'", query.cyan());

    let store = AnkiConnect::from_config(&config.anki)?;
    let plan = plan_updates(
        &store,
        &index,
        &query,
        &config.notes.sentence_field,
        ContextWindow::from(&config.context),
    )
    .await
    .context("Failed to collect notes from Anki")?;

    if plan.total_notes == 0 {
        println!("Cannot find any notes to change. Exiting...");
        return Ok(());
    }

    for update in &plan.updates {
        println!("{} {}", update.identifier.to_string().dimmed(), update.context_text);
    }
    println!(
        "Found context for {} of {} notes.",
        plan.updates.len().to_string().green(),
        plan.total_notes
    );

    if plan.is_empty() {
        println!("Nothing to update. Exiting...");
        return Ok(());
    }

    if !confirm()? {
        println!("Reply was not 'yes'. Exiting...");
        return Ok(());
    }

    println!("Updating notes within Anki...");
    store
        .update_fields(&config.notes.context_field, &plan.updates)
        .await
        .context("Failed to update notes")?;
    println!("{} Done!", "✓".green());

    Ok(())
}
