//! quickaid: rule-based medical triage helper.
//!
//! Analyses a free-text symptom description or an image file and prints the
//! result as JSON. Educational use only; never a diagnosis.
//!
//! Usage:
//!   quickaid symptoms "fever and a sore throat"
//!   quickaid image photo.jpg --pretty
//!   quickaid --knowledge my-tables.toml symptoms "chest tightness"
//!   quickaid --external-reply reply.json symptoms "cough"

mod decode;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quickaid_contracts::{
    analysis::{AnalysisKind, AnalysisResponse},
    error::TriageError,
};
use quickaid_core::{guidance_for, Pipeline};
use quickaid_engine::{ExternalAnalyzer, RecordedReply, RuleEngine};
use quickaid_knowledge::KnowledgeBase;
use quickaid_verify::{response_schemas, standard_verifier};

// ── CLI definition ────────────────────────────────────────────────────────────

/// quickaid: heuristic triage for symptom descriptions and skin images.
#[derive(Parser)]
#[command(
    name = "quickaid",
    about = "Rule-based medical triage helper (educational, not diagnostic)",
    long_about = "Analyses symptom text or an image with deterministic rules and prints\n\
                  condition guesses, urgency, recommendations, and an emergency flag as JSON."
)]
struct Cli {
    /// Knowledge tables to use instead of the built-in ones.
    #[arg(long, global = true, value_name = "PATH")]
    knowledge: Option<PathBuf>,

    /// A recorded external-service reply to try before the rule engine.
    #[arg(long, global = true, value_name = "PATH")]
    external_reply: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse a free-text symptom description.
    Symptoms {
        /// The description; several words are joined with spaces.
        text: Vec<String>,
    },
    /// Analyse an image file (png, jpg, jpeg, gif, bmp; up to 16 MiB).
    Image {
        path: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Triage(#[from] TriageError),

    #[error("cannot read external reply '{path}': {source}")]
    Reply {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize response: {0}")]
    Json(#[from] serde_json::Error),
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("quickaid error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let knowledge = Arc::new(load_knowledge(cli.knowledge.as_deref())?);
    let pipeline = build_pipeline(knowledge, cli.external_reply.as_deref())?;

    let response = match cli.command {
        Command::Symptoms { text } => pipeline.respond_symptoms(&text.join(" ")),
        Command::Image { path } => match decode::load_image(&path) {
            Ok(image) => pipeline.respond_image(&image),
            Err(e) => AnalysisResponse::Guidance(guidance_for(AnalysisKind::Image, &e)),
        },
    };

    print_response(&response, cli.pretty)
}

// ── Wiring ────────────────────────────────────────────────────────────────────

fn load_knowledge(path: Option<&Path>) -> Result<KnowledgeBase, CliError> {
    let knowledge = match path {
        Some(path) => {
            info!(path = %path.display(), "loading knowledge tables");
            KnowledgeBase::from_file(path)?
        }
        None => KnowledgeBase::builtin()?,
    };
    Ok(knowledge)
}

fn build_pipeline(
    knowledge: Arc<KnowledgeBase>,
    external_reply: Option<&Path>,
) -> Result<Pipeline, CliError> {
    let pipeline = Pipeline::new(
        Box::new(RuleEngine::new(Arc::clone(&knowledge))),
        Box::new(standard_verifier()),
        response_schemas(),
    );

    let pipeline = match external_reply {
        Some(path) => {
            let reply = std::fs::read_to_string(path).map_err(|source| CliError::Reply {
                path: path.to_path_buf(),
                source,
            })?;
            pipeline.with_external(Box::new(ExternalAnalyzer::new(
                RecordedReply::new(reply),
                knowledge,
            )))
        }
        None => pipeline,
    };
    info!(external = pipeline.has_external(), "pipeline ready");
    Ok(pipeline)
}

fn print_response(response: &AnalysisResponse, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    println!("{json}");
    Ok(())
}
