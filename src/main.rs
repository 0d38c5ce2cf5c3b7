use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use pagesmith::app::domain::block::BlockKind;
use pagesmith::app::domain::message::{Message, SuggestionOutcome};
use pagesmith::app::domain::page::{Page, PagePlan};
use pagesmith::app::domain::settings::BuilderSettings;
use pagesmith::app::error::{AppError, Result};
use pagesmith::app::services::export::write_document;
use pagesmith::app::services::suggest::SuggestClient;
use pagesmith::app::state::{BuilderState, SuggestionKind};

#[derive(Parser)]
#[command(name = "pagesmith", version, about = "Generate a self-contained HTML page from a JSON block plan")]
struct Cli {
    /// JSON page plan describing the title and block sequence
    plan: PathBuf,

    /// Write the generated document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the page title from the plan
    #[arg(long)]
    title: Option<String>,

    /// Ask the suggestion service for heading levels before generating
    #[arg(long)]
    suggest_levels: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = BuilderSettings::load();

    let contents = fs::read_to_string(&cli.plan)?;
    let plan: PagePlan = serde_json::from_str(&contents)?;
    let page = Page::from_plan(plan, &settings.default_title);
    let mut state = BuilderState::with_page(page, settings);

    if let Some(title) = cli.title {
        state.apply(Message::SetTitle(title));
    }

    if cli.suggest_levels {
        run_level_suggestions(&mut state)?;
    }

    let html = state.generate().to_string();
    match cli.output {
        Some(path) => write_document(&html, &path)?,
        None => println!("{html}"),
    }
    Ok(())
}

/// Ask the suggestion service for a level for every heading block, applying
/// each answer through the normal update path. Per-block failures already
/// collapse to the fallback level inside the client.
fn run_level_suggestions(state: &mut BuilderState) -> Result<()> {
    let api_key = state.settings.resolve_api_key().ok_or_else(|| {
        AppError::Settings(
            "no API key configured; set api_key in settings.json or the API_KEY environment variable"
                .to_string(),
        )
    })?;
    let client = SuggestClient::new(
        &state.settings.model,
        &api_key,
        state.settings.request_timeout_secs,
    );

    let heading_ids: Vec<_> = state
        .page
        .blocks()
        .iter()
        .filter(|b| b.kind() == BlockKind::Heading)
        .map(|b| b.id)
        .collect();

    for id in heading_ids {
        if let Some(text) = state.begin_suggestion(id, SuggestionKind::HeadingLevel) {
            let level = client.suggest_heading_level(&text);
            state.apply(Message::SuggestionReady(
                id,
                SuggestionOutcome::HeadingLevel(level),
            ));
        }
    }
    Ok(())
}
