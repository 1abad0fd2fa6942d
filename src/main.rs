use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dialoguer::Input;
use tracing_subscriber::EnvFilter;

use research_assistant::output::{format_proposal, summary_stats};
use research_assistant::{
    check_credentials, Config, Error, GeminiProvider, PipelineConfig, ResearchAssistant,
    ResearchPipeline, ResultWriter, SerperClient, REQUIRED_KEYS,
};

#[derive(Parser, Debug)]
#[command(name = "research-assistant")]
#[command(version = "0.1.0")]
#[command(about = "Find papers on a topic, extract research gaps, and draft a research proposal")]
struct Args {
    /// Research topic (prompted for when omitted)
    #[arg(short, long)]
    topic: Option<String>,

    /// Directory the proposal is written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Gemini model name
    #[arg(short, long)]
    model: Option<String>,

    /// Promote section lines to markdown headings when printing the proposal
    #[arg(long)]
    formatted: bool,

    /// Hide the stage spinner
    #[arg(long)]
    no_progress: bool,
}

const RULE: &str = "==================================================";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("research_assistant=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    println!("Academic Research Assistant");
    println!("{}", RULE);

    let report = check_credentials(&REQUIRED_KEYS);
    if !report.is_ok() {
        eprintln!("{}", report);
        return Err(Error::MissingCredentials(report.missing).into());
    }
    tracing::info!("{}", report);

    let mut config = Config::from_env()?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(model) = args.model {
        config.model = model;
    }

    let writer = ResultWriter::new(&config.output_dir, &config.research);
    writer.ensure_output_dir()?;

    let llm = GeminiProvider::new(
        config.gemini_api_key.clone(),
        Some(config.model.clone()),
        config.temperature,
    )?;
    let search = SerperClient::new(&config.serper_api_key)?;

    let mut pipeline_config = PipelineConfig::from(&config);
    pipeline_config.show_progress = !args.no_progress;

    let pipeline = ResearchPipeline::new(Arc::new(llm), Arc::new(search), pipeline_config);
    let assistant = ResearchAssistant::new(pipeline, writer);

    let topic = match args.topic {
        Some(topic) => topic,
        None => Input::<String>::new()
            .with_prompt("Enter your research topic")
            .allow_empty(true)
            .interact_text()?,
    };
    let topic = topic.trim().to_string();

    if topic.is_empty() {
        eprintln!("Please provide a valid topic.");
        return Ok(());
    }

    println!("\nStarting research on: '{}'", topic);
    println!("This may take a few minutes...\n");

    let outcome = match assistant.research_and_propose(&topic).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error during research: {}", e);
            eprintln!("Please check your API keys and internet connection.");
            return Err(e.into());
        }
    };

    let proposal = if args.formatted {
        format_proposal(outcome.proposal())
    } else {
        outcome.proposal().to_string()
    };

    println!("\n{}", RULE);
    println!("RESEARCH PROPOSAL GENERATED");
    println!("{}", RULE);
    println!("{}", proposal);

    let stats = summary_stats(outcome.proposal());
    tracing::info!(
        "Proposal stats: {} words, {} characters, {} headings",
        stats.word_count,
        stats.character_count,
        stats.sections_found
    );

    if let Some(path) = outcome.saved_to {
        println!("\nFull proposal saved as: {}", path.display());
    }

    Ok(())
}
