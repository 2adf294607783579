mod config;
mod errors;
mod generation;
mod knowledge;
mod models;
mod records;
mod render;
mod routes;
mod state;
mod typeset;

use std::io::IsTerminal;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::{run_generation, DocumentChoice, GenerationRequest};
use crate::knowledge::router::answer_question;
use crate::knowledge::tools::TOOLS;
use crate::knowledge::KnowledgeBase;
use crate::render::placeholders::{
    prompt_line, PlaceholderSource, PresetAnswers, TerminalPrompter,
};
use crate::routes::build_router;
use crate::state::AppState;
use crate::typeset::Compiler;

#[derive(Debug, Parser)]
#[command(name = "forge", version, about = "Resume and cover letter generator with knowledge tools")]
struct Cli {
    /// Knowledge base file (.xml, .yml, .yaml or .json).
    #[arg(long, global = true)]
    knowledge_base: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate documents for one job application (the default).
    Generate(GenerateArgs),
    /// Print the knowledge base record at a dot path, or `all`.
    Lookup { path: String },
    /// Answer a free-text question from the knowledge base.
    Ask { question: String },
    /// List the knowledge tools.
    Tools,
    /// Serve the knowledge tools over HTTP.
    Serve,
}

#[derive(Debug, Default, Args)]
struct GenerateArgs {
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    role: Option<String>,
    /// Job posting URL, saved next to the generated documents.
    #[arg(long)]
    url: Option<String>,
    #[arg(long, value_enum)]
    choice: Option<DocumentChoice>,
    #[arg(long)]
    hiring_manager: Option<String>,
    #[arg(long)]
    company_address: Option<String>,
    #[arg(long)]
    resume_data: Option<PathBuf>,
    #[arg(long)]
    cover_letter_data: Option<PathBuf>,
    /// Keep the LaTeX source next to each PDF.
    #[arg(long)]
    keep_tex: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = cli.knowledge_base {
        config.knowledge_base = path;
    }

    match cli.command.unwrap_or_else(|| Command::Generate(GenerateArgs::default())) {
        Command::Generate(args) => generate(config, args).await,
        Command::Lookup { path } => {
            let kb = load_knowledge(&config).await?;
            println!("{}", kb.lookup(&path));
            Ok(())
        }
        Command::Ask { question } => {
            let kb = load_knowledge(&config).await?;
            println!("{}", answer_question(&kb, &question));
            Ok(())
        }
        Command::Tools => {
            for tool in TOOLS {
                println!("{}({})", tool.name, tool.arguments.join(", "));
                println!("    {}", tool.description);
            }
            Ok(())
        }
        Command::Serve => serve(config).await,
    }
}

async fn load_knowledge(config: &Config) -> Result<KnowledgeBase> {
    KnowledgeBase::load(&config.knowledge_base)
        .await
        .with_context(|| format!("Failed to load knowledge base {}", config.knowledge_base.display()))
}

async fn generate(mut config: Config, args: GenerateArgs) -> Result<()> {
    if let Some(path) = args.resume_data {
        config.resume_data = path;
    }
    if let Some(path) = args.cover_letter_data {
        config.cover_letter_data = path;
    }
    let interactive = std::io::stdin().is_terminal();

    let company = match args.company {
        Some(company) => company,
        None => prompt_line("\nEnter company name: ")?,
    };
    let role = match args.role {
        Some(role) => role,
        None => prompt_line("\nEnter role name (e.g. Software Engineer Intern): ")?,
    };
    let job_url = match args.url {
        Some(url) => Some(url),
        None if interactive => {
            Some(prompt_line("\nEnter job description URL (press Enter to skip): ")?)
        }
        None => None,
    };
    let choice = match args.choice {
        Some(choice) => choice,
        None if interactive => ask_choice()?,
        None => DocumentChoice::Both,
    };

    let compiler = Compiler::from_command_line(&config.latex_bin)
        .keep_source(args.keep_tex || config.keep_tex);
    info!("Using compiler '{}'", compiler.program());

    let mut placeholders = PresetAnswers {
        hiring_manager: args.hiring_manager,
        company_address: args.company_address,
        fallback: interactive
            .then(|| Box::new(TerminalPrompter) as Box<dyn PlaceholderSource + Send>),
    };

    let request = GenerationRequest {
        company,
        role,
        job_url,
        choice,
    };
    let report = run_generation(&config, &compiler, &request, &mut placeholders).await?;

    if let Some(note) = &report.job_description {
        println!("\nJob URL saved: {}", note.display());
    }
    for document in &report.documents {
        match &document.result {
            Ok(path) => println!("\n{} generated: {}", document.label, path.display()),
            Err(e) => eprintln!("\n{} failed: {e}", document.label),
        }
    }
    if report.failures() > 0 {
        warn!(
            "{} of {} documents failed; see {}",
            report.failures(),
            report.documents.len(),
            report.output_dir.display()
        );
    }

    Ok(())
}

fn ask_choice() -> Result<DocumentChoice> {
    loop {
        println!("\nWhat would you like to generate?\n{}", DocumentChoice::MENU);
        let answer = prompt_line("Enter your choice (1-3): ")?;
        if let Some(choice) = DocumentChoice::from_menu(&answer) {
            return Ok(choice);
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting forge tool server v{}", env!("CARGO_PKG_VERSION"));

    let knowledge = load_knowledge(&config).await?;
    let state = AppState {
        knowledge: Arc::new(knowledge),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
