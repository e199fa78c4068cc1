//! websearch CLI - unified web search command line interface.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use websearch::{
    select_backend, AppConfig, Backend, Search, SearchError, SearchOptions, SearchResults,
};

/// websearch - one CLI over Brave Search and SearXNG
#[derive(Parser)]
#[command(name = "websearch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a search query
    Search(SearchArgs),

    /// Show backend configuration status
    Backends,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Backend to use (brave or searxng); the configuration decides when omitted
    #[arg(short, long)]
    backend: Option<Backend>,

    /// Maximum number of results to display
    #[arg(short, long, default_value = "5")]
    limit: usize,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Backends => list_backends(),
    }
}

fn list_backends() -> Result<()> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(SearchError::NoBackend) => AppConfig::default(),
        Err(e) => return Err(e.into()),
    };

    println!("Search backends:\n");
    println!(
        "  brave    - Brave Search API ({})",
        if config.brave.is_configured() {
            "configured"
        } else {
            "not configured: set BRAVE_API_KEY"
        }
    );
    println!(
        "  searxng  - SearXNG instance ({})",
        if config.searxng.is_configured() {
            "configured"
        } else {
            "not configured: set SEARXNG_BASE_URL"
        }
    );
    println!();

    match select_backend(&config, None) {
        Ok(backend) => println!("Default backend: {}", backend),
        Err(_) => println!("No backend available."),
    }
    println!();
    println!("Usage: websearch search \"query\" --backend searxng");
    Ok(())
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let search = Search::new(config)?;

    let mut options = SearchOptions::new().with_max_results(args.limit);
    if let Some(backend) = args.backend {
        options = options.with_backend(backend);
    }

    let results = search.search(&args.query, &options).await?;

    match args.format {
        OutputFormat::Text => print_text(&results),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Compact => {
            for result in &results.results {
                println!("{}\t{}", result.title, result.url);
            }
        }
    }

    Ok(())
}

fn print_text(results: &SearchResults) {
    if results.is_empty() {
        match &results.error {
            Some(note) => println!("No results found ({}).", note),
            None => println!("No results found."),
        }
        return;
    }

    let total = results.total.unwrap_or(results.len() as u64);
    println!(
        "\nSearch results for \"{}\" via {} ({} total):\n",
        results.query, results.backend, total
    );

    for (i, result) in results.results.iter().enumerate() {
        let rank = result.rank.unwrap_or(i as u32 + 1);
        println!("{}. {}", rank, result.title);
        println!("   URL: {}", result.url);
        if !result.snippet.is_empty() {
            let snippet: String = result.snippet.chars().take(150).collect();
            if snippet.len() < result.snippet.len() {
                println!("   {}...", snippet);
            } else {
                println!("   {}", snippet);
            }
        }
        if let Some(source) = &result.source {
            println!("   Source: {}", source);
        }
        println!();
    }

    if let Some(key) = &results.summarizer_key {
        println!("Summarizer key: {}", key);
    }
}
