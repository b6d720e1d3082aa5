//! Prodsearch CLI - Debounced product search from the terminal
//!
//! One-shot lookups plus an interactive mode where every stdin line is the
//! new contents of the search box.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prodsearch::{
    DebouncedSearch, Product, ProductCatalog, ProductId, SearchError, SearchPhase, SearchPipeline,
    SearchState,
};
use prodsearch_http::HttpCatalog;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use config::Config;

const NO_IMAGE: &str = "(no image)";

#[derive(Parser)]
#[command(name = "prodsearch")]
#[command(about = "Prodsearch CLI - Debounced product search", long_about = None)]
#[command(version)]
struct Cli {
    /// Catalog base URL (overrides config and PRODSEARCH_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Quiet window in milliseconds (overrides config and PRODSEARCH_DEBOUNCE_MS)
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search products once
    Search {
        /// Search text
        query: String,
        /// Print the result list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one product's details
    Show {
        /// Product ID
        id: ProductId,
        /// Print the product as JSON
        #[arg(long)]
        json: bool,
    },

    /// Type queries line by line; `:pick <n>`, `:clear`, `:quit`
    Interactive,

    /// Show current configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.apply_overrides(cli.base_url, None)?;
    if let Some(ms) = cli.debounce_ms {
        config.debounce_ms = ms;
    }

    match cli.command {
        Commands::Search { query, json } => cmd_search(&config, query, json).await,
        Commands::Show { id, json } => cmd_show(&config, id, json).await,
        Commands::Interactive => cmd_interactive(&config).await,
        Commands::Config { init } => cmd_config(&config, init),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn build_pipeline(config: &Config) -> Result<Arc<SearchPipeline<HttpCatalog>>> {
    let catalog = HttpCatalog::new(config.catalog_config())
        .context("Failed to set up product catalog")?;
    Ok(Arc::new(SearchPipeline::new(Arc::new(catalog))))
}

/// Wrap a pipeline error with its user-facing message on top
fn surface(err: SearchError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_search(config: &Config, query: String, json: bool) -> Result<()> {
    let pipeline = build_pipeline(config)?;

    pipeline.edit_query(query.as_str());
    pipeline.search(&query).await.map_err(surface)?;

    let state = pipeline.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&state.results)?);
        return Ok(());
    }

    if state.results.is_empty() {
        println!("No products found for '{}'", query);
        return Ok(());
    }

    for item in &state.results {
        println!("{:>6}  {}", item.id, item.name);
    }

    Ok(())
}

async fn cmd_show(config: &Config, id: ProductId, json: bool) -> Result<()> {
    let pipeline = build_pipeline(config)?;

    let product = pipeline
        .select(id)
        .await
        .map_err(surface)?
        .applied()
        .context("Detail lookup was superseded")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&product)?);
    } else {
        println!("{}", format_card(&product));
    }

    Ok(())
}

async fn cmd_interactive(config: &Config) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let search = DebouncedSearch::new(pipeline, config.debounce());

    let mut updates = search.subscribe();
    let printer = tokio::spawn(async move {
        let mut last = updates.borrow_and_update().clone();
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            for line in describe_changes(&last, &state) {
                println!("{}", line);
            }
            last = state;
        }
    });

    println!("Type to search. :pick <n> selects a result, :clear resets, :quit exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match parse_line(&line) {
            Line::Quit => break,
            Line::Clear => search.clear(),
            Line::Query(text) => {
                search.input(text);
            }
            Line::Pick(n) => {
                if spawn_pick(search.pipeline(), n).is_none() {
                    eprintln!("No result #{}", n);
                }
            }
            Line::Invalid(reason) => eprintln!("{}", reason),
        }
    }

    printer.abort();
    Ok(())
}

fn cmd_config(config: &Config, init: bool) -> Result<()> {
    let path = Config::config_path()?;

    if init {
        if path.exists() {
            println!("Config already exists at {:?}", path);
        } else {
            Config::default().save_to(&path)?;
            println!("Wrote default config to {:?}", path);
        }
    }

    println!("Configuration:");
    println!("  Path: {:?}", path);
    println!("  Base URL: {}", config.base_url);
    println!("  Debounce: {} ms", config.debounce_ms);
    println!("  Timeout: {} s", config.timeout_secs);

    Ok(())
}

// ============================================
// Interactive helpers
// ============================================

/// Start the detail lookup for the nth listed result (1-based)
///
/// Runs on its own task so stdin keeps being read while it is in flight.
fn spawn_pick<C>(pipeline: &Arc<SearchPipeline<C>>, n: usize) -> Option<JoinHandle<()>>
where
    C: ProductCatalog + ?Sized + 'static,
{
    let id = pipeline.result_id(n.checked_sub(1)?)?;
    let pipeline = Arc::clone(pipeline);

    Some(tokio::spawn(async move {
        if let Err(e) = pipeline.select(id).await {
            tracing::warn!(error = %e, "Product selection failed");
        }
    }))
}

#[derive(Debug, PartialEq)]
enum Line {
    Query(String),
    Pick(usize),
    Clear,
    Quit,
    Invalid(String),
}

fn parse_line(raw: &str) -> Line {
    let line = raw.trim_end_matches(['\r', '\n']);

    let Some(command) = line.strip_prefix(':') else {
        return Line::Query(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit" | "q"), None) => Line::Quit,
        (Some("clear"), None) => Line::Clear,
        (Some("pick"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Line::Pick(n),
            _ => Line::Invalid(format!("Not a result number: {}", n)),
        },
        _ => Line::Invalid(format!("Unknown command: {}", line)),
    }
}

/// Lines to print for the transition `prev` -> `next`
fn describe_changes(prev: &SearchState, next: &SearchState) -> Vec<String> {
    let mut out = Vec::new();

    if next.phase == SearchPhase::Pending && prev.phase != SearchPhase::Pending {
        out.push(format!("Searching '{}'...", next.query));
    }

    if next.results != prev.results || (next.phase != prev.phase && next.phase == SearchPhase::Populated) {
        if !next.results.is_empty() {
            for (i, item) in next.results.iter().enumerate() {
                out.push(format!("  {}. {}", i + 1, item.name));
            }
        } else if next.phase == SearchPhase::Populated && prev.phase != SearchPhase::Populated {
            out.push(format!("No products found for '{}'", next.query));
        }
    }

    if next.error != prev.error {
        if let Some(message) = &next.error {
            out.push(format!("! {}", message));
        }
    }

    if next.selected != prev.selected {
        if let Some(product) = next.selected_product() {
            out.push(format_card(product));
        }
    }

    out
}

fn format_card(product: &Product) -> String {
    let mut card = format!(
        "{}\n  {}€\n  {}",
        product.name,
        product.price,
        product.image_or(NO_IMAGE)
    );
    if !product.description.is_empty() {
        card.push_str("\n  ");
        card.push_str(&product.description);
    }
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use prodsearch::{CatalogError, ProductSummary};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    /// Catalog whose detail lookup waits until released
    struct HeldCatalog {
        release: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl ProductCatalog for HeldCatalog {
        async fn search(&self, _query: &str) -> Result<Vec<ProductSummary>, CatalogError> {
            Ok(vec![ProductSummary::new(1, "Laptop"), ProductSummary::new(2, "Lamp")])
        }

        async fn product(&self, _id: ProductId) -> Result<Product, CatalogError> {
            let release = self.release.lock().unwrap().take();
            if let Some(release) = release {
                let _ = release.await;
            }
            Ok(Product::new(2, "Lamp", 25.0))
        }

        fn name(&self) -> &str {
            "held"
        }
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("lap"), Line::Query("lap".to_string()));
        assert_eq!(parse_line("lap top\r\n"), Line::Query("lap top".to_string()));
        assert_eq!(parse_line(""), Line::Query(String::new()));
        assert_eq!(parse_line(":pick 2"), Line::Pick(2));
        assert_eq!(parse_line(":clear"), Line::Clear);
        assert_eq!(parse_line(":quit"), Line::Quit);
        assert!(matches!(parse_line(":pick 0"), Line::Invalid(_)));
        assert!(matches!(parse_line(":dance"), Line::Invalid(_)));
    }

    #[test]
    fn test_format_card_uses_placeholder() {
        let card = format_card(&Product::new(1, "Laptop", 999.0).with_description("Thin"));

        assert_eq!(card, "Laptop\n  999€\n  (no image)\n  Thin");
    }

    #[test]
    fn test_describe_populated_results() {
        let prev = SearchState {
            query: "lap".to_string(),
            phase: SearchPhase::Pending,
            ..SearchState::default()
        };
        let next = SearchState {
            results: vec![ProductSummary::new(1, "Laptop")],
            phase: SearchPhase::Populated,
            ..prev.clone()
        };

        assert_eq!(describe_changes(&prev, &next), vec!["  1. Laptop".to_string()]);
    }

    #[test]
    fn test_describe_failure() {
        let prev = SearchState {
            query: "lap".to_string(),
            phase: SearchPhase::Pending,
            ..SearchState::default()
        };
        let next = SearchState {
            error: Some("Failed to fetch products".to_string()),
            phase: SearchPhase::Failed,
            ..prev.clone()
        };

        assert_eq!(
            describe_changes(&prev, &next),
            vec!["! Failed to fetch products".to_string()]
        );
    }

    #[test]
    fn test_describe_empty_success() {
        let prev = SearchState {
            query: "zzz".to_string(),
            phase: SearchPhase::Pending,
            ..SearchState::default()
        };
        let next = SearchState {
            phase: SearchPhase::Populated,
            ..prev.clone()
        };

        assert_eq!(
            describe_changes(&prev, &next),
            vec!["No products found for 'zzz'".to_string()]
        );
    }

    #[test]
    fn test_describe_backspace_after_results() {
        let prev = SearchState {
            query: "laptop".to_string(),
            results: vec![ProductSummary::new(1, "Laptop")],
            phase: SearchPhase::Populated,
            ..SearchState::default()
        };
        let next = SearchState {
            query: "lapt".to_string(),
            results: Vec::new(),
            phase: SearchPhase::Idle,
            ..SearchState::default()
        };

        assert!(describe_changes(&prev, &next).is_empty());

        let stale = SearchState {
            phase: SearchPhase::Populated,
            ..next
        };
        assert!(describe_changes(&prev, &stale).is_empty());
    }

    #[tokio::test]
    async fn test_pick_runs_without_blocking_input() {
        let (release, held) = oneshot::channel();
        let catalog = Arc::new(HeldCatalog {
            release: Mutex::new(Some(held)),
        });
        let pipeline = Arc::new(SearchPipeline::new(catalog));
        pipeline.edit_query("la");
        pipeline.search("la").await.unwrap();

        assert!(spawn_pick(&pipeline, 0).is_none());
        assert!(spawn_pick(&pipeline, 3).is_none());

        let pick = spawn_pick(&pipeline, 2).unwrap();
        pipeline.edit_query("lam");
        assert_eq!(pipeline.snapshot().query, "lam");
        assert!(pipeline.snapshot().selected.is_empty());

        release.send(()).unwrap();
        pick.await.unwrap();

        let state = pipeline.snapshot();
        assert_eq!(state.selected_product().map(|p| p.name.as_str()), Some("Lamp"));
        assert_eq!(state.query, "");
    }
}
