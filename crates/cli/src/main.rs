use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use feed_config::{Feed, FeedConfig, FeedItem};
use item_filter::{
    CollectingSink, CompiledOptions, Diagnostic, DiagnosticSink, Level, RulePipeline, TracingSink,
    Verdict,
};
use std::fs;
use std::path::{Path, PathBuf};

/// feed-filter - Per-feed item filtering
#[derive(Parser)]
#[command(name = "feed-filter")]
#[command(about = "Decide which feed items survive a feed's filter options", long_about = None)]
struct Cli {
    /// Path to the feed configuration file
    #[arg(short, long, default_value = "feeds.txt")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a feed's filters over a JSON array of items
    Check {
        /// Feed URL, exactly as written in the configuration
        #[arg(long)]
        feed: String,

        /// JSON file holding [{title, content, categories, published}, ...]
        #[arg(long)]
        items: PathBuf,

        /// Print the diagnostics collected for each item
        #[arg(long)]
        verbose: bool,
    },

    /// List every feed with its filter options
    Options,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = FeedConfig::load_from_file(&cli.config)
        .with_context(|| format!("Failed to load feed configuration {}", cli.config.display()))?;
    tracing::debug!("Loaded {} feed(s) from {}", config.len(), cli.config.display());

    match cli.command {
        Commands::Check {
            feed,
            items,
            verbose,
        } => handle_check(&config, &feed, &items, verbose)?,
        Commands::Options => handle_options(&config),
    }

    Ok(())
}

/// Handle the 'check' command
fn handle_check(config: &FeedConfig, url: &str, items_path: &Path, verbose: bool) -> Result<()> {
    let feed = config.require_feed(url)?;
    let items = load_items(items_path)?;
    let pipeline = RulePipeline::standard();

    println!(
        "{}",
        format!("Checking {} item(s) against {}", items.len(), feed.url)
            .bold()
            .blue()
    );

    // Option warnings are reported once for the feed, not once per item.
    let sink = CollectingSink::new();
    let options = CompiledOptions::compile(&feed.options, &sink);
    report_diagnostics(sink.take(), verbose);

    let mut kept = 0;
    for item in &items {
        let sink = CollectingSink::new();
        let verdict = pipeline.evaluate_compiled(&options, item, &sink);
        if !verdict.skip() {
            kept += 1;
        }
        print_verdict(item, &verdict);
        report_diagnostics(sink.take(), verbose);
    }

    println!(
        "{} kept, {} skipped",
        kept.to_string().green(),
        (items.len() - kept).to_string().red()
    );
    Ok(())
}

/// Handle the 'options' command
fn handle_options(config: &FeedConfig) {
    if config.is_empty() {
        println!("No feeds configured.");
        return;
    }

    for feed in config.feeds() {
        print_feed(feed);
    }
}

fn load_items(path: &Path) -> Result<Vec<FeedItem>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read items from {}", path.display()))?;
    let items = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse items in {}", path.display()))?;
    Ok(items)
}

/// Warnings always reach the log; the full trail only on request.
fn report_diagnostics(diagnostics: Vec<Diagnostic>, verbose: bool) {
    for diagnostic in diagnostics {
        if diagnostic.level == Level::Warn {
            TracingSink.warn(&diagnostic.message);
        }
        if verbose {
            println!("    {} {}", "•".cyan(), diagnostic.message);
        }
    }
}

fn print_verdict(item: &FeedItem, verdict: &Verdict) {
    if verdict.skip() {
        println!(
            "{} {} [{}]",
            "SKIP".red().bold(),
            item.title,
            verdict.skipped_by().join(", ")
        );
    } else {
        println!("{} {}", "KEEP".green().bold(), item.title);
    }
}

fn print_feed(feed: &Feed) {
    println!("{}", feed.url.bold().blue());
    let recognized = feed.recognized_options();
    if recognized.is_empty() {
        println!("  (no filters)");
    }
    for option in recognized {
        println!("  {} {}: {}", "-".green(), option.name, option.value);
    }
}
