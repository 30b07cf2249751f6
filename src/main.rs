use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use newsreel::cli::Cli;
use newsreel::config::RunConfig;
use newsreel::domain::StagingCache;
use newsreel::errors::FeedResult;
use newsreel::feed;
use newsreel::render;
use newsreel::services::{ArchiveService, FetchService};
use newsreel::storage::sqlite::{SqliteArticleRepository, SqliteStorage};
use newsreel::storage::ArticleStore;

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        // failures are user-facing, not just log lines
        println!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> FeedResult<()> {
    init_logging(cli.verbose, cli.log.as_deref())?;

    let config = RunConfig::from_cli(cli);

    if let Some(parent) = Path::new(&config.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // The connection is held for the whole run and dropped on every
    // exit path, success or failure.
    let storage = SqliteStorage::new(&config.db_path)?;
    let archive = ArchiveService::new(SqliteArticleRepository::new(storage));
    let mut cache = StagingCache::new();

    match config.url.as_deref() {
        Some(url) => cmd_fetch(url, &config, &archive, &mut cache),
        None => cmd_cached(&config, &archive, &mut cache),
    }
}

fn init_logging(verbose: bool, log_path: Option<&str>) -> FeedResult<()> {
    match log_path {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
                )
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            let default = if verbose { "info" } else { "warn" };
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Fetch one feed, stage its articles, output them, then persist the
/// staged records.
fn cmd_fetch<S: ArticleStore>(
    url: &str,
    config: &RunConfig,
    archive: &ArchiveService<S>,
    cache: &mut StagingCache,
) -> FeedResult<()> {
    let body = FetchService::new().fetch(url)?;
    let records = feed::parse_feed(&body, url)?;
    for record in records {
        cache.append(record);
    }

    output_cache(config, cache)?;

    let inserted = archive.persist_all(cache)?;
    debug!(inserted, "fetch run complete");
    Ok(())
}

/// No URL given: stage records from the local cache database instead,
/// honoring the read filter.
fn cmd_cached<S: ArticleStore>(
    config: &RunConfig,
    archive: &ArchiveService<S>,
    cache: &mut StagingCache,
) -> FeedResult<()> {
    archive.load_cached(cache, config.filter.as_ref())?;
    output_cache(config, cache)
}

fn output_cache(config: &RunConfig, cache: &StagingCache) -> FeedResult<()> {
    let selected = cache.limited(config.limit);

    if config.html_path.is_none() && config.pdf_path.is_none() {
        for record in selected {
            if config.json {
                println!("{}", render::text::render_json(record)?);
            } else {
                println!("{}", render::text::render_text(record));
            }
        }
        return Ok(());
    }

    let document = render::html::document(&selected);

    if let Some(path) = &config.html_path {
        write_with_parents(Path::new(path), document.as_bytes())?;
        println!("HTML saved to {}", path);
    }
    if let Some(path) = &config.pdf_path {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        render::pdf::export(&document, Path::new(path))?;
        println!("PDF saved to {}", path);
    }

    Ok(())
}

fn write_with_parents(path: &Path, contents: &[u8]) -> FeedResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}
