use crate::cli::Cli;
use crate::storage::traits::{FilterKey, RowFilter};

const DEFAULT_DB_PATH: &str = "data/cached_news.db";

/// Everything one run needs, assembled once from the CLI and passed by
/// reference through the pipeline.
#[derive(Debug)]
pub struct RunConfig {
    pub url: Option<String>,
    pub json: bool,
    pub limit: Option<i64>,
    pub html_path: Option<String>,
    pub pdf_path: Option<String>,
    pub filter: Option<RowFilter>,
    pub db_path: String,
}

impl RunConfig {
    pub fn from_cli(cli: Cli) -> Self {
        // --date outranks --source when both are present
        let filter = if let Some(value) = cli.date {
            Some(RowFilter::new(FilterKey::Date, value))
        } else {
            cli.source
                .map(|value| RowFilter::new(FilterKey::Source, value))
        };

        Self {
            url: cli.url,
            json: cli.json,
            limit: cli.limit,
            html_path: cli.html,
            pdf_path: cli.pdf,
            filter,
            db_path: cli.db.unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
        }
    }
}
