use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "newsreel")]
#[command(about = "Tool for fetching and normalizing XML syndication feeds")]
#[command(version)]
pub struct Cli {
    /// URL of the XML feed to fetch; when absent, articles are read
    /// back from the local cache database
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Print each article as a single-line JSON object
    #[arg(long)]
    pub json: bool,

    /// Only output cached articles whose date matches (substring);
    /// applies when no URL is given, takes precedence over --source
    #[arg(long, value_name = "VALUE")]
    pub date: Option<String>,

    /// Only output cached articles whose source URL matches (substring);
    /// applies when no URL is given
    #[arg(long, value_name = "VALUE")]
    pub source: Option<String>,

    /// Limit the number of articles printed or exported (bare flag
    /// means 5; negative means unlimited)
    #[arg(
        long,
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "5",
        allow_negative_numbers = true
    )]
    pub limit: Option<i64>,

    /// Export articles as an HTML document instead of printing
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = "data/cached_news.html"
    )]
    pub html: Option<String>,

    /// Export articles as a PDF document instead of printing; needs
    /// wkhtmltopdf on the PATH
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = "data/cached_news.pdf"
    )]
    pub pdf: Option<String>,

    /// Output verbose status messages
    #[arg(long)]
    pub verbose: bool,

    /// Write debug-level logs to the given file
    #[arg(long, value_name = "PATH")]
    pub log: Option<String>,

    /// Cache database location
    #[arg(long, value_name = "PATH", env = "NEWSREEL_DB_PATH")]
    pub db: Option<String>,
}
