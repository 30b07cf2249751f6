use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::errors::{FeedError, FeedResult};

/// External HTML-to-PDF converter. The original program drove the same
/// engine through pdfkit.
const CONVERTER: &str = "wkhtmltopdf";

/// Convert the assembled HTML document to a PDF at `output`.
///
/// The document is spooled to a temporary `.html` file for the
/// converter and removed again on every path, including failure.
pub fn export(html: &str, output: &Path) -> FeedResult<()> {
    let mut spool = tempfile::Builder::new()
        .prefix("cached_news")
        .suffix(".html")
        .tempfile()?;
    spool.write_all(html.as_bytes())?;
    spool.flush()?;

    debug!(spool = %spool.path().display(), output = %output.display(), "converting HTML to PDF");

    let status = Command::new(CONVERTER)
        .arg(spool.path())
        .arg(output)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| FeedError::Render(format!("could not run {}: {}", CONVERTER, e)))?;

    if !status.success() {
        return Err(FeedError::Render(format!(
            "{} exited with {}",
            CONVERTER, status
        )));
    }

    info!(output = %output.display(), "PDF written");
    Ok(())
}
