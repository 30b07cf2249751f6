use chrono::Local;

use crate::domain::{ArticleRecord, UrlKind};

/// Assemble the export document: one `<div>` per record inside a
/// minimal head/body shell titled after the dominant feed.
pub fn document(records: &[&ArticleRecord]) -> String {
    let mut body = String::new();
    let mut previous_feed: Option<&str> = None;

    for record in records {
        let show_feed_heading = previous_feed != Some(record.feed_title.as_str());
        body.push_str(&article_div(record, show_feed_heading));
        previous_feed = Some(record.feed_title.as_str());
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         {body}\
         </body>\n\
         </html>\n",
        title = escape(&page_title(records)),
        body = body,
    )
}

fn article_div(record: &ArticleRecord, show_feed_heading: bool) -> String {
    let mut div = String::from("<div>\n");

    if show_feed_heading {
        div.push_str(&format!("<h2>{}</h2>\n", escape(&record.feed_title)));
    }
    for url in &record.urls {
        if url.kind == UrlKind::Content {
            div.push_str(&format!(
                "<img src=\"{}\" alt=\"\" width=\"60%\">\n",
                escape(&url.href)
            ));
        }
    }
    div.push_str(&format!("<p>{}</p>\n", escape(&record.source_url)));
    div.push_str(&format!("<h3>{}</h3>\n", escape(&record.title)));
    div.push_str(&format!("<p>{}</p>\n", escape(&record.published)));
    div.push_str(&format!("<p>{}</p>\n", escape(&record.description)));
    for url in &record.urls {
        if url.kind == UrlKind::Link {
            let href = escape(&url.href);
            div.push_str(&format!("<a href=\"{href}\">{href}</a>\n"));
        }
    }
    div.push_str("</div>\n");

    div
}

/// The document title is the feed title every record shares; failing
/// that, the comma-joined titles covering at least three quarters of
/// the records; failing that, today's date.
fn page_title(records: &[&ArticleRecord]) -> String {
    let today = || Local::now().format("%Y-%m-%d").to_string();
    if records.is_empty() {
        return today();
    }

    // counts keyed in first-appearance order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match counts.iter().position(|(title, _)| *title == record.feed_title) {
            Some(index) => counts[index].1 += 1,
            None => counts.push((record.feed_title.as_str(), 1)),
        }
    }

    let total = records.len();
    if let Some((title, _)) = counts.iter().find(|(_, count)| *count == total) {
        return title.to_string();
    }

    let majors: Vec<&str> = counts
        .iter()
        .filter(|(_, count)| count * 4 >= total * 3)
        .map(|(title, _)| *title)
        .collect();

    if majors.is_empty() {
        today()
    } else {
        majors.join(", ")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
