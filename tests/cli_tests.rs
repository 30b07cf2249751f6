use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use newsreel::domain::{ArticleRecord, ArticleUrl, UrlKind};
use newsreel::storage::sqlite::{SqliteArticleRepository, SqliteStorage};
use newsreel::storage::ArticleStore;

fn newsreel_cmd() -> Command {
    Command::cargo_bin("newsreel").unwrap()
}

fn record(title: &str, day: &str, source: &str) -> ArticleRecord {
    ArticleRecord {
        title: title.to_string(),
        urls: vec![ArticleUrl::new("http://a.com", UrlKind::Link)],
        published: format!("{} 05:50:03", day),
        day: day.to_string(),
        description: "some text".to_string(),
        source_url: source.to_string(),
        feed_title: "Seeded Feed".to_string(),
    }
}

/// Create a database at the given path with two articles in it.
fn seed_db(path: &std::path::Path) {
    let storage = SqliteStorage::new(path).unwrap();
    let repo = SqliteArticleRepository::new(storage);
    repo.insert(&record("First article", "2022-06-03", "http://alpha.example/rss"))
        .unwrap();
    repo.insert(&record("Second article", "2022-06-04", "http://beta.example/rss"))
        .unwrap();
}

#[test]
fn test_version_exits_zero() {
    newsreel_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("newsreel"));
}

#[test]
fn test_help_lists_the_flags() {
    newsreel_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--limit"))
        .stdout(predicate::str::contains("--html"))
        .stdout(predicate::str::contains("--pdf"))
        .stdout(predicate::str::contains("--date"))
        .stdout(predicate::str::contains("--source"));
}

#[test]
fn test_malformed_url_fails_with_error_on_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    newsreel_cmd()
        .arg("not a url")
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Error:"));
}

#[test]
fn test_no_url_and_empty_cache_prints_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("empty.db");

    newsreel_cmd()
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cached_articles_are_printed_as_text() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("seeded.db");
    seed_db(&db_path);

    newsreel_cmd()
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: First article"))
        .stdout(predicate::str::contains("Title: Second article"))
        .stdout(predicate::str::contains("Feed: Seeded Feed"))
        .stdout(predicate::str::contains("http://a.com (link)"));
}

#[test]
fn test_limit_zero_prints_nothing_even_with_cached_articles() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("seeded.db");
    seed_db(&db_path);

    newsreel_cmd()
        .args(["--limit", "0"])
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_limit_one_prints_only_the_oldest_row() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("seeded.db");
    seed_db(&db_path);

    newsreel_cmd()
        .args(["--limit", "1"])
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("First article"))
        .stdout(predicate::str::contains("Second article").not());
}

#[test]
fn test_json_output_has_the_fixed_keys() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("seeded.db");
    seed_db(&db_path);

    newsreel_cmd()
        .arg("--json")
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\":\"First article\""))
        .stdout(predicate::str::contains("\"urls\":\"http://a.com (link)\""))
        .stdout(predicate::str::contains("\"feed_title\":\"Seeded Feed\""));
}

#[test]
fn test_date_filter_narrows_the_selection() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("seeded.db");
    seed_db(&db_path);

    newsreel_cmd()
        .args(["--date", "2022-06-04"])
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Second article"))
        .stdout(predicate::str::contains("First article").not());
}

#[test]
fn test_source_filter_narrows_the_selection() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("seeded.db");
    seed_db(&db_path);

    newsreel_cmd()
        .args(["--source", "alpha"])
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("First article"))
        .stdout(predicate::str::contains("Second article").not());
}

#[test]
fn test_html_export_writes_a_document() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("seeded.db");
    let html_path = temp_dir.path().join("out.html");
    seed_db(&db_path);

    newsreel_cmd()
        .args(["--html", html_path.to_str().unwrap()])
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML saved to"));

    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("<title>Seeded Feed</title>"));
    assert!(html.contains("<h3>First article</h3>"));
    assert!(html.contains("<h3>Second article</h3>"));
    // one heading for the shared feed title
    assert_eq!(html.matches("<h2>Seeded Feed</h2>").count(), 1);
}

#[test]
fn test_html_export_honors_the_limit() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("seeded.db");
    let html_path = temp_dir.path().join("limited.html");
    seed_db(&db_path);

    newsreel_cmd()
        .args(["--limit", "1", "--html", html_path.to_str().unwrap()])
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success();

    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("First article"));
    assert!(!html.contains("Second article"));
}

#[test]
fn test_verbose_flag_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("empty.db");

    newsreel_cmd()
        .arg("--verbose")
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success();
}

#[test]
fn test_log_file_is_created_and_written() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("seeded.db");
    let log_path = temp_dir.path().join("run.log");
    seed_db(&db_path);

    newsreel_cmd()
        .args(["--log", log_path.to_str().unwrap()])
        .env("NEWSREEL_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success();

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("cached records staged"));
}
