//! Bookmarks CLI routing against an on-disk store

use bookmarks::cli::{
    map_error, run_merge, Cli, Commands, MergeCli, OutputFormat, RunContext, MERGE_BANNER,
    MERGE_DONE,
};
use bookmarks::config::BookmarksConfig;
use bookmarks::store::BookmarkStore;
use clap::Parser;
use tempfile::TempDir;

fn context(dir: &TempDir) -> RunContext {
    let mut config = BookmarksConfig::default();
    config.storage.database_path = Some(dir.path().join("db").join("bookmarks.db"));
    config.storage.favicon_dir = Some(dir.path().join("favicons"));
    RunContext::with_config(config).unwrap()
}

fn run(ctx: &RunContext, args: &[&str]) -> Result<String, String> {
    let mut argv = vec!["bookmarks"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    ctx.execute(&cli.command).map_err(|e| map_error(&e))
}

#[test]
fn test_init_reports_count_and_creates_dirs() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let out = run(&ctx, &["init"]).unwrap();
    assert!(out.contains("Total bookmarks: 0"));
    assert!(dir.path().join("db").join("bookmarks.db").exists());
    assert!(dir.path().join("favicons").is_dir());
}

#[test]
fn test_add_then_list_pipe() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);

    assert_eq!(
        run(&ctx, &["add", "https://rust-lang.org", "Rust", "The language", "lang systems"]).unwrap(),
        "Added: Rust"
    );
    assert_eq!(run(&ctx, &["add", "https://docs.rs"]).unwrap(), "Added: https://docs.rs");

    let listing = run(&ctx, &["list"]).unwrap();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("|https://docs.rs|https://docs.rs||"));
    assert!(lines[1].ends_with("|Rust|https://rust-lang.org|The language [lang systems]|"));
}

#[test]
fn test_duplicate_add_is_an_error() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    run(&ctx, &["add", "https://a.example"]).unwrap();
    let err = run(&ctx, &["add", "https://a.example", "Again"]).unwrap_err();
    assert!(err.contains("Bookmark already exists"));
    assert_eq!(ctx.store().count().unwrap(), 1);
}

#[test]
fn test_search_json() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    run(&ctx, &["add", "https://rust-lang.org", "Rust"]).unwrap();
    run(&ctx, &["add", "https://python.org", "Python"]).unwrap();

    let out = run(&ctx, &["search", "rust", "--format", "json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let hits = value.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Rust");
}

#[test]
fn test_update_show_and_delete() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    run(&ctx, &["add", "https://a.example", "A"]).unwrap();
    let id = ctx.store().list_all().unwrap()[0].id.to_string();

    assert_eq!(
        run(&ctx, &["update", id.as_str(), "--title", "Renamed", "--tags", "x"]).unwrap(),
        "Updated: Renamed"
    );
    let shown = run(&ctx, &["show", id.as_str(), "--format", "pipe"]).unwrap();
    assert_eq!(shown, format!("{}|Renamed|https://a.example| [x]|", id));

    assert_eq!(run(&ctx, &["delete", id.as_str()]).unwrap(), "Deleted");
    assert_eq!(run(&ctx, &["delete", id.as_str()]).unwrap(), "Not found");
    assert!(run(&ctx, &["show", id.as_str()]).is_err());
    assert!(run(&ctx, &["update", id.as_str(), "--title", "Gone"]).is_err());
}

#[test]
fn test_update_without_fields_is_rejected() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    run(&ctx, &["add", "https://a.example"]).unwrap();
    assert!(run(&ctx, &["update", "1"]).is_err());
}

#[test]
fn test_cli_parsing() {
    let cli = Cli::try_parse_from(["bookmarks", "--database", "/tmp/x.db", "search", "foo"]).unwrap();
    assert_eq!(cli.database.as_deref(), Some(std::path::Path::new("/tmp/x.db")));
    match cli.command {
        Commands::Search { query, format } => {
            assert_eq!(query, "foo");
            assert_eq!(format, OutputFormat::Pipe);
        }
        _ => panic!("expected search"),
    }

    assert!(Cli::try_parse_from(["bookmarks", "delete", "abc"]).is_err());
    assert!(matches!(
        Cli::try_parse_from(["bookmarks", "add-interactive"]).unwrap().command,
        Commands::AddInteractive
    ));

    let merge = MergeCli::try_parse_from(["merge-walker-config", "--dry-run", "--template", "/t.toml"]).unwrap();
    assert!(merge.dry_run);
    assert_eq!(merge.template.as_deref(), Some(std::path::Path::new("/t.toml")));
    assert!(merge.user_config.is_none());
}

#[test]
fn test_run_merge_reports_progress() {
    let dir = TempDir::new().unwrap();
    let user = dir.path().join("walker").join("config.toml");
    let template = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("walker-template.toml");
    let args = MergeCli::try_parse_from([
        "merge-walker-config",
        "--user-config",
        user.to_str().unwrap(),
        "--template",
        template.to_str().unwrap(),
    ])
    .unwrap();

    let mut lines = Vec::new();
    let outcome = run_merge(&args, &BookmarksConfig::default(), |line| lines.push(line)).unwrap();

    assert!(outcome.written);
    assert!(lines[0].contains(MERGE_BANNER));
    assert!(lines.iter().any(|l| l.contains("No existing Walker config found")));
    assert!(lines.last().unwrap().contains(MERGE_DONE));
}

#[test]
fn test_run_merge_missing_template() {
    let dir = TempDir::new().unwrap();
    let args = MergeCli::try_parse_from([
        "merge-walker-config",
        "--user-config",
        dir.path().join("config.toml").to_str().unwrap(),
        "--template",
        dir.path().join("absent.toml").to_str().unwrap(),
    ])
    .unwrap();

    let err = run_merge(&args, &BookmarksConfig::default(), |_| {}).unwrap_err();
    assert!(map_error(&err).contains("Template TOML not found at:"));
    assert!(!dir.path().join("config.toml").exists());
}
