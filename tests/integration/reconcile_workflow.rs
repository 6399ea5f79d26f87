//! Walker config merge against real files

use bookmarks::error::ReconcileError;
use bookmarks::walker::{
    ReconcileEvent, ReconcileOptions, ReconcilePaths, WalkerConfigMerger,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use toml::Value;

fn bundled_template() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("walker-template.toml")
}

fn merger(user: PathBuf, template: PathBuf) -> WalkerConfigMerger {
    WalkerConfigMerger::new(ReconcilePaths::new(user, template), ReconcileOptions::default())
}

fn read_toml(path: &std::path::Path) -> toml::Table {
    fs::read_to_string(path).unwrap().parse().unwrap()
}

#[test]
fn test_missing_template_leaves_user_file_untouched() {
    let temp = TempDir::new().unwrap();
    let user = temp.path().join("config.toml");
    fs::write(&user, "theme = \"dark\"\n").unwrap();

    let mut events = Vec::new();
    let result = merger(user.clone(), temp.path().join("missing-template.toml"))
        .run_at(42, |e| events.push(e.clone()));

    assert!(matches!(result, Err(ReconcileError::TemplateMissing(_))));
    assert_eq!(fs::read_to_string(&user).unwrap(), "theme = \"dark\"\n");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1, "no backup expected");
    assert!(!events
        .iter()
        .any(|e| matches!(e, ReconcileEvent::BackedUp { .. } | ReconcileEvent::Written { .. })));
}

#[test]
fn test_missing_template_does_not_create_user_directory() {
    let temp = TempDir::new().unwrap();
    let user = temp.path().join("walker").join("config.toml");

    let result = merger(user.clone(), temp.path().join("nope.toml")).run_at(1, |_| {});

    assert!(result.is_err());
    assert!(!user.parent().unwrap().exists());
}

#[test]
fn test_backup_holds_previous_bytes() {
    let temp = TempDir::new().unwrap();
    let user = temp.path().join("config.toml");
    let original = "# my walker config\ntheme = \"dark\"\n";
    fs::write(&user, original).unwrap();

    let outcome = merger(user.clone(), bundled_template())
        .run_at(1700000000123, |_| {})
        .unwrap();

    let backup = temp.path().join("config.toml.backup.1700000000123");
    assert_eq!(outcome.backup_path.as_deref(), Some(backup.as_path()));
    assert_eq!(fs::read_to_string(&backup).unwrap(), original);
    assert!(outcome.written);
    assert_eq!(fs::read_to_string(&user).unwrap(), outcome.rendered);
}

#[test]
fn test_merge_with_bundled_template() {
    let temp = TempDir::new().unwrap();
    let user = temp.path().join("config.toml");
    fs::write(
        &user,
        r#"
theme = "dark"

[providers]
default = ["runner", "files"]

[[providers.prefixes]]
prefix = "@"
provider = "menus:bookmarks"
"#,
    )
    .unwrap();

    merger(user.clone(), bundled_template()).run_at(5, |_| {}).unwrap();
    let merged = read_toml(&user);

    assert_eq!(merged["theme"].as_str(), Some("dark"));
    assert_eq!(merged["close_when_open"].as_bool(), Some(true));

    let providers = merged["providers"].as_table().unwrap();
    let defaults: Vec<&str> = providers["default"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(
        defaults,
        vec!["runner", "files", "desktopapplications", "calc", "menus:bookmarks"]
    );

    let prefixes = providers["prefixes"].as_array().unwrap();
    assert_eq!(prefixes.len(), 2);
    assert_eq!(prefixes[1]["prefix"].as_str(), Some("="));

    let actions = providers["actions"]["menus:bookmarks"].as_array().unwrap();
    let names: Vec<&str> = actions.iter().filter_map(|a| a["action"].as_str()).collect();
    assert_eq!(names, vec!["open", "copy", "add", "delete"]);
}

#[test]
fn test_rerun_changes_nothing() {
    let temp = TempDir::new().unwrap();
    let user = temp.path().join("config.toml");
    fs::write(&user, "theme = \"dark\"\n").unwrap();

    let first = merger(user.clone(), bundled_template()).run_at(1, |_| {}).unwrap();
    let second = merger(user.clone(), bundled_template()).run_at(2, |_| {}).unwrap();

    assert_eq!(first.merged, second.merged);
    assert_eq!(
        fs::read_to_string(temp.path().join("config.toml.backup.2")).unwrap(),
        first.rendered
    );
}

#[test]
fn test_unparseable_user_file_is_treated_as_empty() {
    let temp = TempDir::new().unwrap();
    let user = temp.path().join("config.toml");
    fs::write(&user, "this is [not toml").unwrap();

    let outcome = merger(user.clone(), bundled_template()).run_at(9, |_| {}).unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("config.toml.backup.9")).unwrap(),
        "this is [not toml"
    );
    let template = read_toml(&bundled_template());
    assert_eq!(outcome.merged["theme"], template["theme"]);
    assert_eq!(
        outcome.merged["providers"]["prefixes"],
        template["providers"]["prefixes"]
    );
}

#[test]
fn test_creates_missing_user_directory() {
    let temp = TempDir::new().unwrap();
    let user = temp.path().join("walker").join("config.toml");

    let mut events = Vec::new();
    let outcome = merger(user.clone(), bundled_template())
        .run_at(3, |e| events.push(e.clone()))
        .unwrap();

    assert!(user.exists());
    assert!(outcome.backup_path.is_none());
    assert!(events.contains(&ReconcileEvent::NoExistingConfig));
    assert_eq!(events.last(), Some(&ReconcileEvent::Completed));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let user = temp.path().join("config.toml");
    fs::write(&user, "theme = \"dark\"\n").unwrap();

    let outcome = WalkerConfigMerger::new(
        ReconcilePaths::new(user.clone(), bundled_template()),
        ReconcileOptions { dry_run: true },
    )
    .run_at(4, |_| {})
    .unwrap();

    assert!(!outcome.written);
    assert!(outcome.rendered.contains("menus:bookmarks"));
    assert_eq!(fs::read_to_string(&user).unwrap(), "theme = \"dark\"\n");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn test_written_config_rereads_to_the_same_merge() {
    let temp = TempDir::new().unwrap();
    let user = temp.path().join("config.toml");
    let template = temp.path().join("template.toml");
    fs::write(
        &user,
        r#"
[providers]
prefixes = ["broken", { prefix = "@", provider = "menus:bookmarks" }]

[providers.actions]
"menus:bookmarks" = "not a list"
"#,
    )
    .unwrap();
    fs::write(
        &template,
        r#"
theme = "light"

[providers.actions]
"menus:bookmarks" = [{ action = "open" }]
"files" = [{ action = "open" }]

[[providers.prefixes]]
prefix = "/"
provider = "files"

[extra]
enabled = true
"#,
    )
    .unwrap();

    let first = merger(user.clone(), template.clone()).run_at(1, |_| {}).unwrap();
    let reread = read_toml(&user);
    assert_eq!(reread, first.merged);

    let second = merger(user.clone(), template).run_at(2, |_| {}).unwrap();
    assert_eq!(second.merged, first.merged);
    let files = first.merged["providers"]["actions"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["action"].as_str(), Some("open"));
    assert_eq!(
        first.merged["providers"]["actions"]["menus:bookmarks"][0]["action"].as_str(),
        Some("open")
    );
    assert_eq!(first.merged["theme"].as_str(), Some("light"));
    assert_eq!(first.merged["providers"]["prefixes"].as_array().unwrap().len(), 3);
}
