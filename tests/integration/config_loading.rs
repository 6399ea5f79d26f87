//! Layered config loading and XDG path resolution

use crate::integration::test_utils::with_xdg_env;
use bookmarks::config::{xdg, ConfigLoader};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_defaults_resolve_under_xdg_homes() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load().unwrap();
        assert_eq!(
            config.storage.resolve_database_path().unwrap(),
            test_dir.path().join("data/walker-bookmarks/bookmarks.db")
        );
        assert_eq!(
            config.storage.resolve_favicon_dir().unwrap(),
            test_dir.path().join("data/walker-bookmarks/favicons")
        );
        assert_eq!(
            config.walker.resolve_user_config_path().unwrap(),
            test_dir.path().join("config/walker/config.toml")
        );
        assert_eq!(config.favicon.connect_timeout_secs, 5);
        assert_eq!(config.logging.level, "info");
    });
}

#[test]
fn test_global_file_is_layered_over_defaults() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = xdg::global_config_path().unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"
[storage]
database_path = "/srv/marks.db"

[desktop]
notify_command = "dunstify"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.storage.database_path, Some(PathBuf::from("/srv/marks.db")));
        assert_eq!(config.desktop.notify_command, "dunstify");
        assert_eq!(config.desktop.clipboard_command, "wl-paste");
        assert_eq!(ConfigLoader::global_config_path(), Some(path));
    });
}

#[test]
fn test_environment_overrides_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = xdg::global_config_path().unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[favicon]\nrequest_timeout_secs = 20\n").unwrap();

        std::env::set_var("WALKER_BOOKMARKS__FAVICON__REQUEST_TIMEOUT_SECS", "30");
        let config = ConfigLoader::load();
        std::env::remove_var("WALKER_BOOKMARKS__FAVICON__REQUEST_TIMEOUT_SECS");

        assert_eq!(config.unwrap().favicon.request_timeout_secs, 30);
    });
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let test_dir = TempDir::new().unwrap();
    let missing = test_dir.path().join("nope.toml");
    assert!(ConfigLoader::load_from_file(&missing).is_err());
    assert!(ConfigLoader::load_optional(Some(missing.as_path())).is_err());
}

#[test]
fn test_template_follows_install_root_override() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        std::env::set_var("WALKER_BOOKMARKS_HOME", test_dir.path());
        let template = xdg::bundled_template_path();
        assert_eq!(template, test_dir.path().join("config/walker-template.toml"));
    });
}
