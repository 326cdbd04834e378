//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use pamrel_server::{create_app, AppState, Config, Database, DEFAULT_PORT};
use std::path::Path;
use tempfile::TempDir;

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: DEFAULT_PORT,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_paste_size: 10_000_000,
        default_theme: "default".to_string(),
        base_url: None,
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let db = Database::new(config.db_path.as_str()).expect("open db");
    let state = AppState::new(config, db);
    let app = create_app(state, false);
    TestServer::new(app).expect("server")
}

pub(crate) fn setup_test_server_with(configure: impl FnOnce(&mut Config)) -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let mut config = test_config_for_db_path(&db_path);
    configure(&mut config);
    (test_server_for_config(config), temp_dir)
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    setup_test_server_with(|_| {})
}
