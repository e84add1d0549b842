//! # Fumo Desktop Library
//!
//! Command host for the Fumo repository UI.
//!
//! ## Module Organization
//! ```text
//! fumo_desktop_lib/
//! ├── lib.rs          ◄─── You are here (startup, registry wiring)
//! ├── config.rs       ◄─── fumo.toml + FUMO_* overrides
//! ├── channel.rs      ◄─── LocalChannel: commands without a webview
//! ├── state/
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   └── registry.rs ◄─── Named repositories + selection
//! ├── commands/
//! │   ├── fumo.rs     ◄─── fumo_load / fumo_add / ...
//! │   ├── registry.rs ◄─── repository_* by display name
//! │   └── config.rs   ◄─── get_config
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! Everything except [`run`] builds without the `desktop` feature, so the
//! command handlers and the registry can be exercised headless.

pub mod channel;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use fumo_core::{
    DiagnosticSink, RemoteRepository, RepositoryRegistry, SampleRepository, FUMO_REPOSITORY_NAME,
    SAMPLE_REPOSITORY_NAME,
};
use fumo_db::Database;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use channel::LocalChannel;

/// Builds the registry offered to the UI.
///
/// ```text
/// "Fumo Repository"   ─► RemoteRepository<LocalChannel> ─► SQLite
/// "Sample Repository" ─► SampleRepository (sample_size rows, in memory)
/// ```
pub fn repositories(
    db: Database,
    sample_size: usize,
    sink: Arc<dyn DiagnosticSink>,
) -> RepositoryRegistry {
    RepositoryRegistry::new()
        .with(
            FUMO_REPOSITORY_NAME,
            Arc::new(RemoteRepository::with_sink(LocalChannel::new(db), sink)),
        )
        .with(
            SAMPLE_REPOSITORY_NAME,
            Arc::new(SampleRepository::seeded(sample_size)),
        )
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=fumo=trace` - Show trace for fumo crates only
/// - Default: `info,fumo=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fumo=debug,sqlx=warn"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Runs the Tauri application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │  2. Load AppConfig (defaults ◄ fumo.toml ◄ FUMO_*) ──────────────────► │
/// │  3. Open SQLite (WAL, migrations) ────────────────────────────────────► │
/// │  4. Build registry: Fumo Repository + Sample Repository ─────────────► │
/// │  5. Manage DbState / RegistryState / AppConfig, register commands ───► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[cfg(feature = "desktop")]
pub fn run() {
    use fumo_core::TracingSink;
    use fumo_db::DbConfig;
    use state::{DbState, RegistryState};
    use tauri::Manager;
    use tracing::info;

    init_tracing();

    info!("Starting Fumo Repository");

    let app_config = config::AppConfig::load_or_default(None);

    tauri::Builder::default()
        .setup(move |app| {
            let db_path = app_config.resolve_database_path()?;
            info!(?db_path, "Database path determined");

            let db = tauri::async_runtime::block_on(Database::new(DbConfig::new(db_path)))?;

            info!("Database connected and migrations applied");

            let registry = repositories(db.clone(), app_config.sample_size, Arc::new(TracingSink));
            let registry_state = RegistryState::new(registry, app_config.default_repository.clone());

            app.manage(DbState::new(db));
            app.manage(registry_state);
            app.manage(app_config.clone());

            info!("State initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::fumo::fumo_load,
            commands::fumo::fumo_get_by_uid,
            commands::fumo::fumo_get_by_sku,
            commands::fumo::fumo_add,
            commands::fumo::fumo_remove,
            commands::registry::repository_list,
            commands::registry::repository_load,
            commands::registry::repository_get_by_uid,
            commands::registry::repository_get_by_sku,
            commands::registry::repository_add,
            commands::registry::repository_remove,
            commands::registry::repository_format_metadata,
            commands::config::get_config,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
