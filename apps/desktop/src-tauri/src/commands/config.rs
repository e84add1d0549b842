//! # Config Commands
//!
//! Lets the frontend read the settings the host started with.

use tracing::debug;

use crate::config::AppConfig;

#[cfg(feature = "desktop")]
use tauri::State;

/// Snapshot handed to the frontend. `database_path` is the resolved file,
/// not the raw (possibly empty) setting.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    pub database_path: Option<String>,
    pub default_repository: String,
    pub sample_size: usize,
}

/// Builds the view of `config`.
///
/// ## When Used
/// - App startup (to preselect the repository in the picker)
/// - Settings/about panel (where the data lives)
pub fn config_view(config: &AppConfig) -> ConfigView {
    debug!("get_config command");
    ConfigView {
        database_path: config
            .resolve_database_path()
            .ok()
            .map(|p| p.display().to_string()),
        default_repository: config.default_repository.clone(),
        sample_size: config.sample_size,
    }
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub fn get_config(config: State<'_, AppConfig>) -> ConfigView {
    config_view(config.inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_view() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("/data/fumo.sqlite")),
            default_repository: "Sample Repository".into(),
            sample_size: 12,
        };

        let view = config_view(&config);
        assert_eq!(view.database_path.as_deref(), Some("/data/fumo.sqlite"));
        assert_eq!(view.default_repository, "Sample Repository");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["defaultRepository"], "Sample Repository");
        assert_eq!(json["sampleSize"], 12);
    }
}
