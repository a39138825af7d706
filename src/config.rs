use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

pub const DEFAULT_SETTINGS_PATH: &str = "data/settings.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub database_path: String,
    pub submission_throttle_secs: u64,
    /// IQD per USD.
    pub exchange_rate: u64,
    pub min_search_results: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: "data/salary-survey.sqlite3".to_string(),
            submission_throttle_secs: 5,
            exchange_rate: 1450,
            min_search_results: 3,
        }
    }
}

impl Settings {
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
    }
}

pub fn load_settings(path: &Path) -> AppResult<Settings> {
    if !path.exists() {
        let defaults = Settings::default();
        save_settings(path, &defaults)?;
        return Ok(defaults);
    }
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        let defaults = Settings::default();
        save_settings(path, &defaults)?;
        return Ok(defaults);
    }
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_settings(path: &Path, settings: &Settings) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(path, payload)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_settings, save_settings, Settings};
    use uuid::Uuid;

    #[test]
    fn missing_file_gets_defaults_written() {
        let tmp = std::env::temp_dir().join(format!("settings-test-{}", Uuid::new_v4()));
        let path = tmp.join("settings.json");
        let loaded = load_settings(&path).expect("defaults");
        assert_eq!(loaded, Settings::default());
        assert!(path.exists());

        let mut custom = loaded.clone();
        custom.exchange_rate = 1310;
        save_settings(&path, &custom).expect("save");
        assert_eq!(load_settings(&path).expect("reload").exchange_rate, 1310);
        let _ = std::fs::remove_dir_all(tmp);
    }
}
