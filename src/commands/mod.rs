use rusqlite::Connection;
use std::path::Path;
use tera::Tera;

use crate::config::{load_settings, Settings};
use crate::error::AppResult;
use crate::render::templates::load_templates;
use crate::store;

pub mod salary;
pub mod survey;

/// Everything an operation needs, passed explicitly.
pub struct AppContext {
    pub conn: Connection,
    pub settings: Settings,
    pub tera: Tera,
}

impl AppContext {
    pub fn open(settings_path: &Path) -> AppResult<Self> {
        let settings = load_settings(settings_path)?;
        let conn = store::open(&settings.database_path())?;
        log::debug!(
            "opened store at {} using {}",
            settings.database_path,
            settings_path.display()
        );
        Self::with_connection(conn, settings)
    }

    pub fn with_connection(conn: Connection, settings: Settings) -> AppResult<Self> {
        Ok(Self {
            conn,
            settings,
            tera: load_templates()?,
        })
    }

    #[cfg(test)]
    pub(crate) fn in_memory() -> Self {
        let conn = store::open_in_memory().expect("in-memory store");
        Self::with_connection(conn, Settings::default()).expect("context")
    }
}
