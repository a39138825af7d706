use std::fs;
use std::path::Path;

use crate::error::AppResult;

pub fn ensure_dir(path: &Path) -> AppResult<()> {
  fs::create_dir_all(path)?;
  Ok(())
}

pub fn write_string(path: &Path, content: &str) -> AppResult<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    ensure_dir(parent)?;
  }
  fs::write(path, content)?;
  Ok(())
}
