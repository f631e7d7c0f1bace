//! File-backed preference store: one `user_id,mode` row per user.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::{PreferenceStore, SubgroupMode};
use crate::core::AppResult;

/// Preferences persisted as a two-column CSV file.
///
/// Writes rewrite the whole file (through a temporary sibling and a rename)
/// while holding the write lock, so readers never observe a partial file.
#[derive(Debug)]
pub struct CsvPreferenceStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl CsvPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Splits a row into `(user_id, mode)`; rows with fewer than two fields
/// yield `None`.
fn parse_row(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.trim_end_matches('\r').splitn(3, ',');
    let user = fields.next()?.trim();
    let mode = fields.next()?.trim();
    Some((user, mode))
}

fn row_user(line: &str) -> Option<&str> {
    line.split(',').next().map(str::trim).filter(|user| !user.is_empty())
}

#[async_trait]
impl PreferenceStore for CsvPreferenceStore {
    async fn get(&self, user_id: i64) -> SubgroupMode {
        let _guard = self.lock.read().await;

        let content = match fs_err::tokio::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return SubgroupMode::Full,
            Err(e) => {
                log::warn!("Failed to read subgroup settings: {}", e);
                return SubgroupMode::Full;
            }
        };

        let user = user_id.to_string();
        content
            .lines()
            .filter_map(parse_row)
            .find(|(id, _)| *id == user)
            .map(|(_, mode)| SubgroupMode::parse_lenient(mode))
            .unwrap_or_default()
    }

    async fn set(&self, user_id: i64, mode: SubgroupMode) -> AppResult<()> {
        let _guard = self.lock.write().await;

        let content = match fs_err::tokio::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        let user = user_id.to_string();
        let row = format!("{},{}", user, mode.as_str());
        let mut rows: Vec<String> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        match rows.iter_mut().find(|line| row_user(line) == Some(user.as_str())) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        }

        let mut output = rows.join("\n");
        output.push('\n');

        let temp = self.temp_path();
        fs_err::tokio::write(&temp, output).await?;
        fs_err::tokio::rename(&temp, &self.path).await?;

        log::debug!("Stored subgroup mode {} for user {}", mode, user_id);
        Ok(())
    }
}
