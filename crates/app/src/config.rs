use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use services::SessionLength;
use storage::repository::{AttemptStore, Storage};
use storage::{LocalFileStore, SqliteRepository};
use tracing::{info, warn};

pub const DEFAULT_DATA_DIR: &str = ".pilot-math";

/// Where attempts are kept, resolved from flags and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Normalized `sqlite://` URL; `None` keeps everything in the data dir.
    pub db_url: Option<String>,
}

impl AppConfig {
    pub fn new(data_dir: PathBuf, db_url: Option<String>) -> Self {
        let db_url = db_url
            .filter(|raw| !raw.trim().is_empty())
            .map(normalize_sqlite_url);
        Self { data_dir, db_url }
    }

    pub fn local_store(&self) -> LocalFileStore {
        LocalFileStore::new(&self.data_dir)
    }

    /// Open and migrate the configured database.
    pub async fn database(&self) -> anyhow::Result<SqliteRepository> {
        let Some(url) = self.db_url.as_deref() else {
            bail!("no database configured; pass --db or set PILOT_MATH_DB_URL");
        };
        prepare_sqlite_file(url)?;
        SqliteRepository::open(url)
            .await
            .with_context(|| format!("opening {url}"))
    }

    /// The database backed by the local file when one is configured, else
    /// the local file alone. An unreachable database is logged and skipped.
    pub async fn storage(&self) -> Storage {
        let local: Arc<dyn AttemptStore> = Arc::new(self.local_store());
        let Some(url) = self.db_url.as_deref() else {
            return local_only(local);
        };
        if let Err(e) = prepare_sqlite_file(url) {
            warn!(error = %e, "database file unavailable, using local file store");
            return local_only(local);
        }
        match Storage::sqlite(url, Some(Arc::clone(&local))).await {
            Ok(storage) => {
                info!("using database with local fallback");
                storage
            }
            Err(e) => {
                warn!(error = %e, "database unavailable, using local file store");
                local_only(local)
            }
        }
    }
}

fn local_only(local: Arc<dyn AttemptStore>) -> Storage {
    Storage {
        attempts: local,
        fallback: None,
    }
}

/// clap value parser for `--minutes`.
pub fn parse_minutes(raw: &str) -> Result<SessionLength, String> {
    let minutes: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("not a number of minutes: {raw}"))?;
    SessionLength::from_minutes(minutes).map_err(|e| e.to_string())
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file and its parent directory if missing.
pub fn prepare_sqlite_file(db_url: &str) -> anyhow::Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid database url: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid database url: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("creating {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("sqlite:data/pilot.db".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/pilot.db"));

        assert_eq!(
            normalize_sqlite_url("sqlite::memory:".into()),
            "sqlite::memory:"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/x.db".into()),
            "sqlite:///tmp/x.db"
        );
    }

    #[test]
    fn blank_database_url_is_ignored() {
        let config = AppConfig::new(DEFAULT_DATA_DIR.into(), Some("  ".into()));
        assert_eq!(config.db_url, None);
    }

    #[test]
    fn minutes_must_be_an_offered_length() {
        assert_eq!(parse_minutes("20").unwrap().minutes(), 20);
        assert!(parse_minutes("7").is_err());
        assert!(parse_minutes("ten").is_err());
    }

    #[test]
    fn prepare_creates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("pilot.db");
        let url = format!("sqlite://{}?mode=rwc", path.display());

        prepare_sqlite_file(&url).unwrap();

        assert!(path.exists());
        assert!(prepare_sqlite_file("sqlite:relative.db").is_err());
    }

    #[tokio::test]
    async fn storage_without_database_uses_local_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig::new(tmp.path().to_path_buf(), None);
        let storage = config.storage().await;

        assert!(storage.fallback.is_none());
        assert!(config.database().await.is_err());
    }
}
