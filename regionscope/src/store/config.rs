use std::path::{
    Path,
    PathBuf,
};
use std::time::Duration;

use crate::with_field_fn;

/// Environment variable holding the database path.
pub const STORE_PATH_ENV: &str = "REGIONSCOPE_DB";
pub const DEFAULT_STORE_PATH: &str = "inspection_db.sqlite";

/// Location and connection settings of an [`SqliteStore`](super::SqliteStore).
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    path:              PathBuf,
    create_if_missing: bool,
    busy_timeout:      Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path:              PathBuf::from(DEFAULT_STORE_PATH),
            create_if_missing: true,
            busy_timeout:      Duration::from_secs(5),
        }
    }
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::default().with_path(path.into())
    }

    with_field_fn!(path, PathBuf);
    with_field_fn!(create_if_missing, bool);
    with_field_fn!(busy_timeout, Duration);

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn create_if_missing(&self) -> bool {
        self.create_if_missing
    }

    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }
}
