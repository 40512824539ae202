use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
};
use std::path::{
    Path,
    PathBuf,
};

use crate::error::{
    RegionScopeError,
    RegionScopeResult,
};
use crate::utils::ensure_source_exists;
use crate::with_field_fn;

pub const POINTS_FILE: &str = "points.txt";
pub const CATEGORIES_FILE: &str = "categories.txt";
pub const GROUPS_FILE: &str = "groups.txt";

/// Paths of the three line-aligned ingestion inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSources {
    points:     PathBuf,
    categories: PathBuf,
    groups:     PathBuf,
}

impl IngestSources {
    pub fn new(
        points: impl Into<PathBuf>,
        categories: impl Into<PathBuf>,
        groups: impl Into<PathBuf>,
    ) -> Self {
        Self {
            points:     points.into(),
            categories: categories.into(),
            groups:     groups.into(),
        }
    }

    /// Uses `points.txt`, `categories.txt` and `groups.txt` inside `dir`.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(POINTS_FILE),
            dir.join(CATEGORIES_FILE),
            dir.join(GROUPS_FILE),
        )
    }

    with_field_fn!(points, PathBuf);
    with_field_fn!(categories, PathBuf);
    with_field_fn!(groups, PathBuf);

    pub fn points(&self) -> &Path {
        &self.points
    }

    pub fn categories(&self) -> &Path {
        &self.categories
    }

    pub fn groups(&self) -> &Path {
        &self.groups
    }

    /// Fails on the first source that does not exist, checking points,
    /// categories and groups in that order.
    pub fn check_exist(&self) -> RegionScopeResult<()> {
        ensure_source_exists(&self.points)?;
        ensure_source_exists(&self.categories)?;
        ensure_source_exists(&self.groups)
    }
}

/// All lines of one source file, kept together with its path for error
/// reporting.
#[derive(Debug, Clone)]
pub(crate) struct SourceLines {
    pub(crate) path:  PathBuf,
    pub(crate) lines: Vec<String>,
}

impl SourceLines {
    pub(crate) fn read(path: &Path) -> RegionScopeResult<Self> {
        let file = File::open(path).map_err(|e| RegionScopeError::io(path, e))?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RegionScopeError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    /// Builds a [`RegionScopeError::Format`] for the 0-based line `idx`.
    pub(crate) fn format_error(
        &self,
        idx: usize,
        reason: impl Into<String>,
    ) -> RegionScopeError {
        RegionScopeError::Format {
            path:    self.path.clone(),
            line:    idx + 1,
            content: self.lines[idx].clone(),
            reason:  reason.into(),
        }
    }
}
