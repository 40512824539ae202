//! Error types shared by ingestion, the region store and query evaluation.

use std::path::PathBuf;

use thiserror::Error;

pub type RegionScopeResult<T> = Result<T, RegionScopeError>;

#[derive(Error, Debug)]
pub enum RegionScopeError {
    #[error("missing source file: {}", .path.display())]
    MissingSource { path: PathBuf },

    #[error("invalid format in {} at line {line}: {reason} ({content:?})", .path.display())]
    Format {
        path:    PathBuf,
        line:    usize,
        content: String,
        reason:  String,
    },

    #[error(
        "mismatch in number of lines between files: {points} points, {categories} categories, {groups} groups"
    )]
    LineCountMismatch {
        points:     usize,
        categories: usize,
        groups:     usize,
    },

    #[error("invalid query at `{field}`: {reason}")]
    InvalidQuery { field: String, reason: String },

    #[error("region store at {location} is unavailable: {reason}")]
    StoreUnavailable { location: String, reason: String },

    #[error("failed to write to `{table}`: {reason}")]
    StoreWrite { table: &'static str, reason: String },

    #[error("failed to read from `{table}`: {reason}")]
    StoreRead { table: &'static str, reason: String },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RegionScopeError {
    pub(crate) fn invalid_query(
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidQuery {
            field:  field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn store_read(
        table: &'static str,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::StoreRead {
            table,
            reason: err.to_string(),
        }
    }

    pub(crate) fn store_write(
        table: &'static str,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::StoreWrite {
            table,
            reason: err.to_string(),
        }
    }
}
