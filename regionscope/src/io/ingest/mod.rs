//! Ingestion of inspection data.
//!
//! An inspection data set is spread over three text files that are aligned by
//! line position:
//!
//! - `points.txt`: one `x y` coordinate pair per line,
//! - `categories.txt`: one numeric category per line; fractional values are
//!   truncated toward zero,
//! - `groups.txt`: one integer group id per line.
//!
//! [`Ingestor::read_records`] validates the three files and zips them into
//! [`IngestRecord`]s. Once this step has succeeded no code depends on line
//! positions any more: the record of line `k` becomes the [`Region`] with id
//! `k`, and the distinct group ids form the group set. [`Ingestor::run`] writes
//! everything to a [`RegionStore`] as one batch, groups first.

mod sources;

use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;
use log::{
    debug,
    info,
};
pub use sources::{
    IngestSources,
    CATEGORIES_FILE,
    GROUPS_FILE,
    POINTS_FILE,
};
use sources::SourceLines;

use crate::data_structs::coords::Point;
use crate::data_structs::typedef::{
    CategoryNum,
    GroupId,
    RegionId,
};
use crate::data_structs::Region;
use crate::error::{
    RegionScopeError,
    RegionScopeResult,
};
use crate::store::RegionStore;

/// One validated line of the inspection input.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestRecord {
    /// 1-based line number, shared by all three sources.
    pub line:     usize,
    pub point:    Point,
    pub category: CategoryNum,
    pub group_id: GroupId,
}

impl IngestRecord {
    pub fn region_id(&self) -> RegionId {
        self.line as RegionId
    }

    pub fn to_region(&self) -> Region {
        Region::new(self.region_id(), self.group_id, self.point, self.category)
    }
}

/// Groups and regions derived from a set of records, ready to be written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngestBatch {
    pub groups:  BTreeSet<GroupId>,
    pub regions: Vec<Region>,
}

impl FromIterator<IngestRecord> for IngestBatch {
    fn from_iter<T: IntoIterator<Item = IngestRecord>>(iter: T) -> Self {
        let regions = iter
            .into_iter()
            .map(|record| record.to_region())
            .collect_vec();
        let groups = regions.iter().map(Region::group_id).collect();
        Self { groups, regions }
    }
}

/// Outcome of a successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub regions: usize,
    pub groups:  usize,
}

impl Display for IngestSummary {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{} regions in {} groups", self.regions, self.groups)
    }
}

pub struct Ingestor {
    sources: IngestSources,
}

impl Ingestor {
    pub fn new(sources: IngestSources) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &IngestSources {
        &self.sources
    }

    /// Reads and validates the three sources.
    ///
    /// Existence of all sources is checked before anything is read, and the
    /// line counts are compared before any line is parsed.
    pub fn read_records(&self) -> RegionScopeResult<Vec<IngestRecord>> {
        self.sources.check_exist()?;

        let points = SourceLines::read(self.sources.points())?;
        let categories = SourceLines::read(self.sources.categories())?;
        let groups = SourceLines::read(self.sources.groups())?;
        debug!(
            "Read {} / {} / {} lines",
            points.len(),
            categories.len(),
            groups.len()
        );

        if points.len() != categories.len() || points.len() != groups.len() {
            return Err(RegionScopeError::LineCountMismatch {
                points:     points.len(),
                categories: categories.len(),
                groups:     groups.len(),
            });
        }

        (0..points.len())
            .map(|idx| -> RegionScopeResult<IngestRecord> {
                Ok(IngestRecord {
                    line:     idx + 1,
                    point:    parse_point(&points, idx)?,
                    category: parse_category(&categories, idx)?,
                    group_id: parse_group(&groups, idx)?,
                })
            })
            .collect()
    }

    /// Reads the sources and derives the groups and regions to insert.
    pub fn load(&self) -> RegionScopeResult<IngestBatch> {
        Ok(self.read_records()?.into_iter().collect())
    }

    /// Loads the sources and writes them to `store`.
    ///
    /// Nothing is written unless every line of every source is valid.
    pub fn run<S: RegionStore>(
        &self,
        store: &mut S,
    ) -> RegionScopeResult<IngestSummary> {
        info!("Loading data from {}", self.sources.points().display());
        let batch = self.load()?;
        info!(
            "Parsed {} regions in {} groups",
            batch.regions.len(),
            batch.groups.len()
        );

        store.write_batch(&batch.groups, &batch.regions)?;
        Ok(IngestSummary {
            regions: batch.regions.len(),
            groups:  batch.groups.len(),
        })
    }
}

fn parse_point(
    source: &SourceLines,
    idx: usize,
) -> RegionScopeResult<Point> {
    let point = source.lines[idx]
        .parse::<Point>()
        .map_err(|e| source.format_error(idx, e.to_string()))?;
    if !point.is_finite() {
        return Err(source.format_error(idx, "coordinates must be finite"));
    }
    Ok(point)
}

/// Categories are read as real numbers and truncated toward zero.
fn parse_category(
    source: &SourceLines,
    idx: usize,
) -> RegionScopeResult<CategoryNum> {
    let value = source.lines[idx]
        .trim()
        .parse::<f64>()
        .map_err(|_| source.format_error(idx, "category is not a number"))?;
    let truncated = value.trunc();
    if !truncated.is_finite()
        || truncated < CategoryNum::MIN as f64
        || truncated > CategoryNum::MAX as f64
    {
        return Err(source.format_error(idx, "category is out of range"));
    }
    Ok(truncated as CategoryNum)
}

fn parse_group(
    source: &SourceLines,
    idx: usize,
) -> RegionScopeResult<GroupId> {
    source.lines[idx]
        .trim()
        .parse::<GroupId>()
        .map_err(|_| source.format_error(idx, "group id is not an integer"))
}

#[cfg(test)]
mod tests;
