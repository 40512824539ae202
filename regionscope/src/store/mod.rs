//! Persistent storage of groups and regions.
//!
//! [`RegionStore`] is the contract the ingestion pipeline and the query engine
//! are written against. Two implementations are provided:
//!
//! - [`SqliteStore`]: the durable store, an SQLite database holding the
//!   `inspection_group` and `inspection_region` tables.
//! - [`MemoryStore`]: a plain in-memory store with the same semantics, used
//!   as a deterministic double in tests and for small throwaway data sets.
//!
//! Store handles are passed explicitly. A handle owns its connection, which
//! is released when the handle is dropped.

mod config;
mod filter;
mod memory;
mod sqlite;

use std::collections::BTreeSet;

pub use config::{
    StoreConfig,
    DEFAULT_STORE_PATH,
    STORE_PATH_ENV,
};
pub use filter::{
    GroupMember,
    RegionFilter,
};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::data_structs::typedef::GroupId;
use crate::data_structs::Region;
use crate::error::RegionScopeResult;

pub(crate) const GROUP_TABLE: &str = "inspection_group";
pub(crate) const REGION_TABLE: &str = "inspection_region";

pub trait RegionStore {
    /// Inserts groups by id. Ids that are already present are skipped.
    fn insert_groups(
        &mut self,
        ids: &BTreeSet<GroupId>,
    ) -> RegionScopeResult<()>;

    /// Appends regions. Every region must reference a group that is already
    /// present and must not reuse an existing region id. A failing call
    /// inserts nothing.
    fn insert_regions(
        &mut self,
        regions: &[Region],
    ) -> RegionScopeResult<()>;

    /// Inserts `groups` and then `regions` as a single unit.
    fn write_batch(
        &mut self,
        groups: &BTreeSet<GroupId>,
        regions: &[Region],
    ) -> RegionScopeResult<()> {
        self.insert_groups(groups)?;
        self.insert_regions(regions)
    }

    /// Returns all regions matched by `filter`, in no particular order.
    fn scan_regions(
        &self,
        filter: &RegionFilter,
    ) -> RegionScopeResult<Vec<Region>>;

    /// Returns the group and location of every region in the store.
    fn scan_all_regions(&self) -> RegionScopeResult<Vec<GroupMember>>;

    /// Runs `f` against a consistent view of the store: every scan issued by
    /// `f` observes the same data.
    fn with_snapshot<T, F>(
        &self,
        f: F,
    ) -> RegionScopeResult<T>
    where
        Self: Sized,
        F: FnOnce(&Self) -> RegionScopeResult<T>, {
        f(self)
    }

    fn count_groups(&self) -> RegionScopeResult<usize>;

    fn count_regions(&self) -> RegionScopeResult<usize>;
}
