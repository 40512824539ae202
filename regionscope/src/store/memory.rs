use std::collections::BTreeSet;

use hashbrown::HashSet;

use super::{
    GroupMember,
    RegionFilter,
    RegionStore,
    GROUP_TABLE,
    REGION_TABLE,
};
use crate::data_structs::typedef::{
    GroupId,
    RegionId,
};
use crate::data_structs::Region;
use crate::error::{
    RegionScopeError,
    RegionScopeResult,
};

/// Region store kept entirely in memory.
///
/// Enforces the same constraints as [`SqliteStore`](super::SqliteStore):
/// unique region ids and existing group references.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    groups:     BTreeSet<GroupId>,
    regions:    Vec<Region>,
    region_ids: HashSet<RegionId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &BTreeSet<GroupId> {
        &self.groups
    }

    /// Stored regions in insertion order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Checks `regions` against the current contents plus `extra_groups`
    /// without modifying anything.
    fn validate_regions(
        &self,
        regions: &[Region],
        extra_groups: &BTreeSet<GroupId>,
    ) -> RegionScopeResult<()> {
        let mut new_ids = HashSet::with_capacity(regions.len());
        for region in regions {
            if self.region_ids.contains(&region.id()) || !new_ids.insert(region.id()) {
                return Err(RegionScopeError::store_write(
                    REGION_TABLE,
                    format!("region {}: duplicate region id", region.id()),
                ));
            }
            if !self.groups.contains(&region.group_id())
                && !extra_groups.contains(&region.group_id())
            {
                return Err(RegionScopeError::store_write(
                    REGION_TABLE,
                    format!(
                        "region {}: group {} does not exist in {}",
                        region.id(),
                        region.group_id(),
                        GROUP_TABLE
                    ),
                ));
            }
        }
        Ok(())
    }

    fn append_regions(
        &mut self,
        regions: &[Region],
    ) {
        self.region_ids
            .extend(regions.iter().map(Region::id));
        self.regions.extend_from_slice(regions);
    }
}

impl RegionStore for MemoryStore {
    fn insert_groups(
        &mut self,
        ids: &BTreeSet<GroupId>,
    ) -> RegionScopeResult<()> {
        self.groups.extend(ids.iter().copied());
        Ok(())
    }

    fn insert_regions(
        &mut self,
        regions: &[Region],
    ) -> RegionScopeResult<()> {
        self.validate_regions(regions, &BTreeSet::new())?;
        self.append_regions(regions);
        Ok(())
    }

    fn write_batch(
        &mut self,
        groups: &BTreeSet<GroupId>,
        regions: &[Region],
    ) -> RegionScopeResult<()> {
        self.validate_regions(regions, groups)?;
        self.groups.extend(groups.iter().copied());
        self.append_regions(regions);
        Ok(())
    }

    fn scan_regions(
        &self,
        filter: &RegionFilter,
    ) -> RegionScopeResult<Vec<Region>> {
        Ok(self
            .regions
            .iter()
            .filter(|region| filter.matches(region))
            .cloned()
            .collect())
    }

    fn scan_all_regions(&self) -> RegionScopeResult<Vec<GroupMember>> {
        Ok(self.regions.iter().map(GroupMember::from).collect())
    }

    fn count_groups(&self) -> RegionScopeResult<usize> {
        Ok(self.groups.len())
    }

    fn count_regions(&self) -> RegionScopeResult<usize> {
        Ok(self.regions.len())
    }
}
