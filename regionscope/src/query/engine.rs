use hashbrown::{
    HashMap,
    HashSet,
};
use itertools::Itertools;
use log::{
    debug,
    info,
};

use super::QueryDescriptor;
use crate::data_structs::coords::BoundingBox;
use crate::data_structs::typedef::GroupId;
use crate::data_structs::{
    Region,
    ResultRow,
};
use crate::error::RegionScopeResult;
use crate::store::{
    GroupMember,
    RegionStore,
};

/// Evaluates crop queries against a [`RegionStore`].
///
/// The engine only reads from the store. Every call to
/// [`evaluate`](QueryEngine::evaluate) recomputes its result from the
/// persisted data.
pub struct QueryEngine<'a, S: RegionStore> {
    store: &'a S,
}

impl<'a, S: RegionStore> QueryEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Runs the query and returns the matching rows.
    ///
    /// Rows are ordered by `y`, then `x` (then region id for coincident
    /// points). With `proper` set, rows of groups that have any member outside
    /// the query box are dropped, where *any member* means every region of
    /// the group in the store, regardless of the category and group filters.
    pub fn evaluate(
        &self,
        descriptor: &QueryDescriptor,
    ) -> RegionScopeResult<Vec<ResultRow>> {
        Ok(self
            .evaluate_regions(descriptor)?
            .iter()
            .map(ResultRow::from)
            .collect())
    }

    /// Same as [`evaluate`](QueryEngine::evaluate), but returns the full
    /// region records.
    pub fn evaluate_regions(
        &self,
        descriptor: &QueryDescriptor,
    ) -> RegionScopeResult<Vec<Region>> {
        info!("Evaluating crop query: {}", descriptor);

        let regions = self.store.with_snapshot(|store| {
            let mut regions = store.scan_regions(&descriptor.filter())?;
            regions.sort_by(Region::cmp_output_order);
            debug!("Base scan matched {} regions", regions.len());

            if descriptor.proper() && !regions.is_empty() {
                let members = store.scan_all_regions()?;
                let rejected = retain_proper(&mut regions, descriptor.region(), &members);
                debug!(
                    "Proper containment rejected {} groups, {} regions left",
                    rejected.len(),
                    regions.len()
                );
            }
            Ok(regions)
        })?;

        info!("Query matched {} regions", regions.len());
        Ok(regions)
    }
}

/// Drops every region whose group has a member outside `bbox`.
///
/// `members` must list all regions of the store, not only the ones matched
/// by the base scan. Order of the retained regions is preserved. Returns the
/// ids of the rejected groups.
pub(crate) fn retain_proper(
    regions: &mut Vec<Region>,
    bbox: &BoundingBox,
    members: &[GroupMember],
) -> Vec<GroupId> {
    let mut validity: HashMap<GroupId, bool> = regions
        .iter()
        .map(|region| (region.group_id(), true))
        .collect();

    for member in members {
        if let Some(valid) = validity.get_mut(&member.group_id) {
            if *valid && !bbox.contains(&member.point) {
                *valid = false;
            }
        }
    }

    let rejected: HashSet<GroupId> = validity
        .into_iter()
        .filter_map(|(group_id, valid)| (!valid).then_some(group_id))
        .collect();
    regions.retain(|region| !rejected.contains(&region.group_id()));
    rejected.into_iter().sorted().collect()
}
