use std::collections::BTreeSet;

use crate::data_structs::coords::{
    BoundingBox,
    Point,
};
use crate::data_structs::typedef::{
    CategoryNum,
    GroupId,
};
use crate::data_structs::Region;
use crate::{
    getter_fn,
    with_field_fn,
};

/// Predicate of a base scan: the bounding box plus the optional category and
/// group membership restrictions.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFilter {
    bbox:     BoundingBox,
    category: Option<CategoryNum>,
    groups:   Option<BTreeSet<GroupId>>,
}

impl RegionFilter {
    /// Creates a filter that only restricts by `bbox`.
    pub fn new(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            category: None,
            groups: None,
        }
    }

    with_field_fn!(category, Option<CategoryNum>);
    with_field_fn!(groups, Option<BTreeSet<GroupId>>);

    getter_fn!(bbox, BoundingBox);

    pub fn category(&self) -> Option<CategoryNum> {
        self.category
    }

    pub fn groups(&self) -> Option<&BTreeSet<GroupId>> {
        self.groups.as_ref()
    }

    pub fn matches(
        &self,
        region: &Region,
    ) -> bool {
        self.bbox.contains(&region.point())
            && self
                .category
                .is_none_or(|category| region.category() == category)
            && self
                .groups
                .as_ref()
                .is_none_or(|groups| groups.contains(&region.group_id()))
    }
}

/// Group membership and location of a stored region, as returned by
/// [`RegionStore::scan_all_regions`](super::RegionStore::scan_all_regions).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMember {
    pub group_id: GroupId,
    pub point:    Point,
}

impl From<&Region> for GroupMember {
    fn from(value: &Region) -> Self {
        Self {
            group_id: value.group_id(),
            point:    value.point(),
        }
    }
}
