use std::cmp::Ordering;
use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize,
};

use super::coords::Point;
use super::typedef::{
    CategoryNum,
    CoordNum,
    GroupId,
    RegionId,
};

/// A single inspection point: coordinates, category and the group it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    id:       RegionId,
    group_id: GroupId,
    point:    Point,
    category: CategoryNum,
}

impl Region {
    pub fn new(
        id: RegionId,
        group_id: GroupId,
        point: Point,
        category: CategoryNum,
    ) -> Self {
        Self {
            id,
            group_id,
            point,
            category,
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn coord_x(&self) -> CoordNum {
        self.point.x()
    }

    pub fn coord_y(&self) -> CoordNum {
        self.point.y()
    }

    pub fn category(&self) -> CategoryNum {
        self.category
    }

    /// Crop query output order: `y`, then `x`, then region id so that
    /// coincident points keep a stable order.
    pub fn cmp_output_order(
        &self,
        other: &Self,
    ) -> Ordering {
        self.point
            .cmp_yx(&other.point)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Projection of a [`Region`] emitted by a crop query.
///
/// Displays as `x y category group_id`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub x:        CoordNum,
    pub y:        CoordNum,
    pub category: CategoryNum,
    pub group_id: GroupId,
}

impl From<&Region> for ResultRow {
    fn from(value: &Region) -> Self {
        Self {
            x:        value.coord_x(),
            y:        value.coord_y(),
            category: value.category(),
            group_id: value.group_id(),
        }
    }
}

impl Display for ResultRow {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.category, self.group_id)
    }
}
