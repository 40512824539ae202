use std::fmt::Display;

use serde::Serialize;

use super::Point;
use crate::data_structs::typedef::CoordNum;
use crate::error::{
    RegionScopeError,
    RegionScopeResult,
};

/// Closed, axis-aligned rectangle spanned by `p_min` and `p_max`.
///
/// Bounds are never reordered: a box whose minimum exceeds its maximum on
/// either axis is rejected on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    p_min: Point,
    p_max: Point,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` from its two corners.
    pub fn try_new(
        p_min: Point,
        p_max: Point,
    ) -> RegionScopeResult<Self> {
        if !p_min.is_finite() || !p_max.is_finite() {
            return Err(RegionScopeError::invalid_query(
                "region",
                format!("bounds must be finite, got [{}] - [{}]", p_min, p_max),
            ));
        }
        if p_min.x() > p_max.x() {
            return Err(RegionScopeError::invalid_query(
                "region.p_min.x",
                format!("xmin {} is greater than xmax {}", p_min.x(), p_max.x()),
            ));
        }
        if p_min.y() > p_max.y() {
            return Err(RegionScopeError::invalid_query(
                "region.p_min.y",
                format!("ymin {} is greater than ymax {}", p_min.y(), p_max.y()),
            ));
        }
        Ok(Self { p_min, p_max })
    }

    /// Creates a new `BoundingBox` from `xmin, ymin, xmax, ymax`.
    pub fn from_bounds(
        xmin: CoordNum,
        ymin: CoordNum,
        xmax: CoordNum,
        ymax: CoordNum,
    ) -> RegionScopeResult<Self> {
        Self::try_new(Point::new(xmin, ymin), Point::new(xmax, ymax))
    }

    pub fn p_min(&self) -> Point {
        self.p_min
    }

    pub fn p_max(&self) -> Point {
        self.p_max
    }

    pub fn xmin(&self) -> CoordNum {
        self.p_min.x()
    }

    pub fn ymin(&self) -> CoordNum {
        self.p_min.y()
    }

    pub fn xmax(&self) -> CoordNum {
        self.p_max.x()
    }

    pub fn ymax(&self) -> CoordNum {
        self.p_max.y()
    }

    /// Checks whether `point` lies inside the box. Boundaries are inclusive on
    /// all four sides.
    pub fn contains(
        &self,
        point: &Point,
    ) -> bool {
        point.x() >= self.xmin()
            && point.x() <= self.xmax()
            && point.y() >= self.ymin()
            && point.y() <= self.ymax()
    }
}

impl Display for BoundingBox {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.xmin(),
            self.xmax(),
            self.ymin(),
            self.ymax()
        )
    }
}
