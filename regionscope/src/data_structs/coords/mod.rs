//! This module defines data structures for planar coordinates.
//!
//! It provides two main structures:
//!
//! - [`Point`]: a single location, specified by its `x` and `y` coordinates.
//! - [`BoundingBox`]: a closed, axis-aligned rectangle defined by a minimum
//!   and a maximum corner.
//!
//! Crop queries are evaluated in terms of these two types.

mod bbox;
mod point;

pub use bbox::BoundingBox;
pub use point::{
    ParsePointError,
    Point,
};
