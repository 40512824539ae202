//! This module contains the core data structures used throughout the
//! `regionscope` crate for representing inspection data and query results.
//!
//! Key components of this module include:
//!
//! - [`coords`]: planar geometry: [`Point`](coords::Point) for a single
//!   coordinate pair and [`BoundingBox`](coords::BoundingBox) for the closed,
//!   axis-aligned crop region.
//! - [`Region`]: a single inspection point with its category and group
//!   reference, as persisted in the region store.
//! - [`ResultRow`]: the projection of a region emitted by a crop query.
//! - [`typedef`]: type aliases for identifiers, coordinates and categories.

pub mod coords;
mod region;
pub mod typedef;


pub use region::{
    Region,
    ResultRow,
};
