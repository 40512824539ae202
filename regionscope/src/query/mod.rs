//! Crop queries.
//!
//! A [`QueryDescriptor`] describes one query and is usually parsed from a JSON
//! document. The [`QueryEngine`] evaluates it in two passes:
//!
//! 1. a base scan selecting the regions inside the closed bounding box that
//!    also satisfy the category and group filters, sorted by `y` then `x`;
//! 2. for *proper* queries, a containment pass over **all** stored regions
//!    that discards every group with at least one member outside the box.
//!
//! The second pass ignores the category and group filters: a
//! group is only proper when the box contains the whole group.

mod descriptor;
mod engine;

pub use descriptor::QueryDescriptor;
pub use engine::QueryEngine;
