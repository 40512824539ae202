//! File input and output.
//!
//! - [`ingest`]: reading the three line-aligned inspection files into
//!   [`Region`](crate::Region) records and loading them into a store.
//! - [`output`]: writing crop query results as whitespace separated text.

pub mod ingest;
pub mod output;
