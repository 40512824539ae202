//! # regionscope
//!
//! `regionscope` loads point-cloud inspection data into a relational store and
//! answers axis-aligned crop queries against it.
//!
//! An inspection data set consists of points ([`Region`]) that carry a
//! coordinate pair, an integer category and the id of the group it belongs to.
//! A crop query ([`QueryDescriptor`]) selects the points inside a closed
//! bounding box, optionally narrowed to one category and/or a set of groups.
//! In *proper* mode a point is only returned when every point of its group,
//! including the points excluded by the category and group filters, lies
//! inside the box.
//!
//! ## Structure
//!
//! * [`data_structs`]: points, bounding boxes, regions and result rows.
//! * [`io`]: ingestion of the three line-aligned input files and the flat text
//!   output of query results.
//! * [`store`]: the [`RegionStore`] trait with an SQLite backed implementation
//!   ([`SqliteStore`]) and an in-memory one ([`MemoryStore`]).
//! * [`query`]: parsing of crop query documents and the [`QueryEngine`].
//!
//! ## Usage
//!
//! ### Loading a data directory
//!
//! ```no_run
//! use regionscope::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = SqliteStore::open(&StoreConfig::default())?;
//!     let sources = IngestSources::from_data_dir("path/to/data");
//!     let summary = Ingestor::new(sources).run(&mut store)?;
//!     println!("Loaded {} regions", summary.regions);
//!     Ok(())
//! }
//! ```
//!
//! ### Running a crop query
//!
//! ```no_run
//! use std::fs::File;
//! use regionscope::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::open(&StoreConfig::default())?;
//!     let descriptor = QueryDescriptor::from_path("query.json")?;
//!     let rows = QueryEngine::new(&store).evaluate(&descriptor)?;
//!
//!     let mut writer = ResultWriter::new(File::create("query_output.txt")?);
//!     writer.write_rows(&rows)?;
//!     writer.finish()?;
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod query;
pub mod store;
pub mod utils;

pub use crate::data_structs::coords::{
    BoundingBox,
    Point,
};
pub use crate::data_structs::{
    Region,
    ResultRow,
};
pub use crate::error::{
    RegionScopeError,
    RegionScopeResult,
};
pub use crate::io::ingest::{
    IngestBatch,
    IngestRecord,
    IngestSources,
    IngestSummary,
    Ingestor,
};
pub use crate::io::output::ResultWriter;
pub use crate::query::{
    QueryDescriptor,
    QueryEngine,
};
pub use crate::store::{
    GroupMember,
    MemoryStore,
    RegionFilter,
    RegionStore,
    SqliteStore,
    StoreConfig,
};
