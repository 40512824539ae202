pub use crate::data_structs::coords::{
    BoundingBox,
    Point,
};
pub use crate::data_structs::typedef::{
    CategoryNum,
    CoordNum,
    GroupId,
    RegionId,
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
