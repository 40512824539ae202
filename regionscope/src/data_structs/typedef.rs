pub type RegionId = i64;
pub type GroupId = i64;
pub type CoordNum = f64;
pub type CategoryNum = i32;
