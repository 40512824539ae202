use std::collections::BTreeSet;

use itertools::Itertools;
use log::{
    debug,
    info,
};
use rusqlite::types::Value;
use rusqlite::{
    params,
    params_from_iter,
    Connection,
    OpenFlags,
    Row,
};

use super::{
    GroupMember,
    RegionFilter,
    RegionStore,
    StoreConfig,
    GROUP_TABLE,
    REGION_TABLE,
};
use crate::data_structs::coords::Point;
use crate::data_structs::typedef::GroupId;
use crate::data_structs::Region;
use crate::error::{
    RegionScopeError,
    RegionScopeResult,
};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS inspection_group (
        id INTEGER NOT NULL PRIMARY KEY
    );
    CREATE TABLE IF NOT EXISTS inspection_region (
        id       INTEGER NOT NULL PRIMARY KEY,
        group_id INTEGER NOT NULL REFERENCES inspection_group (id),
        coord_x  REAL    NOT NULL,
        coord_y  REAL    NOT NULL,
        category INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS inspection_region_coords
        ON inspection_region (coord_y, coord_x);
    CREATE INDEX IF NOT EXISTS inspection_region_group
        ON inspection_region (group_id);
";

const REGION_COLUMNS: &str = "id, group_id, coord_x, coord_y, category";

/// Region store backed by an SQLite database.
///
/// Opening the store creates the schema when it is missing and the config
/// allows creation. Otherwise the schema must already be there. All values
/// are bound as statement parameters.
pub struct SqliteStore {
    conn:     Connection,
    location: String,
}

impl SqliteStore {
    /// Opens (and, if allowed by `config`, creates) the database file.
    pub fn open(config: &StoreConfig) -> RegionScopeResult<Self> {
        let location = config.path().display().to_string();
        if !config.create_if_missing() && !config.path().exists() {
            return Err(RegionScopeError::StoreUnavailable {
                location,
                reason: "database file does not exist".into(),
            });
        }

        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if config.create_if_missing() {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }
        let conn = Connection::open_with_flags(config.path(), flags).map_err(|e| {
            RegionScopeError::StoreUnavailable {
                location: location.clone(),
                reason:   e.to_string(),
            }
        })?;
        conn.busy_timeout(config.busy_timeout())
            .map_err(|e| RegionScopeError::StoreUnavailable {
                location: location.clone(),
                reason:   e.to_string(),
            })?;

        info!("Opened region store at {}", location);
        Self::init(conn, location, config.create_if_missing())
    }

    /// Opens a private, empty in-memory database.
    pub fn open_in_memory() -> RegionScopeResult<Self> {
        let location = ":memory:".to_string();
        let conn = Connection::open_in_memory().map_err(|e| {
            RegionScopeError::StoreUnavailable {
                location: location.clone(),
                reason:   e.to_string(),
            }
        })?;
        Self::init(conn, location, true)
    }

    fn init(
        conn: Connection,
        location: String,
        create_schema: bool,
    ) -> RegionScopeResult<Self> {
        // Reading the schema version forces SQLite to actually open the file.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .and_then(|_| conn.pragma_update(None, "foreign_keys", true))
            .map_err(|e| RegionScopeError::StoreUnavailable {
                location: location.clone(),
                reason:   e.to_string(),
            })?;
        if create_schema {
            conn.execute_batch(SCHEMA)
                .map_err(|e| RegionScopeError::store_write(REGION_TABLE, e))?;
        }
        else {
            Self::check_schema(&conn, &location)?;
        }
        debug!("Schema ready at {}", location);
        Ok(Self { conn, location })
    }

    /// Fails with [`RegionScopeError::StoreUnavailable`] unless both tables
    /// exist. Does not write to the database.
    fn check_schema(
        conn: &Connection,
        location: &str,
    ) -> RegionScopeResult<()> {
        let found: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN (?1, ?2)",
                params![GROUP_TABLE, REGION_TABLE],
                |row| row.get(0),
            )
            .map_err(|e| RegionScopeError::StoreUnavailable {
                location: location.to_string(),
                reason:   e.to_string(),
            })?;
        if found != 2 {
            return Err(RegionScopeError::StoreUnavailable {
                location: location.to_string(),
                reason:   format!("schema is missing ({GROUP_TABLE}, {REGION_TABLE})"),
            });
        }
        Ok(())
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    fn count(
        &self,
        table: &'static str,
    ) -> RegionScopeResult<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .map_err(|e| RegionScopeError::store_read(table, e))?;
        Ok(count as usize)
    }
}

fn insert_groups_with(
    conn: &Connection,
    ids: &BTreeSet<GroupId>,
) -> RegionScopeResult<()> {
    let mut stmt = conn
        .prepare_cached("INSERT OR IGNORE INTO inspection_group (id) VALUES (?1)")
        .map_err(|e| RegionScopeError::store_write(GROUP_TABLE, e))?;
    for id in ids {
        stmt.execute(params![id])
            .map_err(|e| RegionScopeError::store_write(GROUP_TABLE, e))?;
    }
    Ok(())
}

fn insert_regions_with(
    conn: &Connection,
    regions: &[Region],
) -> RegionScopeResult<()> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "INSERT INTO inspection_region ({REGION_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"
        ))
        .map_err(|e| RegionScopeError::store_write(REGION_TABLE, e))?;
    for region in regions {
        stmt.execute(params![
            region.id(),
            region.group_id(),
            region.coord_x(),
            region.coord_y(),
            region.category()
        ])
        .map_err(|e| {
            RegionScopeError::store_write(
                REGION_TABLE,
                format!("region {}: {}", region.id(), e),
            )
        })?;
    }
    Ok(())
}

fn region_from_row(row: &Row<'_>) -> rusqlite::Result<Region> {
    Ok(Region::new(
        row.get(0)?,
        row.get(1)?,
        Point::new(row.get(2)?, row.get(3)?),
        row.get(4)?,
    ))
}

/// Builds the `WHERE` clause and its parameters for a base scan.
fn filter_clause(filter: &RegionFilter) -> (String, Vec<Value>) {
    let bbox = filter.bbox();
    let mut clause =
        String::from("coord_x BETWEEN ? AND ? AND coord_y BETWEEN ? AND ?");
    let mut values = vec![
        Value::Real(bbox.xmin()),
        Value::Real(bbox.xmax()),
        Value::Real(bbox.ymin()),
        Value::Real(bbox.ymax()),
    ];

    if let Some(category) = filter.category() {
        clause.push_str(" AND category = ?");
        values.push(Value::Integer(category as i64));
    }
    if let Some(groups) = filter.groups() {
        clause.push_str(&format!(
            " AND group_id IN ({})",
            groups.iter().map(|_| "?").join(", ")
        ));
        values.extend(groups.iter().map(|id| Value::Integer(*id)));
    }
    (clause, values)
}

impl RegionStore for SqliteStore {
    fn insert_groups(
        &mut self,
        ids: &BTreeSet<GroupId>,
    ) -> RegionScopeResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| RegionScopeError::store_write(GROUP_TABLE, e))?;
        insert_groups_with(&tx, ids)?;
        tx.commit()
            .map_err(|e| RegionScopeError::store_write(GROUP_TABLE, e))
    }

    fn insert_regions(
        &mut self,
        regions: &[Region],
    ) -> RegionScopeResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| RegionScopeError::store_write(REGION_TABLE, e))?;
        insert_regions_with(&tx, regions)?;
        tx.commit()
            .map_err(|e| RegionScopeError::store_write(REGION_TABLE, e))
    }

    /// Groups and regions are written in one transaction, so a failure leaves
    /// the database untouched.
    fn write_batch(
        &mut self,
        groups: &BTreeSet<GroupId>,
        regions: &[Region],
    ) -> RegionScopeResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| RegionScopeError::store_write(REGION_TABLE, e))?;
        insert_groups_with(&tx, groups)?;
        insert_regions_with(&tx, regions)?;
        tx.commit()
            .map_err(|e| RegionScopeError::store_write(REGION_TABLE, e))?;
        debug!(
            "Committed {} groups and {} regions to {}",
            groups.len(),
            regions.len(),
            self.location
        );
        Ok(())
    }

    fn scan_regions(
        &self,
        filter: &RegionFilter,
    ) -> RegionScopeResult<Vec<Region>> {
        let (clause, values) = filter_clause(filter);
        let sql = format!(
            "SELECT {REGION_COLUMNS} FROM inspection_region WHERE {clause} \
             ORDER BY coord_y, coord_x, id"
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| RegionScopeError::store_read(REGION_TABLE, e))?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), region_from_row)
            .map_err(|e| RegionScopeError::store_read(REGION_TABLE, e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| RegionScopeError::store_read(REGION_TABLE, e))
    }

    fn scan_all_regions(&self) -> RegionScopeResult<Vec<GroupMember>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT group_id, coord_x, coord_y FROM inspection_region")
            .map_err(|e| RegionScopeError::store_read(REGION_TABLE, e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(GroupMember {
                    group_id: row.get(0)?,
                    point:    Point::new(row.get(1)?, row.get(2)?),
                })
            })
            .map_err(|e| RegionScopeError::store_read(REGION_TABLE, e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| RegionScopeError::store_read(REGION_TABLE, e))
    }

    /// Both scans of a query run inside one deferred read transaction. The
    /// transaction is rolled back when `f` fails.
    fn with_snapshot<T, F>(
        &self,
        f: F,
    ) -> RegionScopeResult<T>
    where
        F: FnOnce(&Self) -> RegionScopeResult<T>, {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| RegionScopeError::store_read(REGION_TABLE, e))?;
        let value = f(self)?;
        tx.commit()
            .map_err(|e| RegionScopeError::store_read(REGION_TABLE, e))?;
        Ok(value)
    }

    fn count_groups(&self) -> RegionScopeResult<usize> {
        self.count(GROUP_TABLE)
    }

    fn count_regions(&self) -> RegionScopeResult<usize> {
        self.count(REGION_TABLE)
    }
}
