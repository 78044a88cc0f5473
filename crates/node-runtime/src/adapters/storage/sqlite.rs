//! SQLite store for the catalog tables and the per-pair cross-reference
//! tables the mapping queries run against.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};
use tracing::{debug, info};

use cb_01_bloom_index::BloomIndex;
use cb_02_id_mapping::MappingStore;
use cb_03_source_catalog::{CatalogStore, DirectiveRow, IndexRow, SourceRow};
use shared_types::StoreError;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS sources (
        source_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        description TEXT,
        ident_type TEXT,
        url TEXT,
        id_url TEXT,
        citedata TEXT
    );
    CREATE TABLE IF NOT EXISTS source_indexes (
        source_id INTEGER NOT NULL REFERENCES sources(source_id),
        subset TEXT NOT NULL,
        bloom BLOB NOT NULL,
        last_update TEXT,
        element_count INTEGER,
        PRIMARY KEY (source_id, subset)
    );
    CREATE TABLE IF NOT EXISTS source_mappings (
        left_source_id INTEGER NOT NULL REFERENCES sources(source_id),
        right_source_id INTEGER NOT NULL REFERENCES sources(source_id),
        map_query_lr TEXT NOT NULL,
        map_query_rl TEXT NOT NULL,
        last_update TEXT,
        element_count INTEGER,
        PRIMARY KEY (left_source_id, right_source_id)
    );
";

/// Single-connection SQLite store shared by the catalog loader and every
/// translator.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and make sure the catalog
    /// tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        info!(path = %path.display(), "Opened SQLite store");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).map_err(query_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run arbitrary statements, e.g. to create a cross-reference table.
    pub fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        self.conn.lock().execute_batch(sql).map_err(query_error)
    }

    /// Insert or replace a source row.
    pub fn put_source(&self, row: &SourceRow) -> Result<(), StoreError> {
        self.conn
            .lock()
            .execute(
                "INSERT OR REPLACE INTO sources
                 (source_id, name, description, ident_type, url, id_url, citedata)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    row.source_id,
                    row.name,
                    row.description,
                    row.ident_type,
                    row.url,
                    row.id_url,
                    row.citedata
                ],
            )
            .map_err(query_error)?;
        Ok(())
    }

    /// Pack `index` and store it as a subset of `source_id`.
    pub fn put_index(
        &self,
        source_id: i64,
        subset: &str,
        index: &BloomIndex,
        last_update: &str,
    ) -> Result<(), StoreError> {
        let bloom = index
            .pack()
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        self.conn
            .lock()
            .execute(
                "INSERT OR REPLACE INTO source_indexes
                 (source_id, subset, bloom, last_update, element_count)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![source_id, subset, bloom, last_update, index.count() as i64],
            )
            .map_err(query_error)?;
        debug!(source_id, subset, bytes = bloom.len(), "Stored subset index");
        Ok(())
    }

    /// Insert or replace a mapping directive.
    pub fn put_directive(&self, row: &DirectiveRow) -> Result<(), StoreError> {
        self.conn
            .lock()
            .execute(
                "INSERT OR REPLACE INTO source_mappings
                 (left_source_id, right_source_id, map_query_lr, map_query_rl, last_update, element_count)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    row.left_source_id,
                    row.right_source_id,
                    row.map_query_lr,
                    row.map_query_rl,
                    row.last_update,
                    row.element_count as i64
                ],
            )
            .map_err(query_error)?;
        Ok(())
    }
}

impl CatalogStore for SqliteStore {
    fn load_sources(&self) -> Result<Vec<SourceRow>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT source_id, name, description, ident_type, url, id_url, citedata
                 FROM sources ORDER BY source_id",
            )
            .map_err(query_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SourceRow {
                    source_id: row.get(0)?,
                    name: row.get(1)?,
                    description: text(row, 2)?,
                    ident_type: text(row, 3)?,
                    url: text(row, 4)?,
                    id_url: text(row, 5)?,
                    citedata: text(row, 6)?,
                })
            })
            .map_err(query_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(decode_error)
    }

    fn load_indexes(&self, source_id: i64) -> Result<Vec<IndexRow>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT subset, bloom, last_update, element_count
                 FROM source_indexes WHERE source_id = ?1 ORDER BY subset",
            )
            .map_err(query_error)?;
        let rows = stmt
            .query_map([source_id], |row| {
                Ok(IndexRow {
                    subset: row.get(0)?,
                    bloom: row.get(1)?,
                    last_update: text(row, 2)?,
                    element_count: count(row, 3)?,
                })
            })
            .map_err(query_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(decode_error)
    }

    fn load_directives(&self) -> Result<Vec<DirectiveRow>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT left_source_id, right_source_id, map_query_lr, map_query_rl,
                        last_update, element_count
                 FROM source_mappings ORDER BY left_source_id, right_source_id",
            )
            .map_err(query_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DirectiveRow {
                    left_source_id: row.get(0)?,
                    right_source_id: row.get(1)?,
                    map_query_lr: row.get(2)?,
                    map_query_rl: row.get(3)?,
                    last_update: text(row, 4)?,
                    element_count: count(row, 5)?,
                })
            })
            .map_err(query_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(decode_error)
    }
}

impl MappingStore for SqliteStore {
    fn lookup(&self, query: &str, id: &str) -> Result<Vec<String>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(query).map_err(query_error)?;
        let mut rows = stmt.query([id]).map_err(query_error)?;

        let mut targets = Vec::new();
        while let Some(row) = rows.next().map_err(query_error)? {
            let value = match row.get_ref(0).map_err(decode_error)? {
                ValueRef::Null => continue,
                ValueRef::Integer(i) => i.to_string(),
                ValueRef::Real(f) => f.to_string(),
                ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
            };
            targets.push(value);
        }
        Ok(targets)
    }
}

/// Nullable text column, NULL read as empty.
fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

/// Nullable count column, NULL or negative read as zero.
fn count(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    Ok(row
        .get::<_, Option<i64>>(idx)?
        .map(|n| u64::try_from(n).unwrap_or(0))
        .unwrap_or(0))
}

fn query_error(e: rusqlite::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

fn decode_error(e: rusqlite::Error) -> StoreError {
    StoreError::Decode(e.to_string())
}
