//! Generic SQLite-backed entity store.
//!
//! # Responsibility
//! - Implement [`EntityStore`] once for every [`SqlEntity`].
//! - Keep table/column mapping inside the persistence boundary.
//!
//! # Invariants
//! - Only migrated connections are accepted. `try_new` checks version,
//!   table and columns per store; long-lived owners check the whole registry
//!   once with [`ensure_registry_ready`] and then use [`SqliteStore::assume_ready`].
//! - Sort properties are resolved to known columns; raw client text never
//!   reaches SQL.
//! - Every row read back is validated before it is returned.

use super::{EntityStore, OwnedStore, StoreError, StoreResult};
use crate::db::migrations::{current_user_version, latest_version};
use crate::model::appearances::Appearances;
use crate::model::assessment::Assessment;
use crate::model::education::Education;
use crate::model::further_education::FurtherEducation;
use crate::model::member::Member;
use crate::model::{Entity, EntityId, MemberOwned, ID_PROPERTY};
use crate::paging::{Page, PageRequest};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::marker::PhantomData;

/// Table mapping for an entity persisted in SQLite.
pub trait SqlEntity: Entity {
    const TABLE: &'static str;
    /// `(property, column)` for every non-id column, in bind order.
    const COLUMNS: &'static [(&'static str, &'static str)];

    /// Column values in [`Self::COLUMNS`] order.
    fn to_sql_values(&self) -> Vec<Value>;

    /// Builds a record from a row selected with `id` plus [`Self::COLUMNS`].
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Resolves a JSON property to its column.
    fn column_for(property: &str) -> Option<&'static str> {
        if property == ID_PROPERTY {
            return Some("id");
        }
        Self::COLUMNS
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, column)| *column)
    }
}

/// SQLite store for one entity type, borrowing a migrated connection.
pub struct SqliteStore<'conn, T> {
    conn: &'conn Connection,
    _entity: PhantomData<fn() -> T>,
}

impl<'conn, T: SqlEntity> SqliteStore<'conn, T> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table_ready::<T>(conn)?;
        Ok(Self::assume_ready(conn))
    }

    /// Wraps a connection that already passed [`ensure_registry_ready`].
    ///
    /// Runs no queries; a connection that skipped the check surfaces
    /// missing tables as SQLite errors on first use instead.
    pub fn assume_ready(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    fn select_sql() -> String {
        let columns = T::COLUMNS
            .iter()
            .map(|(_, column)| *column)
            .collect::<Vec<_>>()
            .join(", ");
        format!("SELECT id, {columns} FROM {}", T::TABLE)
    }

    fn read_back(&self, id: EntityId, context: &'static str) -> StoreResult<T> {
        self.find_one(id)?
            .ok_or(StoreError::InconsistentState(context))
    }

    fn query_rows(&self, sql: &str, bind_values: Vec<Value>) -> StoreResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_row::<T>(row)?);
        }
        Ok(records)
    }
}

impl<T: SqlEntity> EntityStore<T> for SqliteStore<'_, T> {
    fn insert(&self, record: &T) -> StoreResult<T> {
        let columns = T::COLUMNS
            .iter()
            .map(|(_, column)| *column)
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=T::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");

        self.conn.execute(
            &format!(
                "INSERT INTO {} ({columns}) VALUES ({placeholders});",
                T::TABLE
            ),
            params_from_iter(record.to_sql_values()),
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=store_insert module=repo status=ok table={} id={id}",
            T::TABLE
        );
        self.read_back(id, "inserted row not found in read-back")
    }

    fn update(&self, id: EntityId, record: &T) -> StoreResult<T> {
        let assignments = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, (_, column))| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let mut bind_values = record.to_sql_values();
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET {assignments} WHERE id = ?{};",
                T::TABLE,
                T::COLUMNS.len() + 1
            ),
            params_from_iter(bind_values),
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        self.read_back(id, "updated row not found in read-back")
    }

    fn find_one(&self, id: EntityId) -> StoreResult<Option<T>> {
        let sql = format!("{} WHERE id = ?1;", Self::select_sql());
        Ok(self
            .query_rows(&sql, vec![Value::Integer(id)])?
            .into_iter()
            .next())
    }

    fn find_page(&self, request: &PageRequest) -> StoreResult<Page<T>> {
        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", T::TABLE),
            [],
            |row| row.get(0),
        )?;

        let mut sql = Self::select_sql();
        if !request.sort.is_empty() {
            let order_by = request
                .sort
                .iter()
                .map(|order| {
                    T::column_for(&order.property)
                        .map(|column| format!("{column} {}", order.direction.as_sql()))
                        .ok_or_else(|| StoreError::InvalidSort(order.property.clone()))
                })
                .collect::<StoreResult<Vec<_>>>()?;
            sql.push_str(" ORDER BY ");
            sql.push_str(&order_by.join(", "));
        }
        sql.push_str(" LIMIT ? OFFSET ?;");

        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let content = self.query_rows(
            &sql,
            vec![
                Value::Integer(i64::from(request.size)),
                Value::Integer(offset),
            ],
        )?;

        let total = u64::try_from(total).map_err(|_| {
            StoreError::InvalidData(format!("negative row count {total} in {}", T::TABLE))
        })?;
        Ok(Page::new(content, request, total))
    }

    fn delete(&self, id: EntityId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1;", T::TABLE), [id])?;
        Ok(changed > 0)
    }
}

impl<T: SqlEntity + MemberOwned> OwnedStore<T> for SqliteStore<'_, T> {
    fn find_by_member_id(&self, member_id: EntityId) -> StoreResult<Vec<T>> {
        let sql = format!("{} WHERE member_id = ?1 ORDER BY id ASC;", Self::select_sql());
        self.query_rows(&sql, vec![Value::Integer(member_id)])
    }
}

fn parse_row<T: SqlEntity>(row: &Row<'_>) -> StoreResult<T> {
    let record = T::from_row(row)?;
    record.validate().map_err(|err| {
        StoreError::InvalidData(format!("row in {} failed validation: {err}", T::TABLE))
    })?;
    Ok(record)
}

/// Checks schema version and every registry table on `conn` in one pass.
pub fn ensure_registry_ready(conn: &Connection) -> StoreResult<()> {
    ensure_schema_version(conn)?;
    ensure_table_ready::<Member>(conn)?;
    ensure_table_ready::<Assessment>(conn)?;
    ensure_table_ready::<Education>(conn)?;
    ensure_table_ready::<Appearances>(conn)?;
    ensure_table_ready::<FurtherEducation>(conn)?;
    debug!(
        "event=store_ready module=repo status=ok version={}",
        latest_version()
    );
    Ok(())
}

fn ensure_schema_version(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

fn ensure_table_ready<T: SqlEntity>(conn: &Connection) -> StoreResult<()> {
    if !table_exists(conn, T::TABLE)? {
        return Err(StoreError::MissingRequiredTable(T::TABLE));
    }

    let present = table_columns(conn, T::TABLE)?;
    let id_column = std::iter::once("id");
    for column in id_column.chain(T::COLUMNS.iter().map(|(_, column)| *column)) {
        if !present.iter().any(|name| name == column) {
            return Err(StoreError::MissingRequiredColumn {
                table: T::TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
