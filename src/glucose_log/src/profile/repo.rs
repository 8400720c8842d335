//! Profile and reading queries over a borrowed SQLite connection.

use anyhow::Context;
use diesel::{dsl::exists, prelude::*, select};
use reading_aggregator::{ProfileDocument, Reading, ReadingLog, StoreError, UserId};

use crate::{
    models::{NewReadingRow, ReadingRow},
    schema::{profiles, readings},
};

/// Whether `user` has a profile row.
pub fn profile_exists(conn: &mut SqliteConnection, user: &UserId) -> anyhow::Result<bool> {
    let found = select(exists(
        profiles::table.filter(profiles::user_id.eq(user.as_str())),
    ))
    .get_result::<bool>(conn)?;
    Ok(found)
}

/// Insert an empty profile; `false` if it already existed.
pub fn create_profile(conn: &mut SqliteConnection, user: &UserId) -> anyhow::Result<bool> {
    let inserted = diesel::insert_into(profiles::table)
        .values(profiles::user_id.eq(user.as_str()))
        .on_conflict_do_nothing()
        .execute(conn)
        .with_context(|| format!("create profile {user}"))?;
    tracing::debug!(user = %user, created = inserted == 1, "create_profile");
    Ok(inserted == 1)
}

/// Snapshot of the user's readings in insertion order.
///
/// Errors with [`StoreError::NotFound`] when the profile does not exist.
pub fn fetch_log(conn: &mut SqliteConnection, user: &UserId) -> anyhow::Result<ReadingLog> {
    conn.transaction::<_, anyhow::Error, _>(|conn| {
        if !profile_exists(conn, user)? {
            return Err(StoreError::NotFound(user.clone()).into());
        }
        let rows: Vec<ReadingRow> = readings::table
            .filter(readings::user_id.eq(user.as_str()))
            .order(readings::id.asc())
            .select(ReadingRow::as_select())
            .load(conn)?;
        tracing::debug!(user = %user, count = rows.len(), "fetch_log");
        rows.into_iter().map(ReadingRow::into_reading).collect()
    })
}

/// Append one reading and return its row id.
///
/// The reading is validated first; a missing profile is [`StoreError::NotFound`].
pub fn append_reading(
    conn: &mut SqliteConnection,
    user: &UserId,
    reading: &Reading,
) -> anyhow::Result<i32> {
    StoreError::check_reading(reading)?;
    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        if !profile_exists(conn, user)? {
            return Err(StoreError::NotFound(user.clone()).into());
        }
        let id = diesel::insert_into(readings::table)
            .values(NewReadingRow::from_reading(user, reading))
            .returning(readings::id)
            .get_result::<i32>(conn)?;
        tracing::debug!(user = %user, id, "append_reading");
        Ok(id)
    })
}

/// Append every reading of `doc` to `user`'s profile, creating the profile
/// if needed. Returns the number of readings written.
///
/// The document is checked in full before anything is written, and the
/// inserts share one immediate transaction: either all readings land or none.
pub fn import_document(
    conn: &mut SqliteConnection,
    user: &UserId,
    doc: ProfileDocument,
) -> anyhow::Result<usize> {
    let log = doc.into_log().map_err(StoreError::Integrity)?;
    for (idx, reading) in log.iter().enumerate() {
        StoreError::check_reading(reading).map_err(|e| match e {
            StoreError::InvalidReading(msg) => {
                StoreError::InvalidReading(format!("reading #{idx}: {msg}"))
            }
            other => other,
        })?;
    }
    let rows: Vec<NewReadingRow<'_>> = log
        .iter()
        .map(|r| NewReadingRow::from_reading(user, r))
        .collect();

    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        create_profile(conn, user)?;
        if rows.is_empty() {
            return Ok(0);
        }
        let written = diesel::insert_into(readings::table)
            .values(&rows)
            .execute(conn)?;
        tracing::debug!(user = %user, written, "import_document");
        Ok(written)
    })
}
