mod common;
use common::{assert_sqlite_pragmas, setup_db};

use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Integer;

#[derive(QueryableByName)]
struct Cnt {
    #[diesel(sql_type = Integer)]
    cnt: i32,
}

fn count(conn: &mut SqliteConnection, sql: &str) -> i32 {
    sql_query(sql).get_result::<Cnt>(conn).unwrap().cnt
}

#[test]
fn migrations_apply_and_pragmas_are_set() {
    let (_db, mut conn) = setup_db();
    assert_sqlite_pragmas(&mut conn);

    let tables = count(
        &mut conn,
        "SELECT COUNT(*) AS cnt FROM sqlite_master
            WHERE type='table' AND name IN ('profiles','readings');",
    );
    assert_eq!(tables, 2);
}

#[test]
fn reading_needs_a_profile() {
    let (_db, mut conn) = setup_db();
    let res = sql_query(
        "INSERT INTO readings (user_id, glucose_level, taken_at)
            VALUES ('ghost', 5.0, '2024-01-01T08:00:00.000');",
    )
    .execute(&mut conn);
    assert!(res.is_err(), "FK should reject readings without a profile");
}

#[test]
fn units_require_the_insulin_flag() {
    let (_db, mut conn) = setup_db();
    sql_query("INSERT INTO profiles (user_id) VALUES ('u');")
        .execute(&mut conn)
        .unwrap();

    let res = sql_query(
        "INSERT INTO readings (user_id, glucose_level, taken_at, has_insulin, insulin_units)
            VALUES ('u', 5.0, '2024-01-01T08:00:00.000', 0, 3.0);",
    )
    .execute(&mut conn);
    assert!(res.is_err(), "CHECK should reject units without has_insulin");

    sql_query(
        "INSERT INTO readings (user_id, glucose_level, taken_at, has_insulin, insulin_units)
            VALUES ('u', 5.0, '2024-01-01T08:00:00.000', 1, 3.0);",
    )
    .execute(&mut conn)
    .unwrap();
}

#[test]
fn deleting_a_profile_cascades() {
    let (_db, mut conn) = setup_db();
    sql_query("INSERT INTO profiles (user_id) VALUES ('u');")
        .execute(&mut conn)
        .unwrap();
    sql_query(
        "INSERT INTO readings (user_id, glucose_level, taken_at)
            VALUES ('u', 5.0, '2024-01-01T08:00:00.000'),
                   ('u', 6.0, '2024-01-01T09:00:00.000');",
    )
    .execute(&mut conn)
    .unwrap();

    sql_query("DELETE FROM profiles WHERE user_id = 'u';")
        .execute(&mut conn)
        .unwrap();
    assert_eq!(count(&mut conn, "SELECT COUNT(*) AS cnt FROM readings;"), 0);
}
