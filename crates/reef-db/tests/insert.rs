mod common;
use common::*;

use std::time::Duration;

use reef_db::{DbError, Engine, EngineConfig};

#[test]
fn insert_reports_affected_rows() {
    let (engine, _dir) = engine();
    seed(&engine);
    assert_eq!(
        count_rows(&engine, &format!("SELECT * FROM {DB}.{COLLECTION};")),
        100
    );
}

#[test]
fn insert_additional_rows() {
    let (engine, _dir) = engine();
    seed(&engine);

    let rows: Vec<String> = (100..110)
        .map(|num| format!("('{}', {}, '{}', {}.1, TRUE)", gen_id(num), num, num, num))
        .collect();
    let query = format!(
        "INSERT INTO {DB}.{COLLECTION} (_id, count, count_str, count_float, count_bool) VALUES {};",
        rows.join(", ")
    );
    assert_eq!(count_rows(&engine, &query), 10);
    assert_eq!(
        count_rows(&engine, &format!("SELECT * FROM {DB}.{COLLECTION};")),
        110
    );
}

#[test]
fn duplicate_id_is_skipped_not_an_error() {
    let (engine, _dir) = engine();
    seed(&engine);

    let query = format!(
        "INSERT INTO {DB}.{COLLECTION} (_id, count) VALUES ('{}', 9999);",
        gen_id(0)
    );
    assert_eq!(count_rows(&engine, &query), 0);

    // total unchanged and the original row untouched
    assert_eq!(
        count_rows(&engine, &format!("SELECT * FROM {DB}.{COLLECTION};")),
        100
    );
    assert_eq!(
        count_rows(
            &engine,
            &format!("SELECT * FROM {DB}.{COLLECTION} WHERE count = 9999;")
        ),
        0
    );
}

#[test]
fn duplicate_within_one_batch_keeps_first() {
    let (engine, _dir) = engine();
    create_collection(&engine);

    let query = format!(
        "INSERT INTO {DB}.{COLLECTION} (_id, count) VALUES ('x', 1), ('x', 2), ('y', 3);"
    );
    assert_eq!(count_rows(&engine, &query), 2);

    let counts = collect_i64(
        &engine,
        &format!("SELECT * FROM {DB}.{COLLECTION} WHERE _id = 'x';"),
        "count",
    );
    assert_eq!(counts, vec![1]);
}

#[test]
fn missing_id_gets_generated_object_id() {
    let (engine, _dir) = engine();
    create_collection(&engine);

    close(
        engine
            .execute(&format!(
                "INSERT INTO {DB}.{COLLECTION} (count) VALUES (1);"
            ))
            .unwrap(),
    );

    let mut cursor = engine
        .execute(&format!("SELECT * FROM {DB}.{COLLECTION};"))
        .unwrap();
    assert!(cursor.next().unwrap());
    let oid = cursor.get_object_id("_id").unwrap();
    assert_eq!(oid.to_hex().len(), 24);
    cursor.close();
}

#[test]
fn arity_mismatch_rejects_row_and_continues() {
    let (engine, _dir) = engine();
    create_collection(&engine);

    let query = format!(
        "INSERT INTO {DB}.{COLLECTION} (_id, count) VALUES ('a', 1), ('b'), ('c', 3);"
    );
    assert_eq!(count_rows(&engine, &query), 2);
    assert_eq!(
        count_rows(&engine, &format!("SELECT * FROM {DB}.{COLLECTION};")),
        2
    );
}

#[test]
fn insert_into_missing_collection_errors() {
    let (engine, _dir) = engine();
    close(engine.execute(&format!("CREATE DATABASE {DB};")).unwrap());
    let err = engine
        .execute(&format!("INSERT INTO {DB}.nosuch (_id) VALUES ('a');"))
        .unwrap_err();
    assert!(matches!(err, DbError::CollectionNotFound(_)), "{err}");
}

#[test]
fn statement_timeout_aborts_row_statements() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Engine::open(EngineConfig {
        root: Some(dir.path().to_path_buf()),
        statement_timeout: Some(Duration::ZERO),
    });

    // DDL is registry manipulation and carries no row budget
    create_collection(&engine);

    let err = engine
        .execute(&format!(
            "INSERT INTO {DB}.{COLLECTION} (_id, count) VALUES ('a', 1);"
        ))
        .unwrap_err();
    assert!(matches!(err, DbError::Timeout), "{err}");

    let err = engine
        .execute(&format!("SELECT * FROM {DB}.{COLLECTION};"))
        .unwrap_err();
    assert!(matches!(err, DbError::Timeout), "{err}");
}
