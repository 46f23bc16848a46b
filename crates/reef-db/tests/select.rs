mod common;
use common::*;

use reef_db::DbError;

fn filtered(engine: &reef_db::Engine, clause: &str) -> usize {
    count_rows(
        engine,
        &format!("SELECT * FROM {DB}.{COLLECTION} WHERE {clause};"),
    )
}

#[test]
fn comparison_operators() {
    let (engine, _dir) = engine();
    seed(&engine);

    assert_eq!(filtered(&engine, "count = 10"), 1);
    assert_eq!(filtered(&engine, "count != 10"), 99);
    assert_eq!(filtered(&engine, "count > 90"), 9);
    assert_eq!(filtered(&engine, "count >= 90"), 10);
    assert_eq!(filtered(&engine, "count < 10"), 10);
    assert_eq!(filtered(&engine, "count <= 10"), 11);
}

#[test]
fn and_or_combinators() {
    let (engine, _dir) = engine();
    seed(&engine);

    assert_eq!(filtered(&engine, "count > 90 AND count <= 95"), 5);
    assert_eq!(filtered(&engine, "count < 10 OR count >= 90"), 20);
    assert_eq!(filtered(&engine, "count > 100 AND count < 0"), 0);
}

#[test]
fn string_and_bool_filters() {
    let (engine, _dir) = engine();
    seed(&engine);

    assert_eq!(filtered(&engine, "count_str = '50'"), 1);
    assert_eq!(filtered(&engine, "count_str != '50'"), 99);
    assert_eq!(filtered(&engine, "count_bool = TRUE"), 50);
    assert_eq!(filtered(&engine, "count_bool = FALSE"), 50);
}

#[test]
fn float_filters() {
    let (engine, _dir) = engine();
    seed(&engine);

    assert_eq!(filtered(&engine, "count_float = 50.1"), 1);
    assert_eq!(filtered(&engine, "count_float > 80.5"), 19);
}

#[test]
fn int_and_float_compare_numerically() {
    let (engine, _dir) = engine();
    seed(&engine);

    // count is int64 but an f64 literal still compares by value
    assert_eq!(filtered(&engine, "count >= 50.0"), 50);
    assert_eq!(filtered(&engine, "count = 50.0"), 1);
    // and the float column against an integer literal
    assert_eq!(filtered(&engine, "count_float > 98"), 2);
}

#[test]
fn cross_kind_comparisons_never_match() {
    let (engine, _dir) = engine();
    seed(&engine);

    // count_str holds strings; an int literal is a different kind
    assert_eq!(filtered(&engine, "count_str = 50"), 0);
    assert_eq!(filtered(&engine, "count_str > 50"), 0);
    // != requires comparable kinds too
    assert_eq!(filtered(&engine, "count_str != 50"), 0);
}

#[test]
fn missing_field_matches_only_not_equal() {
    let (engine, _dir) = engine();
    seed(&engine);

    assert_eq!(filtered(&engine, "absent = 1"), 0);
    assert_eq!(filtered(&engine, "absent > 1"), 0);
    assert_eq!(filtered(&engine, "absent != 1"), 100);
}

#[test]
fn order_by_ascending_and_descending() {
    let (engine, _dir) = engine();
    seed(&engine);

    let ascending = collect_i64(
        &engine,
        &format!("SELECT * FROM {DB}.{COLLECTION} WHERE count < 5 ORDER BY count ASC;"),
        "count",
    );
    assert_eq!(ascending, vec![0, 1, 2, 3, 4]);

    let descending = collect_i64(
        &engine,
        &format!("SELECT * FROM {DB}.{COLLECTION} WHERE count < 5 ORDER BY count DESC;"),
        "count",
    );
    assert_eq!(descending, vec![4, 3, 2, 1, 0]);
}

#[test]
fn order_by_defaults_to_ascending() {
    let (engine, _dir) = engine();
    seed(&engine);

    let values = collect_i64(
        &engine,
        &format!("SELECT * FROM {DB}.{COLLECTION} WHERE count >= 97 ORDER BY count;"),
        "count",
    );
    assert_eq!(values, vec![97, 98, 99]);
}

#[test]
fn count_star_returns_single_row() {
    let (engine, _dir) = engine();
    seed(&engine);

    let mut cursor = engine
        .execute(&format!(
            "SELECT COUNT(*) FROM {DB}.{COLLECTION} WHERE count > 90;"
        ))
        .unwrap();
    assert_eq!(cursor.len().unwrap(), 1);
    assert!(cursor.next().unwrap());
    assert_eq!(cursor.get_i64("count").unwrap(), 9);
    cursor.close();
}

#[test]
fn column_projection_drops_other_fields() {
    let (engine, _dir) = engine();
    seed(&engine);

    let mut cursor = engine
        .execute(&format!(
            "SELECT _id, count FROM {DB}.{COLLECTION} WHERE count = 7;"
        ))
        .unwrap();
    assert!(cursor.next().unwrap());
    assert_eq!(cursor.get_str("_id").unwrap(), gen_id(7));
    assert_eq!(cursor.get_i64("count").unwrap(), 7);
    assert!(cursor.get("count_str").unwrap().is_none());
    cursor.close();
}

#[test]
fn select_from_missing_collection_errors() {
    let (engine, _dir) = engine();
    create_collection(&engine);
    let err = engine
        .execute(&format!("SELECT * FROM {DB}.nosuch;"))
        .unwrap_err();
    assert!(matches!(err, DbError::CollectionNotFound(_)), "{err}");

    let err = engine
        .execute(&format!("SELECT * FROM nosuch.{COLLECTION};"))
        .unwrap_err();
    assert!(matches!(err, DbError::DatabaseNotFound(_)), "{err}");
}
