#![allow(dead_code)]

use reef_db::{Cursor, Engine, EngineConfig};

pub const DB: &str = "testdb";
pub const COLLECTION: &str = "testcol";

pub fn engine() -> (Engine, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let engine = Engine::open(EngineConfig {
        root: Some(dir.path().to_path_buf()),
        statement_timeout: None,
    });
    (engine, dir)
}

/// A 24-char zero-padded identifier, like the reference fixtures use.
pub fn gen_id(num: usize) -> String {
    format!("{num:024}")
}

pub fn create_collection(engine: &Engine) {
    engine
        .execute(&format!("CREATE DATABASE {DB};"))
        .unwrap()
        .close();
    engine
        .execute(&format!("CREATE TABLE {DB}.{COLLECTION}();"))
        .unwrap()
        .close();
}

/// Seed the standard 100-row corpus: `count` 0..99, `count_str` the decimal
/// string, `count_float` count + 0.1, `count_bool` TRUE when count is odd.
pub fn seed(engine: &Engine) {
    create_collection(engine);
    let rows: Vec<String> = (0..100)
        .map(|num| {
            format!(
                "('{}', {}, '{}', {}.1, {})",
                gen_id(num),
                num,
                num,
                num,
                if num % 2 != 0 { "TRUE" } else { "FALSE" }
            )
        })
        .collect();
    let query = format!(
        "INSERT INTO {DB}.{COLLECTION} (_id, count, count_str, count_float, count_bool) VALUES {};",
        rows.join(", ")
    );
    let mut cursor = engine.execute(&query).unwrap();
    assert_eq!(cursor.len().unwrap(), 100);
    cursor.close();
}

/// Execute and return the row count, closing the cursor.
pub fn count_rows(engine: &Engine, query: &str) -> usize {
    let mut cursor = engine.execute(query).unwrap();
    let n = cursor.len().unwrap();
    cursor.close();
    n
}

/// Execute and collect a field from every row in cursor order.
pub fn collect_i64(engine: &Engine, query: &str, field: &str) -> Vec<i64> {
    let mut cursor = engine.execute(query).unwrap();
    let mut values = Vec::new();
    while cursor.next().unwrap() {
        values.push(cursor.get_i64(field).unwrap());
    }
    cursor.close();
    values
}

pub fn close(mut cursor: Cursor) {
    cursor.close();
}
