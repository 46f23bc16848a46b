use bson::oid::ObjectId;
use reef_sql::Value;

use crate::error::DbError;
use crate::record::Record;

/// A single-pass, forward-only view over a statement's result rows.
///
/// The rows are an owned snapshot taken when the statement executed;
/// later mutation of the collection is never visible through a cursor.
/// Field access is valid only after at least one successful [`next`],
/// and every method except [`close`] errors once the cursor is closed.
///
/// [`next`]: Cursor::next
/// [`close`]: Cursor::close
#[derive(Debug)]
pub struct Cursor {
    rows: Vec<Record>,
    position: Option<usize>,
    closed: bool,
}

impl Cursor {
    pub(crate) fn new(rows: Vec<Record>) -> Cursor {
        Cursor {
            rows,
            position: None,
            closed: false,
        }
    }

    /// Number of rows in the snapshot.
    pub fn len(&self) -> Result<usize, DbError> {
        self.check_open()?;
        Ok(self.rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, DbError> {
        Ok(self.len()? == 0)
    }

    /// Advance to the next row. Returns false once the snapshot is
    /// exhausted; re-iteration requires re-executing the statement.
    pub fn next(&mut self) -> Result<bool, DbError> {
        self.check_open()?;
        let next = self.position.map_or(0, |p| p + 1);
        if next < self.rows.len() {
            self.position = Some(next);
            Ok(true)
        } else {
            self.position = Some(self.rows.len());
            Ok(false)
        }
    }

    /// The current row.
    pub fn current(&self) -> Result<&Record, DbError> {
        self.check_open()?;
        self.position
            .and_then(|p| self.rows.get(p))
            .ok_or(DbError::NoCurrentRow)
    }

    /// A field of the current row, or `None` if the row doesn't carry it.
    pub fn get(&self, field: &str) -> Result<Option<&Value>, DbError> {
        Ok(self.current()?.get(field))
    }

    // ── Kind-checked field access ───────────────────────────────

    pub fn get_i64(&self, field: &str) -> Result<i64, DbError> {
        self.kind_checked(field, "int64", Value::as_i64)
    }

    pub fn get_f64(&self, field: &str) -> Result<f64, DbError> {
        self.kind_checked(field, "float64", Value::as_f64)
    }

    pub fn get_str(&self, field: &str) -> Result<&str, DbError> {
        self.kind_checked(field, "string", Value::as_str)
    }

    pub fn get_bool(&self, field: &str) -> Result<bool, DbError> {
        self.kind_checked(field, "bool", Value::as_bool)
    }

    pub fn get_object_id(&self, field: &str) -> Result<ObjectId, DbError> {
        self.kind_checked(field, "object_id", Value::as_object_id)
    }

    /// Release the snapshot. Safe to call more than once.
    pub fn close(&mut self) {
        self.closed = true;
        self.rows = Vec::new();
        self.position = None;
    }

    fn check_open(&self) -> Result<(), DbError> {
        if self.closed {
            return Err(DbError::ClosedCursor);
        }
        Ok(())
    }

    fn kind_checked<'a, T>(
        &'a self,
        field: &str,
        expected: &'static str,
        accessor: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<T, DbError> {
        let value = self
            .get(field)?
            .ok_or_else(|| DbError::TypeMismatch(format!("field {field} is missing")))?;
        accessor(value).ok_or_else(|| {
            DbError::TypeMismatch(format!(
                "field {field} is {}, expected {expected}",
                value.kind()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor() -> Cursor {
        Cursor::new(vec![
            Record::from_pairs([
                ("_id".to_string(), Value::from("a")),
                ("count".to_string(), Value::Int64(1)),
            ]),
            Record::from_pairs([
                ("_id".to_string(), Value::from("b")),
                ("count".to_string(), Value::Int64(2)),
            ]),
        ])
    }

    #[test]
    fn forward_iteration() {
        let mut c = cursor();
        assert_eq!(c.len().unwrap(), 2);
        assert!(c.next().unwrap());
        assert_eq!(c.get_i64("count").unwrap(), 1);
        assert!(c.next().unwrap());
        assert_eq!(c.get_i64("count").unwrap(), 2);
        assert!(!c.next().unwrap());
    }

    #[test]
    fn access_before_next_errors() {
        let c = cursor();
        assert!(matches!(c.get("count"), Err(DbError::NoCurrentRow)));
    }

    #[test]
    fn access_past_end_errors() {
        let mut c = Cursor::new(vec![]);
        assert!(!c.next().unwrap());
        assert!(matches!(c.get("count"), Err(DbError::NoCurrentRow)));
    }

    #[test]
    fn use_after_close_errors() {
        let mut c = cursor();
        c.close();
        assert!(matches!(c.len(), Err(DbError::ClosedCursor)));
        assert!(matches!(c.next(), Err(DbError::ClosedCursor)));
        assert!(matches!(c.get("count"), Err(DbError::ClosedCursor)));
        // close is idempotent
        c.close();
    }

    #[test]
    fn kind_checked_access() {
        let mut c = cursor();
        c.next().unwrap();
        assert_eq!(c.get_str("_id").unwrap(), "a");
        let err = c.get_f64("count").unwrap_err();
        assert!(matches!(err, DbError::TypeMismatch(_)), "{err}");
        let err = c.get_i64("missing").unwrap_err();
        assert!(matches!(err, DbError::TypeMismatch(_)), "{err}");
    }
}
