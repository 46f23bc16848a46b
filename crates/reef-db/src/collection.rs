use std::collections::HashMap;

use bson::oid::ObjectId;
use reef_sql::{Expression, Sort, SortDirection, Value};

use crate::eval;
use crate::record::{ID_FIELD, Record};

/// Outcome of a batched insert: the rows that made it in, and how many
/// were rejected row-locally (duplicate id or malformed row).
#[derive(Debug)]
pub struct InsertOutcome {
    pub inserted: Vec<Record>,
    pub skipped: usize,
}

/// An insertion-ordered store of records enforcing identifier uniqueness.
///
/// Positions are tracked in an id-token → position index; no two live
/// records ever share an identifier. The store is schemaless — declared
/// columns are retained for introspection only.
#[derive(Debug)]
pub struct Collection {
    name: String,
    columns: Vec<String>,
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl Collection {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Collection {
        Collection {
            name: name.into(),
            columns,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns declared at CREATE TABLE time, possibly empty.
    pub fn declared_columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn scan(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    // ── Mutation ────────────────────────────────────────────────

    /// Insert a batch of records in order.
    ///
    /// A record without an `_id` gets a generated ObjectId. A record whose
    /// id is already live, or whose id is not an identifier-capable kind,
    /// is skipped — never an error (idempotent insert is a business rule).
    pub fn insert(&mut self, records: Vec<Record>) -> InsertOutcome {
        let mut inserted = Vec::new();
        let mut skipped = 0;

        for mut record in records {
            if record.id().is_none() {
                record.set(ID_FIELD, Value::ObjectId(ObjectId::new()));
            }
            let token = match record.id_token() {
                Some(token) => token,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            if self.index.contains_key(&token) {
                skipped += 1;
                continue;
            }
            self.index.insert(token, self.records.len());
            inserted.push(record.clone());
            self.records.push(record);
        }

        InsertOutcome { inserted, skipped }
    }

    /// Remove every record matching the predicate (all records when absent)
    /// and return the removed set in insertion order.
    pub fn delete(&mut self, predicate: Option<&Expression>) -> Vec<Record> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.records.len());
        for record in self.records.drain(..) {
            if matches_opt(&record, predicate) {
                removed.push(record);
            } else {
                kept.push(record);
            }
        }
        self.records = kept;
        self.rebuild_index();
        removed
    }

    /// Apply assignments to every record matching the predicate, replacing
    /// each in place, and return the post-update records.
    ///
    /// A row whose `_id` would be reassigned onto another live record's id
    /// is skipped to preserve uniqueness; the statement still succeeds.
    pub fn update(
        &mut self,
        predicate: Option<&Expression>,
        assignments: &[(String, Value)],
    ) -> Vec<Record> {
        let mut updated = Vec::new();

        for pos in 0..self.records.len() {
            if !matches_opt(&self.records[pos], predicate) {
                continue;
            }
            let candidate = self.records[pos].with_assignments(assignments);
            let Some(old_token) = self.records[pos].id_token() else {
                continue;
            };
            let new_token = match candidate.id_token() {
                Some(token) => token,
                // id reassigned to a non-identifier kind: reject the row
                None => continue,
            };
            if new_token != old_token {
                if self.index.contains_key(&new_token) {
                    continue;
                }
                self.index.remove(&old_token);
                self.index.insert(new_token, pos);
            }
            self.records[pos] = candidate.clone();
            updated.push(candidate);
        }

        updated
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Matching records as an owned snapshot, optionally sorted.
    ///
    /// The sort is stable: ties (and cross-kind or missing-field pairs,
    /// which compare as equal-or-first) keep insertion order.
    pub fn select(&self, predicate: Option<&Expression>, order: Option<&Sort>) -> Vec<Record> {
        let mut rows: Vec<Record> = self
            .records
            .iter()
            .filter(|record| matches_opt(record, predicate))
            .cloned()
            .collect();

        if let Some(sort) = order {
            rows.sort_by(|a, b| {
                let ordering = sort_cmp(a.get(&sort.field), b.get(&sort.field));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        rows
    }

    /// Count matching records without materializing them.
    pub fn count(&self, predicate: Option<&Expression>) -> usize {
        self.records
            .iter()
            .filter(|record| matches_opt(record, predicate))
            .count()
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (pos, record) in self.records.iter().enumerate() {
            if let Some(token) = record.id_token() {
                self.index.insert(token, pos);
            }
        }
    }
}

fn matches_opt(record: &Record, predicate: Option<&Expression>) -> bool {
    predicate.is_none_or(|expr| eval::matches(record, expr))
}

/// Sort comparator: missing fields sort first; incomparable pairs sort as
/// equal so stability decides.
fn sort_cmp(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b).unwrap_or(Ordering::Equal),
    }
}
