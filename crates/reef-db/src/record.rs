use reef_sql::Value;
use serde::{Deserialize, Serialize};

/// The distinguished identifier field.
pub const ID_FIELD: &str = "_id";

/// An insertion-ordered mapping of field name to value.
///
/// Field sets need not be uniform across a collection; a field absent from
/// a record is "missing" for predicate purposes. Records handed out of the
/// store are snapshots — mutation always produces a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Record {
        Record { fields: Vec::new() }
    }

    /// Build a record from name/value pairs. A repeated name keeps the last
    /// value but the first position.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Value)>) -> Record {
        let mut record = Record::new();
        for (name, value) in pairs {
            record.set(name, value);
        }
        record
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Set a field, replacing in place if it exists (field order is part of
    /// the record's identity) or appending otherwise.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn id(&self) -> Option<&Value> {
        self.get(ID_FIELD)
    }

    /// The identifier rendered as its index token, if present and of an
    /// identifier-capable kind.
    pub fn id_token(&self) -> Option<String> {
        self.id().and_then(Value::id_token)
    }

    /// A copy with the given fields replaced (or added); everything else
    /// is carried over unchanged.
    pub fn with_assignments(&self, assignments: &[(String, Value)]) -> Record {
        let mut updated = self.clone();
        for (field, value) in assignments {
            updated.set(field.clone(), value.clone());
        }
        updated
    }

    /// A copy reduced to the named fields, in the order given. Missing
    /// fields are simply absent from the projection.
    pub fn project(&self, columns: &[String]) -> Record {
        let mut projected = Record::new();
        for column in columns {
            if let Some(value) = self.get(column) {
                projected.set(column.clone(), value.clone());
            }
        }
        projected
    }
}

impl Default for Record {
    fn default() -> Self {
        Record::new()
    }
}
