use crate::expression::Expression;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// An ORDER BY clause: one field, one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// What a SELECT statement returns per row.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// `SELECT *`
    All,
    /// `SELECT a, b, c`
    Columns(Vec<String>),
    /// `SELECT COUNT(*)` — a single synthetic `{count: N}` row.
    Count,
}

/// A fully qualified collection reference: `database.collection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRef {
    pub database: String,
    pub collection: String,
}

impl std::fmt::Display for CollectionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}

/// A parsed statement, ready for execution.
///
/// This is syntax only — whether the referenced database or collection
/// exists is the engine's concern.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateDatabase {
        name: String,
    },
    CreateTable {
        target: CollectionRef,
        /// Declared column names. The store is schemaless; these are kept
        /// for introspection only.
        columns: Vec<String>,
    },
    DropDatabase {
        name: String,
    },
    DropTable {
        target: CollectionRef,
    },
    Insert {
        target: CollectionRef,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    Select {
        target: CollectionRef,
        projection: Projection,
        predicate: Option<Expression>,
        order: Option<Sort>,
    },
    Update {
        target: CollectionRef,
        assignments: Vec<(String, Value)>,
        predicate: Option<Expression>,
    },
    Delete {
        target: CollectionRef,
        predicate: Option<Expression>,
    },
}
