mod collection;
mod cursor;
mod database;
mod engine;
mod error;
mod eval;
mod record;

pub use reef_sql::{Kind, Value};

pub use collection::{Collection, InsertOutcome};
pub use cursor::Cursor;
pub use database::Database;
pub use engine::{Engine, EngineConfig};
pub use error::DbError;
pub use record::{ID_FIELD, Record};
