//! SQLite storage gateway.
//!
//! # Responsibility
//! - Open and configure SQLite connections for school records.
//! - Create the schema and seed the default administrator.
//!
//! # Invariants
//! - Core code must not read/write records before `initialize` succeeds.
//! - Initialization is idempotent and safe on every process start.
//! - A `DbError` from open/initialize is unrecoverable; callers must not retry.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{initialize, open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Store failure: connection, schema or seed errors.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "store path error: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
