//! Record trait shared by every resource type, and the validated field set fed to repositories.

use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

/// Maximum length of a data column value (columns are `VARCHAR(100)`).
pub const MAX_FIELD_LENGTH: usize = 100;

/// One resource type backed by its own table.
///
/// `TABLE` doubles as the collection path segment (`/pets`, `/books`). `COLUMNS` lists the
/// required data columns, excluding the auto-assigned `id`.
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Human label used in messages, e.g. "Pet deleted successfully."
    const LABEL: &'static str;

    fn id(&self) -> i64;
}

/// Column values for one record type, in insertion order. Built by
/// [`RequestValidator`](crate::service::RequestValidator) or directly by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    values: Vec<(&'static str, String)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column, replacing any previous value.
    pub fn insert(&mut self, column: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.values.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.values.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// First column of `R` that is absent or blank.
    pub fn first_missing<R: Record>(&self) -> Option<&'static str> {
        R::COLUMNS
            .iter()
            .copied()
            .find(|col| self.get(col).map_or(true, |v| v.trim().is_empty()))
    }
}
