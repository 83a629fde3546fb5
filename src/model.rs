//! Pet and book records.

use crate::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: String,
}

impl Record for Pet {
    const TABLE: &'static str = "pets";
    const COLUMNS: &'static [&'static str] = &["name", "species"];
    const LABEL: &'static str = "Pet";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}

impl Record for Book {
    const TABLE: &'static str = "books";
    const COLUMNS: &'static [&'static str] = &["title", "author"];
    const LABEL: &'static str = "Book";

    fn id(&self) -> i64 {
        self.id
    }
}
