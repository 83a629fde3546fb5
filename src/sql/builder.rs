//! Builds parameterized INSERT, SELECT, UPDATE, DELETE and table DDL from a record type.

use crate::record::{Fields, Record, MAX_FIELD_LENGTH};

/// Quote identifier for SQLite (safe: only from `Record` constants).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<String>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: &str) {
        self.params.push(v.to_string());
    }
}

/// `"id", <columns...>` in declaration order.
fn select_column_list<R: Record>() -> String {
    std::iter::once("id")
        .chain(R::COLUMNS.iter().copied())
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// CREATE TABLE IF NOT EXISTS with an autoincrement id and NOT NULL text columns.
pub fn create_table<R: Record>() -> String {
    let mut defs = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quoted("id"))];
    for col in R::COLUMNS {
        defs.push(format!("{} VARCHAR({}) NOT NULL", quoted(col), MAX_FIELD_LENGTH));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(R::TABLE),
        defs.join(", ")
    )
}

/// INSERT every column of `R`, in `COLUMNS` order. Caller guarantees all columns are present.
pub fn insert<R: Record>(fields: &Fields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols: Vec<String> = R::COLUMNS.iter().map(|c| quoted(c)).collect();
    let placeholders: Vec<&str> = R::COLUMNS.iter().map(|_| "?").collect();
    for col in R::COLUMNS {
        q.push_param(fields.get(col).unwrap_or_default());
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(R::TABLE),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list::<R>()
    );
    q
}

pub fn select_list<R: Record>() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list::<R>(),
        quoted(R::TABLE),
        quoted("id")
    )
}

pub fn select_by_id<R: Record>() -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = ?",
        select_column_list::<R>(),
        quoted(R::TABLE),
        quoted("id")
    )
}

/// UPDATE only the columns present in `fields`; the id is bound last by the caller.
/// Returns None when no known column is present.
pub fn update<R: Record>(fields: &Fields) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for col in R::COLUMNS {
        if let Some(v) = fields.get(col) {
            sets.push(format!("{} = ?", quoted(col)));
            q.push_param(v);
        }
    }
    if sets.is_empty() {
        return None;
    }
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ? RETURNING {}",
        quoted(R::TABLE),
        sets.join(", "),
        quoted("id"),
        select_column_list::<R>()
    );
    Some(q)
}

pub fn delete<R: Record>() -> String {
    format!(
        "DELETE FROM {} WHERE {} = ? RETURNING {}",
        quoted(R::TABLE),
        quoted("id"),
        select_column_list::<R>()
    )
}

pub fn count<R: Record>() -> String {
    format!("SELECT COUNT(*) FROM {}", quoted(R::TABLE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, Pet};

    #[test]
    fn insert_binds_columns_in_declaration_order() {
        let fields = Fields::new().with("species", "Cat").with("name", "Tom");
        let q = insert::<Pet>(&fields);
        assert_eq!(
            q.sql,
            r#"INSERT INTO "pets" ("name", "species") VALUES (?, ?) RETURNING "id", "name", "species""#
        );
        assert_eq!(q.params, vec!["Tom".to_string(), "Cat".to_string()]);
    }

    #[test]
    fn update_sets_only_present_columns() {
        let fields = Fields::new().with("author", "Ursula K. Le Guin");
        let q = update::<Book>(&fields).unwrap();
        assert_eq!(
            q.sql,
            r#"UPDATE "books" SET "author" = ? WHERE "id" = ? RETURNING "id", "title", "author""#
        );
        assert_eq!(q.params, vec!["Ursula K. Le Guin".to_string()]);
    }

    #[test]
    fn update_without_known_columns_is_none() {
        assert!(update::<Book>(&Fields::new()).is_none());
        assert!(update::<Book>(&Fields::new().with("name", "x")).is_none());
    }

    #[test]
    fn table_ddl_is_idempotent_and_not_null() {
        assert_eq!(
            create_table::<Pet>(),
            r#"CREATE TABLE IF NOT EXISTS "pets" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "name" VARCHAR(100) NOT NULL, "species" VARCHAR(100) NOT NULL)"#
        );
    }

    #[test]
    fn read_statements_target_the_record_table() {
        assert_eq!(
            select_by_id::<Book>(),
            r#"SELECT "id", "title", "author" FROM "books" WHERE "id" = ?"#
        );
        assert!(select_list::<Pet>().ends_with(r#"ORDER BY "id""#));
        assert_eq!(count::<Pet>(), r#"SELECT COUNT(*) FROM "pets""#);
        assert!(delete::<Pet>().starts_with(r#"DELETE FROM "pets" WHERE "id" = ?"#));
    }
}
