//! Generic single-row CRUD against SQLite, one repository per record type.

use crate::error::AppError;
use crate::record::{Fields, Record};
use crate::sql::{self, QueryBuf};
use sqlx::SqlitePool;
use std::marker::PhantomData;

/// Persistence for one record type. Cheap to clone (shares the pool).
pub struct Repository<R> {
    pool: SqlitePool,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Repository<R> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    /// Insert a new row; the id is assigned by the database. Every column of `R` must be present and non-blank.
    pub async fn create(&self, fields: &Fields) -> Result<R, AppError> {
        if let Some(col) = fields.first_missing::<R>() {
            return Err(AppError::Validation(format!("{} is required", col)));
        }
        let q = sql::insert::<R>(fields);
        let row = self
            .fetch_optional(&q, None)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        tracing::info!(table = R::TABLE, id = row.id(), "created");
        Ok(row)
    }

    /// All rows, ordered by id.
    pub async fn list(&self) -> Result<Vec<R>, AppError> {
        let sql = sql::select_list::<R>();
        tracing::debug!(table = R::TABLE, sql = %sql, "query");
        let rows = sqlx::query_as::<_, R>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<R, AppError> {
        let sql = sql::select_by_id::<R>();
        tracing::debug!(table = R::TABLE, sql = %sql, id, "query");
        sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found::<R>(id))
    }

    /// Overwrite only the columns present in `fields`. An empty set leaves the row as is.
    pub async fn update(&self, id: i64, fields: &Fields) -> Result<R, AppError> {
        let Some(q) = sql::update::<R>(fields) else {
            return self.get_by_id(id).await;
        };
        let row = self
            .fetch_optional(&q, Some(id))
            .await?
            .ok_or_else(|| not_found::<R>(id))?;
        tracing::info!(table = R::TABLE, id, "updated");
        Ok(row)
    }

    /// Remove a row permanently. Returns the deleted row.
    pub async fn delete(&self, id: i64) -> Result<R, AppError> {
        let q = QueryBuf {
            sql: sql::delete::<R>(),
            params: Vec::new(),
        };
        let row = self
            .fetch_optional(&q, Some(id))
            .await?
            .ok_or_else(|| not_found::<R>(id))?;
        tracing::info!(table = R::TABLE, id, "deleted");
        Ok(row)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let sql = sql::count::<R>();
        tracing::debug!(table = R::TABLE, sql = %sql, "query");
        let n = sqlx::query_scalar::<_, i64>(&sql).fetch_one(&self.pool).await?;
        Ok(n)
    }

    /// Run a RETURNING statement: text params in order, then the id (if any) last.
    async fn fetch_optional(&self, q: &QueryBuf, id: Option<i64>) -> Result<Option<R>, AppError> {
        tracing::debug!(table = R::TABLE, sql = %q.sql, params = ?q.params, id = ?id, "query");
        let mut query = sqlx::query_as::<_, R>(&q.sql);
        for p in &q.params {
            query = query.bind(p.as_str());
        }
        if let Some(id) = id {
            query = query.bind(id);
        }
        let row = query.fetch_optional(&self.pool).await?;
        Ok(row)
    }
}

fn not_found<R: Record>(id: i64) -> AppError {
    AppError::NotFound(format!("{} {}", R::LABEL.to_lowercase(), id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, Pet};
    use crate::store;

    async fn pets() -> Repository<Pet> {
        let pool = store::connect_memory().await.unwrap();
        store::ensure_tables(&pool).await.unwrap();
        Repository::new(pool)
    }

    fn rex() -> Fields {
        Fields::new().with("name", "Rex").with("species", "Dog")
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids() {
        let repo = pets().await;
        let a = repo.create(&rex()).await.unwrap();
        let b = repo.create(&rex()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(repo.get_by_id(a.id).await.unwrap(), a);
    }

    #[tokio::test]
    async fn create_with_missing_column_persists_nothing() {
        let repo = pets().await;
        let err = repo
            .create(&Fields::new().with("species", "Dog"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_changes_only_given_columns() {
        let repo = pets().await;
        let pet = repo.create(&rex()).await.unwrap();
        let updated = repo
            .update(pet.id, &Fields::new().with("name", "Max"))
            .await
            .unwrap();
        assert_eq!(updated.id, pet.id);
        assert_eq!(updated.name, "Max");
        assert_eq!(updated.species, "Dog");

        let same = repo.update(pet.id, &Fields::new()).await.unwrap();
        assert_eq!(same, updated);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let repo = pets().await;
        assert!(matches!(repo.get_by_id(999_999).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.update(999_999, &rex()).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.update(999_999, &Fields::new()).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.delete(999_999).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_row_and_ids_are_not_reused() {
        let repo = pets().await;
        let first = repo.create(&rex()).await.unwrap();
        let deleted = repo.delete(first.id).await.unwrap();
        assert_eq!(deleted, first);
        assert!(matches!(repo.get_by_id(first.id).await, Err(AppError::NotFound(_))));

        let second = repo.create(&rex()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let pool = store::connect_memory().await.unwrap();
        store::ensure_tables(&pool).await.unwrap();
        let pets: Repository<Pet> = Repository::new(pool.clone());
        let books: Repository<Book> = Repository::new(pool);

        pets.create(&rex()).await.unwrap();
        books
            .create(&Fields::new().with("title", "Dune").with("author", "Frank Herbert"))
            .await
            .unwrap();
        pets.create(&rex()).await.unwrap();

        assert_eq!(pets.list().await.unwrap().len(), 2);
        let all_books = books.list().await.unwrap();
        assert_eq!(all_books.len(), 1);
        assert_eq!(all_books[0].title, "Dune");
    }
}
