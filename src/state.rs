//! Shared application state: one repository per resource, built once at startup.

use crate::model::{Book, Pet};
use crate::service::Repository;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub pets: Repository<Pet>,
    pub books: Repository<Book>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pets: Repository::new(pool.clone()),
            books: Repository::new(pool.clone()),
            pool,
        }
    }
}
