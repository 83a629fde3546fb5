//! CRUD routes for one record type: `/{table}` and `/{table}/:id`.

use crate::handlers::resource::{create, delete as delete_handler, list, read, update};
use crate::record::Record;
use crate::service::Repository;
use axum::{routing::get, Router};

pub fn resource_routes<R: Record>(repo: Repository<R>) -> Router {
    let collection = format!("/{}", R::TABLE);
    let item = format!("/{}/:id", R::TABLE);
    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(
            &item,
            get(read::<R>).put(update::<R>).delete(delete_handler::<R>),
        )
        .with_state(repo)
}
