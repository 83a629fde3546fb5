//! Resource CRUD handlers: create, list, read, update, delete. Generic over the record type.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::record::Record;
use crate::response::{created, message, ok};
use crate::service::{Repository, RequestValidator};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

/// Only plain decimal digits name a record; anything else (signs, spaces, overflow) is unknown.
fn parse_id<R: Record>(id_str: &str) -> Result<i64, AppError> {
    let not_found = || AppError::NotFound(format!("{} {}", R::LABEL.to_lowercase(), id_str));
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found());
    }
    id_str.parse().map_err(|_| not_found())
}

pub async fn list<R: Record>(
    State(repo): State<Repository<R>>,
) -> Result<impl IntoResponse, AppError> {
    let rows = repo.list().await?;
    Ok(ok(rows))
}

pub async fn create<R: Record>(
    State(repo): State<Repository<R>>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let fields = RequestValidator::required::<R>(&body)?;
    let row = repo.create(&fields).await?;
    Ok(created(row))
}

pub async fn read<R: Record>(
    State(repo): State<Repository<R>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id::<R>(&id_str)?;
    let row = repo.get_by_id(id).await?;
    Ok(ok(row))
}

/// An unknown id is reported before any problem with the body.
pub async fn update<R: Record>(
    State(repo): State<Repository<R>>,
    Path(id_str): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id::<R>(&id_str)?;
    repo.get_by_id(id).await?;
    let JsonObject(body) = body?;
    let fields = RequestValidator::partial::<R>(&body)?;
    let row = repo.update(id, &fields).await?;
    Ok(ok(row))
}

pub async fn delete<R: Record>(
    State(repo): State<Repository<R>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id::<R>(&id_str)?;
    repo.delete(id).await?;
    Ok(message(format!("{} deleted successfully.", R::LABEL)))
}
