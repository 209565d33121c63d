use crate::api::errors::ApiError;
use crate::api::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::api::validation::{Pagination, Validate};
use crate::db::{Author, AuthorChanges, AuthorRepository, Database, NewAuthor};
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

/// Creates a new author
///
/// # Returns
/// * `201` with the stored author, `400` if the email is taken
#[axum::debug_handler]
pub async fn create_author(
    Extension(database): Extension<Database>,
    ApiJson(payload): ApiJson<NewAuthor>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    payload.validate()?;
    let mut conn = database.get_conn()?;
    let author = AuthorRepository::new(&mut conn).create(&payload)?;

    info!(author_id = author.id, "Created author");
    Ok((StatusCode::CREATED, Json(author)))
}

/// Lists one page of authors in insertion order
#[axum::debug_handler]
pub async fn list_authors(
    Extension(database): Extension<Database>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<Json<Vec<Author>>, ApiError> {
    page.validate()?;
    let mut conn = database.get_conn()?;
    let authors = AuthorRepository::new(&mut conn).list(page.skip, page.limit)?;
    Ok(Json(authors))
}

#[axum::debug_handler]
pub async fn get_author(
    ApiPath(author_id): ApiPath<i32>,
    Extension(database): Extension<Database>,
) -> Result<Json<Author>, ApiError> {
    let mut conn = database.get_conn()?;
    let author = AuthorRepository::new(&mut conn).get(author_id)?;
    Ok(Json(author))
}

/// Updates the supplied fields of an author
///
/// # Returns
/// * `200` with the updated author, `404` if missing, `400` if the new email is taken
#[axum::debug_handler]
pub async fn update_author(
    ApiPath(author_id): ApiPath<i32>,
    Extension(database): Extension<Database>,
    ApiJson(payload): ApiJson<AuthorChanges>,
) -> Result<Json<Author>, ApiError> {
    payload.validate()?;
    let mut conn = database.get_conn()?;
    let author = AuthorRepository::new(&mut conn).update(author_id, &payload)?;

    info!(author_id, "Updated author");
    Ok(Json(author))
}

/// Deletes an author that owns no books
///
/// # Returns
/// * `204` on success, `404` if missing, `400` while books reference the author
#[axum::debug_handler]
pub async fn delete_author(
    ApiPath(author_id): ApiPath<i32>,
    Extension(database): Extension<Database>,
) -> Result<StatusCode, ApiError> {
    let mut conn = database.get_conn()?;
    AuthorRepository::new(&mut conn).delete(author_id)?;

    info!(author_id, "Deleted author");
    Ok(StatusCode::NO_CONTENT)
}
