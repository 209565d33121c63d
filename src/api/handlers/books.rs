use crate::api::errors::ApiError;
use crate::api::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::api::validation::{Pagination, Validate};
use crate::db::{Book, BookChanges, BookRepository, Database, NewBook};
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

/// Creates a new book for an existing author
///
/// # Returns
/// * `201` with the stored book, `404` if the author is missing, `400` if the ISBN is taken
#[axum::debug_handler]
pub async fn create_book(
    Extension(database): Extension<Database>,
    ApiJson(payload): ApiJson<NewBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    payload.validate()?;
    let mut conn = database.get_conn()?;
    let book = BookRepository::new(&mut conn).create(&payload)?;

    info!(book_id = book.id, author_id = book.author_id, "Created book");
    Ok((StatusCode::CREATED, Json(book)))
}

#[axum::debug_handler]
pub async fn list_books(
    Extension(database): Extension<Database>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<Json<Vec<Book>>, ApiError> {
    page.validate()?;
    let mut conn = database.get_conn()?;
    let books = BookRepository::new(&mut conn).list(page.skip, page.limit)?;
    Ok(Json(books))
}

#[axum::debug_handler]
pub async fn get_book(
    ApiPath(book_id): ApiPath<i32>,
    Extension(database): Extension<Database>,
) -> Result<Json<Book>, ApiError> {
    let mut conn = database.get_conn()?;
    let book = BookRepository::new(&mut conn).get(book_id)?;
    Ok(Json(book))
}

/// Updates the supplied fields of a book, moving it to another author if
/// `author_id` is given
#[axum::debug_handler]
pub async fn update_book(
    ApiPath(book_id): ApiPath<i32>,
    Extension(database): Extension<Database>,
    ApiJson(payload): ApiJson<BookChanges>,
) -> Result<Json<Book>, ApiError> {
    payload.validate()?;
    let mut conn = database.get_conn()?;
    let book = BookRepository::new(&mut conn).update(book_id, &payload)?;

    info!(book_id, "Updated book");
    Ok(Json(book))
}

#[axum::debug_handler]
pub async fn delete_book(
    ApiPath(book_id): ApiPath<i32>,
    Extension(database): Extension<Database>,
) -> Result<StatusCode, ApiError> {
    let mut conn = database.get_conn()?;
    BookRepository::new(&mut conn).delete(book_id)?;

    info!(book_id, "Deleted book");
    Ok(StatusCode::NO_CONTENT)
}

/// Lists every book of an author, without paging
#[axum::debug_handler]
pub async fn list_books_by_author(
    ApiPath(author_id): ApiPath<i32>,
    Extension(database): Extension<Database>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let mut conn = database.get_conn()?;
    let books = BookRepository::new(&mut conn).list_by_author(author_id)?;
    Ok(Json(books))
}
