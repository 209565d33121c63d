//! API routes configuration module

use crate::api::handlers::authors::{
    create_author, delete_author, get_author, list_authors, update_author,
};
use crate::api::handlers::books::{
    create_book, delete_book, get_book, list_books, list_books_by_author, update_book,
};
use crate::db::Database;
use axum::{routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `database` - Database connection pool to be shared across handlers
///
/// # Returns
/// * `Router` - Configured router with all API endpoints and middleware
pub fn app(database: Database) -> Router {
    Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route("/authors/", get(list_authors).post(create_author))
        .route(
            "/authors/:author_id",
            get(get_author).put(update_author).delete(delete_author),
        )
        .route("/books", get(list_books).post(create_book))
        .route("/books/", get(list_books).post(create_book))
        .route(
            "/books/:book_id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/books/author/:author_id", get(list_books_by_author))
        .layer(Extension(database))
        .layer(TraceLayer::new_for_http())
}
