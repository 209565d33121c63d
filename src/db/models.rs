use crate::schema::{authors, books};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Deserializer, Serialize};

/// Represents an author in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = authors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Author {
    /// Store-assigned identifier
    pub id: i32,
    /// Display name of the author
    pub name: String,
    /// Contact email, unique across authors
    pub email: String,
}

/// Payload used to insert a new author
#[derive(Debug, Clone, Deserialize, Insertable)]
#[diesel(table_name = authors)]
pub struct NewAuthor {
    pub name: String,
    pub email: String,
}

/// Partial update of an author. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default, Deserialize, AsChangeset)]
#[diesel(table_name = authors)]
pub struct AuthorChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl AuthorChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Represents a book in the database
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Identifiable,
)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Book {
    /// Store-assigned identifier
    pub id: i32,
    /// Title of the book
    pub title: String,
    /// ISBN, unique across books
    pub isbn: String,
    /// Year the book was published, if known
    pub publication_year: Option<i32>,
    /// Number of copies the library can lend out
    pub available_copies: i32,
    /// Owning author
    pub author_id: i32,
}

fn default_copies() -> i32 {
    1
}

/// Payload used to insert a new book
#[derive(Debug, Clone, Deserialize, Insertable)]
#[diesel(table_name = books)]
pub struct NewBook {
    pub title: String,
    pub isbn: String,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default = "default_copies")]
    pub available_copies: i32,
    pub author_id: i32,
}

/// Reads a present field as `Some`, even when its value is `null`. Paired with
/// `#[serde(default)]` an absent field stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update of a book. Fields left as `None` are not touched;
/// `publication_year: Some(None)` clears the year.
#[derive(Debug, Clone, Default, Deserialize, AsChangeset)]
#[diesel(table_name = books)]
pub struct BookChanges {
    pub title: Option<String>,
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub publication_year: Option<Option<i32>>,
    pub available_copies: Option<i32>,
    pub author_id: Option<i32>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.isbn.is_none()
            && self.publication_year.is_none()
            && self.available_copies.is_none()
            && self.author_id.is_none()
    }
}
