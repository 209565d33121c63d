use crate::db::models::{Author, AuthorChanges, NewAuthor};
use crate::errors::Error;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

pub const DUPLICATE_EMAIL: &str = "Email already exists";
pub const AUTHOR_HAS_BOOKS: &str = "Cannot delete author with associated books";

/// Repository for managing author records in the SQLite database
pub struct AuthorRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> AuthorRepository<'a> {
    /// Creates a new AuthorRepository instance
    ///
    /// # Arguments
    ///
    /// * `conn` - Mutable reference to SQLite database connection
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        AuthorRepository { conn }
    }

    /// Inserts a new author and returns it with its assigned id
    ///
    /// # Errors
    ///
    /// Returns `Error::Conflict` if the email is already taken
    pub fn create(&mut self, new_author: &NewAuthor) -> Result<Author, Error> {
        use crate::schema::authors;

        self.conn.immediate_transaction(|conn| {
            diesel::insert_into(authors::table)
                .values(new_author)
                .returning(Author::as_returning())
                .get_result(conn)
                .map_err(|e| Error::from_write(e, DUPLICATE_EMAIL))
        })
    }

    /// Lists authors in insertion order, skipping `skip` rows and returning at most `limit`
    pub fn list(&mut self, skip: i64, limit: i64) -> Result<Vec<Author>, Error> {
        use crate::schema::authors::dsl::*;

        let found = authors
            .order_by(id.asc())
            .offset(skip)
            .limit(limit)
            .select(Author::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Retrieves an author by id, or `None` if there is no such author
    pub fn find(&mut self, author_id: i32) -> Result<Option<Author>, Error> {
        use crate::schema::authors::dsl::*;

        let found = authors
            .find(author_id)
            .select(Author::as_select())
            .first(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Retrieves an author by id
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if there is no such author
    pub fn get(&mut self, author_id: i32) -> Result<Author, Error> {
        self.find(author_id)?.ok_or(Error::NotFound("Author"))
    }

    /// Applies the supplied fields of `changes` to an author
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the author does not exist and
    /// `Error::Conflict` if the new email is already taken
    pub fn update(&mut self, author_id: i32, changes: &AuthorChanges) -> Result<Author, Error> {
        use crate::schema::authors;

        self.conn.immediate_transaction(|conn| {
            let current = AuthorRepository::new(conn).get(author_id)?;
            if changes.is_empty() {
                return Ok(current);
            }

            diesel::update(authors::table.find(author_id))
                .set(changes)
                .returning(Author::as_returning())
                .get_result(conn)
                .map_err(|e| Error::from_write(e, DUPLICATE_EMAIL))
        })
    }

    /// Deletes an author that owns no books
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the author does not exist and
    /// `Error::Conflict` while any book still references it
    pub fn delete(&mut self, author_id: i32) -> Result<(), Error> {
        use crate::schema::{authors, books};

        self.conn.immediate_transaction(|conn| {
            AuthorRepository::new(conn).get(author_id)?;

            let owned: i64 = books::table
                .filter(books::author_id.eq(author_id))
                .count()
                .get_result(conn)?;
            if owned > 0 {
                return Err(Error::Conflict(AUTHOR_HAS_BOOKS.to_string()));
            }

            diesel::delete(authors::table.find(author_id)).execute(conn)?;
            Ok(())
        })
    }
}
