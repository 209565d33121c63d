use crate::db::author_repository::AuthorRepository;
use crate::db::models::{Book, BookChanges, NewBook};
use crate::errors::Error;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

pub const DUPLICATE_ISBN: &str = "ISBN already exists";

/// Repository for managing book records in the SQLite database
pub struct BookRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> BookRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        BookRepository { conn }
    }

    /// Inserts a new book for an existing author
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if `author_id` does not reference an author and
    /// `Error::Conflict` if the ISBN is already taken
    pub fn create(&mut self, new_book: &NewBook) -> Result<Book, Error> {
        use crate::schema::books;

        self.conn.immediate_transaction(|conn| {
            AuthorRepository::new(conn).get(new_book.author_id)?;

            diesel::insert_into(books::table)
                .values(new_book)
                .returning(Book::as_returning())
                .get_result(conn)
                .map_err(|e| Error::from_write(e, DUPLICATE_ISBN))
        })
    }

    /// Lists books in insertion order, skipping `skip` rows and returning at most `limit`
    pub fn list(&mut self, skip: i64, limit: i64) -> Result<Vec<Book>, Error> {
        use crate::schema::books::dsl::*;

        let found = books
            .order_by(id.asc())
            .offset(skip)
            .limit(limit)
            .select(Book::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Retrieves a book by id
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if there is no such book
    pub fn get(&mut self, book_id: i32) -> Result<Book, Error> {
        use crate::schema::books::dsl::*;

        books
            .find(book_id)
            .select(Book::as_select())
            .first(self.conn)
            .optional()?
            .ok_or(Error::NotFound("Book"))
    }

    /// Applies the supplied fields of `changes` to a book. A new `author_id`
    /// must reference an existing author.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for a missing book or author and
    /// `Error::Conflict` if the new ISBN is already taken
    pub fn update(&mut self, book_id: i32, changes: &BookChanges) -> Result<Book, Error> {
        use crate::schema::books;

        self.conn.immediate_transaction(|conn| {
            let current = BookRepository::new(conn).get(book_id)?;
            if let Some(new_author) = changes.author_id {
                AuthorRepository::new(conn).get(new_author)?;
            }
            if changes.is_empty() {
                return Ok(current);
            }

            diesel::update(books::table.find(book_id))
                .set(changes)
                .returning(Book::as_returning())
                .get_result(conn)
                .map_err(|e| Error::from_write(e, DUPLICATE_ISBN))
        })
    }

    /// Deletes a book
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if there is no such book
    pub fn delete(&mut self, book_id: i32) -> Result<(), Error> {
        use crate::schema::books;

        self.conn.immediate_transaction(|conn| {
            let removed = diesel::delete(books::table.find(book_id)).execute(conn)?;
            if removed == 0 {
                return Err(Error::NotFound("Book"));
            }
            Ok(())
        })
    }

    /// Retrieves every book written by an author, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the author does not exist
    pub fn list_by_author(&mut self, the_author_id: i32) -> Result<Vec<Book>, Error> {
        use crate::schema::books::dsl::*;

        AuthorRepository::new(self.conn).get(the_author_id)?;

        let found = books
            .filter(author_id.eq(the_author_id))
            .order_by(id.asc())
            .select(Book::as_select())
            .load(self.conn)?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::temp_database;
    use crate::db::{Author, NewAuthor};

    fn author(conn: &mut SqliteConnection, email: &str) -> Author {
        AuthorRepository::new(conn)
            .create(&NewAuthor {
                name: "Writer".to_string(),
                email: email.to_string(),
            })
            .unwrap()
    }

    fn new_book(isbn: &str, author_id: i32) -> NewBook {
        NewBook {
            title: format!("Book {isbn}"),
            isbn: isbn.to_string(),
            publication_year: Some(1999),
            available_copies: 2,
            author_id,
        }
    }

    #[test]
    fn create_requires_existing_author() {
        let (_dir, db) = temp_database();
        let mut conn = db.get_conn().unwrap();

        let err = BookRepository::new(&mut conn)
            .create(&new_book("isbn-1", 42))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound("Author")));
    }

    #[test]
    fn duplicate_isbn_is_a_conflict() {
        let (_dir, db) = temp_database();
        let mut conn = db.get_conn().unwrap();
        let writer = author(&mut conn, "w@example.com");
        let mut repo = BookRepository::new(&mut conn);

        let created = repo.create(&new_book("isbn-1", writer.id)).unwrap();
        assert_eq!(repo.get(created.id).unwrap(), created);

        let err = repo.create(&new_book("isbn-1", writer.id)).unwrap_err();
        assert!(matches!(err, Error::Conflict(ref m) if m == DUPLICATE_ISBN));
    }

    #[test]
    fn update_checks_new_author() {
        let (_dir, db) = temp_database();
        let mut conn = db.get_conn().unwrap();
        let first = author(&mut conn, "first@example.com");
        let second = author(&mut conn, "second@example.com");
        let mut repo = BookRepository::new(&mut conn);
        let book = repo.create(&new_book("isbn-1", first.id)).unwrap();

        let bad = BookChanges {
            author_id: Some(999),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(book.id, &bad),
            Err(Error::NotFound("Author"))
        ));
        assert_eq!(repo.get(book.id).unwrap().author_id, first.id);

        let good = BookChanges {
            author_id: Some(second.id),
            title: Some("Moved".to_string()),
            ..Default::default()
        };
        let moved = repo.update(book.id, &good).unwrap();
        assert_eq!(moved.author_id, second.id);
        assert_eq!(moved.title, "Moved");
        assert_eq!(moved.isbn, "isbn-1");
        assert_eq!(repo.get(book.id).unwrap(), moved);
    }

    #[test]
    fn update_can_clear_publication_year() {
        let (_dir, db) = temp_database();
        let mut conn = db.get_conn().unwrap();
        let writer = author(&mut conn, "w@example.com");
        let mut repo = BookRepository::new(&mut conn);
        let book = repo.create(&new_book("isbn-1", writer.id)).unwrap();
        assert_eq!(book.publication_year, Some(1999));

        let keep = BookChanges {
            title: Some("Kept year".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.update(book.id, &keep).unwrap().publication_year, Some(1999));

        let clear = BookChanges {
            publication_year: Some(None),
            ..Default::default()
        };
        let cleared = repo.update(book.id, &clear).unwrap();
        assert_eq!(cleared.publication_year, None);
        assert_eq!(repo.get(book.id).unwrap().publication_year, None);
    }

    #[test]
    fn update_missing_book_wins_over_missing_author() {
        let (_dir, db) = temp_database();
        let mut conn = db.get_conn().unwrap();
        let changes = BookChanges {
            author_id: Some(7),
            ..Default::default()
        };
        assert!(matches!(
            BookRepository::new(&mut conn).update(1, &changes),
            Err(Error::NotFound("Book"))
        ));
    }

    #[test]
    fn update_duplicate_isbn_rolls_back() {
        let (_dir, db) = temp_database();
        let mut conn = db.get_conn().unwrap();
        let writer = author(&mut conn, "w@example.com");
        let mut repo = BookRepository::new(&mut conn);
        let a = repo.create(&new_book("isbn-a", writer.id)).unwrap();
        repo.create(&new_book("isbn-b", writer.id)).unwrap();

        let changes = BookChanges {
            title: Some("Renamed".to_string()),
            isbn: Some("isbn-b".to_string()),
            ..Default::default()
        };
        assert!(matches!(repo.update(a.id, &changes), Err(Error::Conflict(_))));
        assert_eq!(repo.get(a.id).unwrap(), a);
    }

    #[test]
    fn delete_is_unconditional_but_not_repeatable() {
        let (_dir, db) = temp_database();
        let mut conn = db.get_conn().unwrap();
        let writer = author(&mut conn, "w@example.com");
        let mut repo = BookRepository::new(&mut conn);
        let book = repo.create(&new_book("isbn-1", writer.id)).unwrap();

        repo.delete(book.id).unwrap();
        assert!(matches!(repo.get(book.id), Err(Error::NotFound("Book"))));
        assert!(matches!(repo.delete(book.id), Err(Error::NotFound("Book"))));
    }

    #[test]
    fn list_by_author_returns_exactly_their_books() {
        let (_dir, db) = temp_database();
        let mut conn = db.get_conn().unwrap();
        let busy = author(&mut conn, "busy@example.com");
        let idle = author(&mut conn, "idle@example.com");
        let other = author(&mut conn, "other@example.com");
        let mut repo = BookRepository::new(&mut conn);

        let b1 = repo.create(&new_book("isbn-1", busy.id)).unwrap();
        repo.create(&new_book("isbn-2", other.id)).unwrap();
        let b3 = repo.create(&new_book("isbn-3", busy.id)).unwrap();

        assert_eq!(repo.list_by_author(busy.id).unwrap(), vec![b1, b3]);
        assert!(repo.list_by_author(idle.id).unwrap().is_empty());
        assert!(matches!(
            repo.list_by_author(999),
            Err(Error::NotFound("Author"))
        ));
        assert_eq!(repo.list(1, 1).unwrap().len(), 1);
    }
}
