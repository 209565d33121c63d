use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Errors raised by the catalog's data layer and request validation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("Diesel error: {0}")]
    DieselError(#[from] DieselError),
    #[error("Connection pool error: {0}")]
    PoolError(#[from] PoolError),
}

impl Error {
    /// Turns a failed write into a `Conflict` when the store rejected it on a
    /// unique constraint, and into a missing author when a foreign key did not
    /// resolve. Anything else passes through unchanged.
    pub fn from_write(err: DieselError, conflict_message: &str) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Error::Conflict(conflict_message.to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                Error::NotFound("Author")
            }
            other => Error::DieselError(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Info(&'static str);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn unique_violation_becomes_conflict() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(Info("UNIQUE constraint failed: authors.email")),
        );
        match Error::from_write(err, "Email already exists") {
            Error::Conflict(msg) => assert_eq!(msg, "Email already exists"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn foreign_key_violation_becomes_missing_author() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new(Info("FOREIGN KEY constraint failed")),
        );
        assert!(matches!(
            Error::from_write(err, "ISBN already exists"),
            Error::NotFound("Author")
        ));
    }

    #[test]
    fn other_errors_pass_through() {
        assert!(matches!(
            Error::from_write(DieselError::NotFound, "x"),
            Error::DieselError(DieselError::NotFound)
        ));
    }
}
