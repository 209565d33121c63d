//! Request validation run before any store access

use crate::db::{AuthorChanges, BookChanges, NewAuthor, NewBook};
use crate::errors::Error;
use chrono::{Datelike, Utc};
use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Checks a request payload, returning `Error::Validation` on the first bad field
pub trait Validate {
    fn validate(&self) -> Result<(), Error>;
}

/// Offset pagination parameters shared by the list endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Validate for Pagination {
    fn validate(&self) -> Result<(), Error> {
        if self.skip < 0 {
            return Err(invalid("skip must be greater than or equal to 0"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.limit) {
            return Err(invalid(&format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(())
    }
}

impl Validate for NewAuthor {
    fn validate(&self) -> Result<(), Error> {
        require_text("name", &self.name)?;
        require_email(&self.email)
    }
}

impl Validate for AuthorChanges {
    fn validate(&self) -> Result<(), Error> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(email) = &self.email {
            require_email(email)?;
        }
        Ok(())
    }
}

impl Validate for NewBook {
    fn validate(&self) -> Result<(), Error> {
        require_text("title", &self.title)?;
        require_text("isbn", &self.isbn)?;
        if let Some(year) = self.publication_year {
            require_past_year(year)?;
        }
        require_copies(self.available_copies)
    }
}

impl Validate for BookChanges {
    fn validate(&self) -> Result<(), Error> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(isbn) = &self.isbn {
            require_text("isbn", isbn)?;
        }
        if let Some(Some(year)) = self.publication_year {
            require_past_year(year)?;
        }
        if let Some(copies) = self.available_copies {
            require_copies(copies)?;
        }
        Ok(())
    }
}

fn invalid(message: &str) -> Error {
    Error::Validation(message.to_string())
}

fn require_text(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(invalid(&format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), Error> {
    match email.split_once('@') {
        Some((local, domain))
            if !local.trim().is_empty() && !domain.trim().is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(invalid("email is not a valid address")),
    }
}

fn require_past_year(year: i32) -> Result<(), Error> {
    if year > Utc::now().year() {
        return Err(invalid("publication_year must not be in the future"));
    }
    Ok(())
}

fn require_copies(copies: i32) -> Result<(), Error> {
    if copies < 0 {
        return Err(invalid("available_copies must not be negative"));
    }
    Ok(())
}
