//! Route handlers for the catalog's two resources
//!
//! Every handler checks out one pooled connection, runs a single repository
//! call against it and returns the connection to the pool when it goes out of
//! scope, whichever way the handler exits.

pub mod authors;
pub mod books;
