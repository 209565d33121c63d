/// API error types and handling
pub mod errors;
/// Extractors with JSON rejection bodies
pub mod extractors;
/// HTTP handlers for authors and books
pub mod handlers;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;
/// Request payload and paging validation
pub mod validation;
