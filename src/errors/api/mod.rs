// API-facing error types
pub mod app_error;

// Re-exports for convenience
pub use app_error::{ApiError, ErrorResponse};

#[cfg(test)]
mod app_error_test;
