//! Repositories and request validation.

mod repository;
mod validation;
pub use repository::Repository;
pub use validation::RequestValidator;
