//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates HTTP handling from data access.
//! - Reuses the entity definition in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod produto_service;
#[cfg(test)]
pub mod test_support;
