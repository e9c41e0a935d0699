//! Error handling for the Preferans engine.

pub mod domain;

pub use domain::{DomainError, NotFoundKind, ValidationKind};
