pub mod domain;

pub use domain::{DomainError, ErrorClass};
