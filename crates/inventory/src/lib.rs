//! Beer stock domain module.
//!
//! This crate contains the business rules for the beer catalog, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod beer;
pub mod validation;

pub use beer::{ensure_positive_amount, Beer, BeerType, NewBeer};
pub use validation::{
    validate_draft, validate_increment, BeerDraft, FieldError, ValidationErrors,
};
