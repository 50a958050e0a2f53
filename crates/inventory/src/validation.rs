//! Field-level validation of inbound payloads.
//!
//! Runs before any business rule. Every failing field is reported, not just the first.

use thiserror::Error;

use crate::beer::{BeerType, NewBeer};

/// One failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Collected field errors, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_field_errors(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unvalidated creation payload. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeerDraft {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub maximum: Option<i32>,
    pub quantity: Option<i32>,
    pub beer_type: Option<String>,
}

/// Check every field of a creation payload and build a [`NewBeer`] if all pass.
pub fn validate_draft(draft: BeerDraft) -> Result<NewBeer, ValidationErrors> {
    let mut errors = Vec::new();

    let name = required_text(&mut errors, "name", draft.name);
    let brand = required_text(&mut errors, "brand", draft.brand);

    let maximum = match draft.maximum {
        None => {
            errors.push(FieldError::new("maximum", "maximum is required"));
            None
        }
        Some(v) if v <= 0 => {
            errors.push(FieldError::new("maximum", "maximum must be greater than zero"));
            None
        }
        Some(v) => Some(v),
    };

    let quantity = match draft.quantity {
        None => {
            errors.push(FieldError::new("quantity", "initial quantity is required"));
            None
        }
        Some(v) if v < 0 => {
            errors.push(FieldError::new("quantity", "initial quantity cannot be negative"));
            None
        }
        Some(v) => Some(v),
    };

    let beer_type = match draft.beer_type.as_deref() {
        None => {
            errors.push(FieldError::new("type", "type is required"));
            None
        }
        Some(raw) => match raw.parse::<BeerType>() {
            Ok(t) => Some(t),
            Err(_) => {
                let allowed = BeerType::ALL.map(BeerType::as_str).join(", ");
                errors.push(FieldError::new("type", format!("type must be one of: {allowed}")));
                None
            }
        },
    };

    match (name, brand, maximum, quantity, beer_type) {
        (Some(name), Some(brand), Some(maximum), Some(quantity), Some(beer_type))
            if errors.is_empty() =>
        {
            Ok(NewBeer {
                name,
                brand,
                maximum,
                quantity,
                beer_type,
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

/// Check the increment payload's amount field.
pub fn validate_increment(quantity: Option<i32>) -> Result<i32, ValidationErrors> {
    match quantity {
        None => Err(ValidationErrors(vec![FieldError::new(
            "quantity",
            "quantity is required",
        )])),
        Some(v) if v <= 0 => Err(ValidationErrors(vec![FieldError::new(
            "quantity",
            "quantity must be positive",
        )])),
        Some(v) => Ok(v),
    }
}

fn required_text(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
    }
}
