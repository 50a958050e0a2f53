use core::str::FromStr;

use serde::{Deserialize, Serialize};

use taproom_core::{BeerId, DomainError, DomainResult};

/// Beer style. Closed set; serialized as upper-case names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BeerType {
    Lager,
    Pilsen,
    Ipa,
    Ale,
    Stout,
    Weiss,
}

impl BeerType {
    pub const ALL: [BeerType; 6] = [
        BeerType::Lager,
        BeerType::Pilsen,
        BeerType::Ipa,
        BeerType::Ale,
        BeerType::Stout,
        BeerType::Weiss,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BeerType::Lager => "LAGER",
            BeerType::Pilsen => "PILSEN",
            BeerType::Ipa => "IPA",
            BeerType::Ale => "ALE",
            BeerType::Stout => "STOUT",
            BeerType::Weiss => "WEISS",
        }
    }
}

impl core::fmt::Display for BeerType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeerType {
    type Err = DomainError;

    /// Exact, case-sensitive match on the upper-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeerType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown beer type: {s}")))
    }
}

/// A beer that passed field validation and is ready to be checked against stock rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBeer {
    pub name: String,
    pub brand: String,
    pub maximum: i32,
    pub quantity: i32,
    pub beer_type: BeerType,
}

impl NewBeer {
    /// Record invariants and stock rules for creation, in evaluation order.
    ///
    /// These run before the duplicate-name lookup, so a blank, negative or over-capacity
    /// request never reaches the store, whichever backend sits behind it.
    pub fn check_stock(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be blank"));
        }
        if self.brand.trim().is_empty() {
            return Err(DomainError::validation("brand cannot be blank"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if self.maximum <= 0 {
            return Err(DomainError::validation("maximum must be greater than zero"));
        }
        if self.quantity > self.maximum {
            return Err(DomainError::validation(
                "initial quantity cannot exceed maximum",
            ));
        }
        Ok(())
    }
}

/// Entity: a persisted beer record.
///
/// Invariant: `0 <= quantity <= maximum`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beer {
    pub id: BeerId,
    pub name: String,
    pub brand: String,
    pub maximum: i32,
    pub quantity: i32,
    pub beer_type: BeerType,
}

impl Beer {
    /// Attach a store-assigned identifier to a new beer.
    pub fn from_new(id: BeerId, new: NewBeer) -> Self {
        Self {
            id,
            name: new.name,
            brand: new.brand,
            maximum: new.maximum,
            quantity: new.quantity,
            beer_type: new.beer_type,
        }
    }

    /// Decide the quantity after adding `amount` units.
    ///
    /// Does not mutate; the caller persists the returned quantity.
    pub fn plan_increment(&self, amount: i32) -> DomainResult<i32> {
        ensure_positive_amount(amount)?;

        match self.quantity.checked_add(amount) {
            Some(next) if next <= self.maximum => Ok(next),
            _ => Err(DomainError::capacity_exceeded(self.id, amount)),
        }
    }

    pub fn is_full(&self) -> bool {
        self.quantity == self.maximum
    }
}

/// Increment amounts must be strictly positive.
pub fn ensure_positive_amount(amount: i32) -> DomainResult<()> {
    if amount <= 0 {
        return Err(DomainError::validation("amount must be positive"));
    }
    Ok(())
}
