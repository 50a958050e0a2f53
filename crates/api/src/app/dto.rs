use serde::{Deserialize, Serialize};

use taproom_core::BeerId;
use taproom_inventory::{Beer, BeerDraft, BeerType};

// -------------------------
// Request DTOs
// -------------------------

/// Creation payload. Fields are optional so that missing ones surface as field errors
/// rather than as a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBeerRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub maximum: Option<i32>,
    pub quantity: Option<i32>,
    #[serde(rename = "type")]
    pub beer_type: Option<String>,
}

impl From<CreateBeerRequest> for BeerDraft {
    fn from(value: CreateBeerRequest) -> Self {
        BeerDraft {
            name: value.name,
            brand: value.brand,
            maximum: value.maximum,
            quantity: value.quantity,
            beer_type: value.beer_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IncrementStockRequest {
    pub quantity: Option<i32>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeerResponse {
    pub id: BeerId,
    pub name: String,
    pub brand: String,
    pub maximum: i32,
    pub quantity: i32,
    #[serde(rename = "type")]
    pub beer_type: BeerType,
}

impl From<Beer> for BeerResponse {
    fn from(beer: Beer) -> Self {
        Self {
            id: beer.id,
            name: beer.name,
            brand: beer.brand,
            maximum: beer.maximum,
            quantity: beer.quantity,
            beer_type: beer.beer_type,
        }
    }
}
