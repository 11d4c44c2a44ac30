//! Products

use std::{fmt, num::NonZeroU32};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

/// Product identifier
///
/// Identifiers are positive integers, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "u32")]
pub struct ProductId(NonZeroU32);

impl ProductId {
    /// Create a product identifier, returning `None` for zero.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// The raw identifier.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for ProductId {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "product id must be a positive integer".to_string())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Category slug (e.g. `mechanical`, `keycaps`)
    pub category: String,

    /// Long-form description
    pub description: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Image URL
    pub image: String,

    /// Feature bullet points, in display order
    pub features: Vec<String>,

    /// Units available to sell
    pub in_stock: u32,

    /// Average rating, 0 to 5
    pub rating: Decimal,
}

impl Product<'_> {
    /// Returns true if the product has any stock left.
    pub fn is_available(&self) -> bool {
        self.in_stock > 0
    }

    /// Returns true if `needle` occurs in the name, description, brand or category.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        [&self.name, &self.description, &self.brand, &self.category]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
