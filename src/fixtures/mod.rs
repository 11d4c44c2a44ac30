//! Fixtures
//!
//! Catalog seed files. A seed is a YAML document listing products in display order:
//!
//! ```yaml
//! currency: COP
//! products:
//!   - id: 1
//!     name: Teclado Mecánico RGB Pro
//!     price: 2999.00 COP
//!     category: mechanical
//!     brand: KeyMaster
//!     image: https://example.com/keyboard.jpg
//!     description: Teclado mecánico premium
//!     features: [Switches Cherry MX Blue]
//!     in_stock: 15
//!     rating: 4.8
//! ```

use std::{fs, path::Path};

use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{Catalog, CatalogError},
    products::Product,
};

pub mod products;

pub use products::{ProductFixture, parse_percentage, parse_price};

/// The bundled keyboard shop catalog.
pub const DEFAULT_CATALOG: &str = include_str!("../../fixtures/products/keyboards.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid rating
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// No currency given and no products to infer it from
    #[error("No currency given and no products loaded; currency unknown")]
    NoCurrency,

    /// The products failed catalog validation
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Wrapper for a catalog seed in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code; defaults to the currency of the first product
    #[serde(default)]
    pub currency: Option<String>,

    /// Products, in catalog order
    pub products: Vec<ProductFixture>,
}

impl TryFrom<CatalogFixture> for Catalog<'static> {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let currency = match fixture.currency.as_deref() {
            Some(code) => find_currency(code)?,
            None => products
                .first()
                .map(|product| product.price.currency())
                .ok_or(FixtureError::NoCurrency)?,
        };

        Ok(Catalog::new(products, currency)?)
    }
}

/// Look up an ISO 4217 currency by its alphabetic code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] if the code is not recognised.
pub fn find_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    iso::find(code.trim()).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))
}

/// Parse a catalog seed from YAML text.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or any product fails validation.
pub fn catalog_from_str(contents: &str) -> Result<Catalog<'static>, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(contents)?;

    fixture.try_into()
}

/// Load a catalog seed from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or any product fails validation.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog<'static>, FixtureError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let catalog = catalog_from_str(&contents)?;

    info!(path = %path.display(), products = catalog.len(), "catalog loaded from file");

    Ok(catalog)
}

/// The bundled keyboard shop catalog.
///
/// # Errors
///
/// Returns an error only if the bundled seed is invalid.
pub fn default_catalog() -> Result<Catalog<'static>, FixtureError> {
    catalog_from_str(DEFAULT_CATALOG)
}
