//! Store settings
//!
//! Optional YAML configuration. Every field has a default, so an empty file (or no file at
//! all) gives the standard storefront: 8% tax, free standard shipping, products rated 4.7 and
//! above featured, six products per listing page.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{FEATURED_RATING, MAX_RATING, listing::DEFAULT_PAGE_SIZE},
    fixtures::{FixtureError, parse_percentage},
    observability::LoggingSettings,
    pricing::{PricingSettings, ShippingRates},
};

/// Number of related products shown next to a product.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error reading the settings file
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse settings: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A value could not be parsed
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Featured threshold is not a rating between 0 and 5
    #[error("Invalid featured threshold: {0}")]
    InvalidThreshold(String),

    /// Tax rate is negative
    #[error("Invalid tax rate: {0}")]
    InvalidTaxRate(String),

    /// A shipping cost is negative
    #[error("Invalid {0} shipping cost: {1}")]
    NegativeShipping(&'static str, i64),
}

/// Store settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Tax rate, as "8%" or "0.08"
    pub tax_rate: String,

    /// Minimum rating for featured products, e.g. "4.7"
    pub featured_threshold: String,

    /// Products per listing page
    pub page_size: usize,

    /// Related products shown on a product page
    pub related_limit: usize,

    /// Shipping costs in minor units
    pub shipping: ShippingRates,

    /// Log output
    pub logging: LoggingSettings,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            tax_rate: "8%".to_string(),
            featured_threshold: FEATURED_RATING.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            related_limit: DEFAULT_RELATED_LIMIT,
            shipping: ShippingRates::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl StoreSettings {
    /// Parse settings from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(contents: &str) -> Result<Self, SettingsError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_norway::from_str(contents)?)
    }

    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Tax and shipping rates for checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the tax rate cannot be parsed, or if the tax rate or any shipping
    /// cost is negative.
    pub fn pricing(&self) -> Result<PricingSettings, SettingsError> {
        let tax_rate = parse_percentage(&self.tax_rate)?;

        if tax_rate * Decimal::ONE < Decimal::ZERO {
            return Err(SettingsError::InvalidTaxRate(self.tax_rate.clone()));
        }

        for (method, cost) in [
            ("standard", self.shipping.standard),
            ("express", self.shipping.express),
            ("overnight", self.shipping.overnight),
        ] {
            if cost < 0 {
                return Err(SettingsError::NegativeShipping(method, cost));
            }
        }

        Ok(PricingSettings {
            tax_rate,
            shipping: self.shipping,
        })
    }

    /// Minimum rating for featured products.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is not a decimal between 0 and 5.
    pub fn featured_threshold(&self) -> Result<Decimal, SettingsError> {
        self.featured_threshold
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|value| *value >= Decimal::ZERO && *value <= MAX_RATING)
            .ok_or_else(|| SettingsError::InvalidThreshold(self.featured_threshold.clone()))
    }
}
