//! Catalog
//!
//! The catalog is the read-only product list a storefront browses. It is validated once when
//! constructed and never mutated afterwards, so every query is a pure function of its
//! arguments and a shared `&Catalog` can be read from any number of threads.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::products::{Product, ProductId};

pub mod listing;

/// Rating at or above which a product is featured on the home page.
pub const FEATURED_RATING: Decimal = Decimal::from_parts(47, 0, 0, false, 1);

/// Highest rating a product can carry.
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Errors raised while validating a product list.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two products share an identifier.
    #[error("Duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product is priced in a different currency to the catalog.
    ///
    /// Fields: product, product currency, catalog currency.
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// A product has a negative price.
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),

    /// A product rating falls outside 0 to 5.
    #[error("Product {0} has rating {1}, expected 0 to 5")]
    RatingOutOfRange(ProductId, Decimal),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create a catalog from a product list, preserving its order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if identifiers repeat, currencies are mixed, a price is
    /// negative or a rating is outside 0 to 5.
    pub fn new(
        products: impl Into<Vec<Product<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut index = FxHashMap::default();

        for (idx, product) in products.iter().enumerate() {
            let product_currency = product.price.currency();

            if product_currency != currency {
                return Err(CatalogError::CurrencyMismatch(
                    product.id,
                    product_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if product.price.to_minor_units() < 0 {
                return Err(CatalogError::NegativePrice(product.id));
            }

            if product.rating < Decimal::ZERO || product.rating > MAX_RATING {
                return Err(CatalogError::RatingOutOfRange(product.id, product.rating));
            }

            if index.insert(product.id, idx).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        debug!(
            products = products.len(),
            currency = currency.iso_alpha_code,
            "catalog loaded"
        );

        Ok(Catalog {
            products,
            index,
            currency,
        })
    }

    /// Find a product by identifier.
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product<'a>> {
        self.index
            .get(&id)
            .and_then(|&idx| self.products.get(idx))
    }

    /// All products in `category`, in catalog order.
    pub fn find_by_category(&self, category: &str) -> Vec<&Product<'a>> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Case-insensitive substring search across name, description, brand and category.
    ///
    /// An empty query matches every product.
    pub fn search(&self, text: &str) -> Vec<&Product<'a>> {
        let needle = text.to_lowercase();

        let matches: Vec<_> = self
            .products
            .iter()
            .filter(|product| product.matches_text(&needle))
            .collect();

        debug!(query = text, matches = matches.len(), "catalog search");

        matches
    }

    /// Products rated at least [`FEATURED_RATING`].
    pub fn featured(&self) -> Vec<&Product<'a>> {
        self.featured_with_threshold(FEATURED_RATING)
    }

    /// Products rated at least `threshold`.
    pub fn featured_with_threshold(&self, threshold: Decimal) -> Vec<&Product<'a>> {
        self.products
            .iter()
            .filter(|product| product.rating >= threshold)
            .collect()
    }

    /// Up to `limit` other products from the same category as `id`.
    ///
    /// Returns nothing when `id` is not in the catalog.
    pub fn related(&self, id: ProductId, limit: usize) -> Vec<&Product<'a>> {
        let Some(product) = self.find_by_id(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|other| other.id != id && other.category == product.category)
            .take(limit)
            .collect()
    }

    /// Distinct categories, in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }

        categories
    }

    /// Iterate over every product in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency every product is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;
    use crate::test_support::{catalog, id, product};

    fn categorised() -> Result<Catalog<'static>, CatalogError> {
        let mut gaming = product(4, 100, 1);
        gaming.category = "gaming".to_string();
        gaming.rating = Decimal::new(47, 1);

        let mut keycaps = product(5, 100, 1);
        keycaps.category = "keycaps".to_string();
        keycaps.rating = Decimal::new(49, 1);

        Catalog::new(
            vec![product(1, 100, 1), gaming, product(2, 100, 1), keycaps],
            iso::COP,
        )
    }

    #[test]
    fn find_by_id_returns_each_product() {
        let catalog = catalog();

        for product in catalog.iter() {
            assert_eq!(catalog.find_by_id(product.id), Some(product));
        }
    }

    #[test]
    fn find_by_id_unknown_is_none() {
        assert!(catalog().find_by_id(id(99)).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::new(vec![product(1, 100, 1), product(1, 200, 1)], iso::COP);

        assert_eq!(result.err(), Some(CatalogError::DuplicateId(id(1))));
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let mut dollars = product(2, 100, 1);
        dollars.price = Money::from_minor(100, iso::USD);

        let result = Catalog::new(vec![product(1, 100, 1), dollars], iso::COP);

        assert_eq!(
            result.err(),
            Some(CatalogError::CurrencyMismatch(id(2), "USD", "COP"))
        );
    }

    #[test]
    fn negative_prices_are_rejected() {
        let result = Catalog::new(vec![product(1, -1, 1)], iso::COP);

        assert_eq!(result.err(), Some(CatalogError::NegativePrice(id(1))));
    }

    #[test]
    fn ratings_above_five_are_rejected() {
        let mut product = product(1, 100, 1);
        product.rating = Decimal::new(51, 1);

        let result = Catalog::new(vec![product], iso::COP);

        assert!(matches!(result, Err(CatalogError::RatingOutOfRange(_, _))));
    }

    #[test]
    fn find_by_category_preserves_order() -> TestResult {
        let catalog = categorised()?;

        let ids: Vec<u32> = catalog
            .find_by_category("mechanical")
            .iter()
            .map(|product| product.id.get())
            .collect();

        assert_eq!(ids, [1, 2]);
        assert!(catalog.find_by_category("switches").is_empty());

        Ok(())
    }

    #[test]
    fn search_is_case_insensitive() -> TestResult {
        let catalog = categorised()?;

        assert_eq!(catalog.search("GAMING").len(), 1);
        assert_eq!(catalog.search("keymaster").len(), 4);
        assert!(catalog.search("trackball").is_empty());

        Ok(())
    }

    #[test]
    fn search_with_empty_text_matches_everything() -> TestResult {
        let catalog = categorised()?;

        assert_eq!(catalog.search("").len(), catalog.len());

        Ok(())
    }

    #[test]
    fn featured_includes_the_threshold() -> TestResult {
        let catalog = categorised()?;

        let ids: Vec<u32> = catalog
            .featured()
            .iter()
            .map(|product| product.id.get())
            .collect();

        assert_eq!(ids, [4, 5]);

        Ok(())
    }

    #[test]
    fn related_excludes_the_product_itself() -> TestResult {
        let catalog = categorised()?;

        let related = catalog.related(id(1), 4);

        assert_eq!(related.len(), 1);
        assert_eq!(related.first().map(|product| product.id), Some(id(2)));
        assert!(catalog.related(id(99), 4).is_empty());

        Ok(())
    }

    #[test]
    fn related_respects_limit() {
        let catalog = catalog();

        assert_eq!(catalog.related(id(1), 1).len(), 1);
        assert!(catalog.related(id(1), 0).is_empty());
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() -> TestResult {
        let catalog = categorised()?;

        assert_eq!(catalog.categories(), ["mechanical", "gaming", "keycaps"]);

        Ok(())
    }
}
