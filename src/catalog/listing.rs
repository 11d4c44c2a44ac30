//! Listings
//!
//! Search-page style queries: pick a result set, narrow it by price, sort it and cut out one
//! page.

use std::{cmp::Ordering, ops::RangeInclusive};

use clap::ValueEnum;
use serde::Deserialize;

use crate::{catalog::Catalog, products::Product};

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Sort order for a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Name, A to Z, ignoring case
    #[default]
    Name,

    /// Cheapest first
    PriceLowToHigh,

    /// Most expensive first
    PriceHighToLow,

    /// Best rated first
    Rating,
}

impl SortOrder {
    fn compare(self, a: &Product<'_>, b: &Product<'_>) -> Ordering {
        match self {
            SortOrder::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOrder::PriceLowToHigh => a.price.to_minor_units().cmp(&b.price.to_minor_units()),
            SortOrder::PriceHighToLow => b.price.to_minor_units().cmp(&a.price.to_minor_units()),
            SortOrder::Rating => b.rating.cmp(&a.rating),
        }
    }
}

/// Listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Free text; takes precedence over `category` when non-empty.
    pub text: Option<String>,

    /// Category slug to restrict to.
    pub category: Option<String>,

    /// Inclusive price range in minor units.
    pub price_range: Option<RangeInclusive<i64>>,

    /// Sort order
    pub sort: SortOrder,

    /// 1-based page number; 0 is treated as 1.
    pub page: usize,

    /// Products per page; 0 is treated as [`DEFAULT_PAGE_SIZE`].
    pub per_page: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        ListingQuery {
            text: None,
            category: None,
            price_range: None,
            sort: SortOrder::default(),
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of listing results.
#[derive(Debug, Clone)]
pub struct Listing<'c, 'a> {
    /// Products on this page
    pub products: Vec<&'c Product<'a>>,

    /// The page number that was served
    pub page: usize,

    /// Number of pages across all matches
    pub total_pages: usize,

    /// Number of products matching the query, across all pages
    pub total_matches: usize,
}

impl<'a> Catalog<'a> {
    /// Run a listing query.
    pub fn listing(&self, query: &ListingQuery) -> Listing<'_, 'a> {
        let mut results = match (query.text.as_deref(), query.category.as_deref()) {
            (Some(text), _) if !text.trim().is_empty() => self.search(text.trim()),
            (_, Some(category)) => self.find_by_category(category),
            _ => self.iter().collect(),
        };

        if let Some(range) = &query.price_range {
            results.retain(|product| range.contains(&product.price.to_minor_units()));
        }

        results.sort_by(|a, b| query.sort.compare(a, b));

        let per_page = if query.per_page == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            query.per_page
        };
        let page = query.page.max(1);
        let total_matches = results.len();

        let products = results
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        Listing {
            products,
            page,
            total_pages: total_matches.div_ceil(per_page),
            total_matches,
        }
    }
}
