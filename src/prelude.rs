//! Keyshop prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, CartRejection, CartUpdate},
    catalog::{
        Catalog, CatalogError, FEATURED_RATING,
        listing::{Listing, ListingQuery, SortOrder},
    },
    checkout::{
        CardDetails, Checkout, CheckoutDetails, CheckoutError, OrderNumber, Payment,
        ShippingAddress,
    },
    fixtures::{FixtureError, default_catalog, load_catalog},
    pricing::{OrderSummary, PricingError, PricingSettings, ShippingMethod, ShippingRates},
    products::{Product, ProductId},
    receipt::{Receipt, ReceiptError, ReceiptLine},
    settings::{SettingsError, StoreSettings},
};
