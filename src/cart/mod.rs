//! Cart
//!
//! A cart belongs to one shopping session. It holds product identifiers and quantities only;
//! product data, prices included, is looked up in the catalog whenever it is needed so totals
//! always reflect the catalog the cart was opened against.
//!
//! None of the operations fail. Unknown products and empty stock are reported back as
//! [`CartUpdate::Rejected`] and leave the cart untouched, and quantities are clamped to the
//! stock available.

use rusty_money::{Money, iso::Currency};
use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    pricing::{OrderSummary, PricingError, PricingSettings, ShippingMethod},
    products::{Product, ProductId},
};

mod line;

pub use line::{CartLine, CartRejection, CartUpdate};

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'c, 'a> {
    catalog: &'c Catalog<'a>,
    lines: Vec<CartLine>,
}

impl<'c, 'a> Cart<'c, 'a> {
    /// Open an empty cart against `catalog`.
    pub fn new(catalog: &'c Catalog<'a>) -> Self {
        Cart {
            catalog,
            lines: Vec::new(),
        }
    }

    /// Add `quantity` units of a product, merging with any existing line.
    ///
    /// A quantity of 0 adds a single unit. The resulting line quantity never exceeds the
    /// product's stock.
    pub fn add_item(&mut self, id: ProductId, quantity: u32) -> CartUpdate {
        let product = match self.stocked_product(id) {
            Ok(product) => product,
            Err(rejection) => return rejection,
        };

        let requested = quantity.max(1);

        let update = match self.line_mut(id) {
            Some(line) => {
                let clamped = line
                    .quantity()
                    .saturating_add(requested)
                    .min(product.in_stock);

                if clamped == line.quantity() {
                    CartUpdate::Unchanged
                } else {
                    line.set_quantity(clamped);
                    CartUpdate::Updated(clamped)
                }
            }
            None => {
                let clamped = requested.min(product.in_stock);
                self.lines.push(CartLine::new(id, clamped));
                CartUpdate::Inserted(clamped)
            }
        };

        debug!(product_id = %id, requested, ?update, "add to cart");

        update
    }

    /// Remove a product's line, if there is one.
    pub fn remove_item(&mut self, id: ProductId) -> CartUpdate {
        let before = self.lines.len();

        self.lines.retain(|line| line.product() != id);

        let update = if self.lines.len() == before {
            CartUpdate::Unchanged
        } else {
            CartUpdate::Removed
        };

        debug!(product_id = %id, ?update, "remove from cart");

        update
    }

    /// Set a product's quantity, adding a line if needed.
    ///
    /// Quantities of zero or below remove the line. Larger quantities are clamped to stock.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> CartUpdate {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let product = match self.stocked_product(id) {
            Ok(product) => product,
            Err(rejection) => return rejection,
        };

        let clamped = u32::try_from(quantity)
            .unwrap_or(u32::MAX)
            .min(product.in_stock);

        let update = match self.line_mut(id) {
            Some(line) if line.quantity() == clamped => CartUpdate::Unchanged,
            Some(line) => {
                line.set_quantity(clamped);
                CartUpdate::Updated(clamped)
            }
            None => {
                self.lines.push(CartLine::new(id, clamped));
                CartUpdate::Inserted(clamped)
            }
        };

        debug!(product_id = %id, requested = quantity, ?update, "set cart quantity");

        update
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        debug!(lines = self.lines.len(), "clear cart");

        self.lines.clear();
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Sum of price × quantity over all lines, priced from the catalog on every call.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        let minor = self
            .resolved_lines()
            .map(|(line, product)| {
                product
                    .price
                    .to_minor_units()
                    .saturating_mul(i64::from(line.quantity()))
            })
            .fold(0_i64, i64::saturating_add);

        Money::from_minor(minor, self.catalog.currency())
    }

    /// Price the cart with tax and shipping.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the tax cannot be calculated or the total overflows.
    pub fn summary(
        &self,
        settings: &PricingSettings,
        shipping_method: ShippingMethod,
    ) -> Result<OrderSummary<'a>, PricingError> {
        OrderSummary::new(self.subtotal(), settings, shipping_method)
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product() == id)
    }

    /// Lines paired with their catalog product.
    pub fn resolved_lines(&self) -> impl Iterator<Item = (&CartLine, &'c Product<'a>)> + '_ {
        let catalog = self.catalog;

        self.lines.iter().filter_map(move |line| {
            catalog
                .find_by_id(line.product())
                .map(|product| (line, product))
        })
    }

    /// Returns true if the cart has a line for the product.
    pub fn contains(&self, id: ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The catalog this cart prices against.
    pub fn catalog(&self) -> &'c Catalog<'a> {
        self.catalog
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product() == id)
    }

    fn stocked_product(&self, id: ProductId) -> Result<&'c Product<'a>, CartUpdate> {
        let catalog = self.catalog;

        let Some(product) = catalog.find_by_id(id) else {
            warn!(product_id = %id, "unknown product, cart unchanged");
            return Err(CartUpdate::Rejected(CartRejection::UnknownProduct));
        };

        if !product.is_available() {
            warn!(product_id = %id, "product out of stock, cart unchanged");
            return Err(CartUpdate::Rejected(CartRejection::OutOfStock));
        }

        Ok(product)
    }
}
