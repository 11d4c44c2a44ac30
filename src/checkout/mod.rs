//! Checkout
//!
//! Turns a cart into a placed order. There is no payment gateway: placing an order checks the
//! form, prices the cart, hands back a receipt with a random order number and empties the cart.

use std::fmt;

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::Cart,
    pricing::{OrderSummary, PricingError, PricingSettings, ShippingMethod},
    receipt::{Receipt, ReceiptLine},
};

pub mod details;

pub use details::{CardDetails, CheckoutDetails, MissingFields, Payment, ShippingAddress};

/// Length of a generated order number.
pub const ORDER_NUMBER_LEN: usize = 9;

const ORDER_NUMBER_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Errors that stop an order from being placed. The cart is left as it was.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing in the cart.
    #[error("Your cart is empty; add some products before checking out")]
    EmptyCart,

    /// Required form fields are blank.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(MissingFields),

    /// The order could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Opaque order reference shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate a random upper-case alphanumeric order number.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let number = (0..ORDER_NUMBER_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..ORDER_NUMBER_ALPHABET.len());
                ORDER_NUMBER_ALPHABET
                    .get(idx)
                    .copied()
                    .map_or('0', char::from)
            })
            .collect();

        OrderNumber(number)
    }

    /// The order number as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checkout
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkout {
    settings: PricingSettings,
}

impl Checkout {
    /// Create a checkout that prices orders with `settings`.
    pub fn new(settings: PricingSettings) -> Self {
        Checkout { settings }
    }

    /// Pricing used for orders.
    pub fn settings(&self) -> &PricingSettings {
        &self.settings
    }

    /// Price the cart as it stands, without placing an order.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the cart is empty or cannot be priced.
    pub fn quote<'a>(
        &self,
        cart: &Cart<'_, 'a>,
        shipping_method: ShippingMethod,
    ) -> Result<OrderSummary<'a>, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(cart.summary(&self.settings, shipping_method)?)
    }

    /// Place an order for everything in the cart.
    ///
    /// On success the cart is emptied and the receipt returned. On failure the cart is not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the cart is empty, the details are incomplete or the
    /// order cannot be priced.
    pub fn place_order<'a>(
        &self,
        cart: &mut Cart<'_, 'a>,
        details: &CheckoutDetails,
        rng: &mut impl Rng,
    ) -> Result<Receipt<'a>, CheckoutError> {
        let summary = self.quote(cart, details.shipping)?;

        let missing = details.missing_fields();

        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        let lines = cart
            .resolved_lines()
            .map(|(line, product)| ReceiptLine::new(product, line.quantity()))
            .collect();

        let receipt = Receipt::new(
            OrderNumber::generate(rng),
            lines,
            summary,
            details.shipping,
        );

        cart.clear();

        info!(
            order_number = %receipt.number(),
            items = receipt.item_count(),
            total = %receipt.summary().total,
            "order placed"
        );

        Ok(receipt)
    }
}
