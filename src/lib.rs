//! Keyshop
//!
//! Keyshop is the domain core of a keyboard storefront: a read-only product catalog with
//! search and listing queries, a per-session cart that clamps quantities to stock, and a
//! simulated checkout that prices the cart, issues an order number and empties the cart.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod settings;
pub mod tables;

#[cfg(test)]
mod test_support;
