//! Cart lines

use crate::products::ProductId;

/// One entry in a cart: a product and how many of it.
///
/// The quantity is always at least 1; a line brought down to zero is removed from the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    product: ProductId,
    quantity: u32,
}

impl CartLine {
    pub(super) fn new(product: ProductId, quantity: u32) -> Self {
        debug_assert!(quantity >= 1, "cart lines hold at least one unit");

        CartLine { product, quantity }
    }

    /// The product this line refers to.
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Units of the product in the cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(super) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(quantity >= 1, "cart lines hold at least one unit");

        self.quantity = quantity;
    }
}

/// Why a cart operation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartRejection {
    /// The product is not in the catalog.
    UnknownProduct,

    /// The product has no stock.
    OutOfStock,
}

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartUpdate {
    /// A new line was added with this quantity.
    Inserted(u32),

    /// An existing line now has this quantity.
    Updated(u32),

    /// The line was removed.
    Removed,

    /// Nothing changed.
    Unchanged,

    /// The operation was ignored.
    Rejected(CartRejection),
}

impl CartUpdate {
    /// Returns true if the cart was modified.
    pub fn changed(self) -> bool {
        matches!(
            self,
            CartUpdate::Inserted(_) | CartUpdate::Updated(_) | CartUpdate::Removed
        )
    }
}
