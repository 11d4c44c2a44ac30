//! Terminal tables for catalog listings and carts.

use std::io;

use tabled::builder::Builder;

use crate::{
    cart::Cart,
    catalog::listing::Listing,
    products::Product,
    receipt::{ReceiptError, write_table},
};

/// Writes products as a table, one row per product.
///
/// # Errors
///
/// Returns an error if the table cannot be written.
pub fn write_products<'p, 'a: 'p>(
    mut out: impl io::Write,
    products: impl IntoIterator<Item = &'p Product<'a>>,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Id", "Name", "Brand", "Category", "Price", "Rating", "Stock",
    ]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.brand.clone(),
            product.category.clone(),
            product.price.to_string(),
            product.rating.to_string(),
            product.in_stock.to_string(),
        ]);
    }

    write_table(&mut out, builder, 4..7)
}

/// Writes one page of a listing with its position in the result set.
///
/// # Errors
///
/// Returns an error if the listing cannot be written.
pub fn write_listing(
    mut out: impl io::Write,
    listing: &Listing<'_, '_>,
) -> Result<(), ReceiptError> {
    write_products(&mut out, listing.products.iter().copied())?;

    let noun = if listing.total_matches == 1 {
        "product"
    } else {
        "products"
    };

    writeln!(
        out,
        " {} {noun} found, page {} of {}",
        listing.total_matches,
        listing.page,
        listing.total_pages.max(1)
    )
    .map_err(|_err| ReceiptError::IO)
}

/// Writes the details of a single product.
///
/// # Errors
///
/// Returns an error if the product cannot be written.
pub fn write_product(mut out: impl io::Write, product: &Product<'_>) -> Result<(), ReceiptError> {
    let stock = if product.is_available() {
        format!("{} in stock", product.in_stock)
    } else {
        "Sold out".to_string()
    };

    writeln!(
        out,
        "\n {} ({})\n {} · {} · rated {}\n {}\n\n {}",
        product.name,
        product.brand,
        product.price,
        stock,
        product.rating,
        product.category,
        product.description
    )
    .map_err(|_err| ReceiptError::IO)?;

    for feature in &product.features {
        writeln!(out, "   - {feature}").map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

/// Writes the cart contents with the running item count and subtotal.
///
/// # Errors
///
/// Returns an error if the cart cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart<'_, '_>) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        return writeln!(out, " Your cart is empty").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Item", "Qty", "Unit Price", "Stock"]);

    for (line, product) in cart.resolved_lines() {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            line.quantity().to_string(),
            product.price.to_string(),
            product.in_stock.to_string(),
        ]);
    }

    write_table(&mut out, builder, 2..5)?;

    writeln!(
        out,
        " {} items, subtotal {}",
        cart.item_count(),
        cart.subtotal()
    )
    .map_err(|_err| ReceiptError::IO)
}
