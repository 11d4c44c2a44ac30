//! Shared builders for unit tests.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::COP};

use crate::{
    catalog::Catalog,
    products::{Product, ProductId},
};

pub(crate) fn id(raw: u32) -> ProductId {
    ProductId::new(raw).expect("test product ids are positive")
}

pub(crate) fn product(raw_id: u32, price: i64, in_stock: u32) -> Product<'static> {
    Product {
        id: id(raw_id),
        name: format!("Keyboard {raw_id}"),
        brand: "KeyMaster".to_string(),
        category: "mechanical".to_string(),
        description: "Teclado mecánico de prueba".to_string(),
        price: Money::from_minor(price, COP),
        image: String::new(),
        features: Vec::new(),
        in_stock,
        rating: Decimal::new(45, 1),
    }
}

/// Catalog with the products used by the cart scenarios:
///
/// - `1`: 299900, 15 in stock
/// - `2`: 199900, 8 in stock
/// - `3`: 89900, sold out
pub(crate) fn catalog() -> Catalog<'static> {
    Catalog::new(
        vec![
            product(1, 299_900, 15),
            product(2, 199_900, 8),
            product(3, 89_900, 0),
        ],
        COP,
    )
    .expect("test catalog is valid")
}
