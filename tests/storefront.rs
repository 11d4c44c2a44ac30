//! Integration test for a full shopping session against the bundled catalog.
//!
//! Browses the keyboard catalog, fills a cart, and checks out:
//!
//! 1. "mecánico" matches the five products that mention mechanical switches
//! 2. Adding the RGB Pro twice gives 2 units at 2999.00 COP each (599800 minor units)
//! 3. Asking for 20 units clamps to the 15 in stock
//! 4. Checkout adds 8% tax, issues a 9 character order number and empties the cart

use rand::{SeedableRng, rngs::StdRng};
use rusty_money::{Money, iso::COP};
use testresult::TestResult;

use keyshop::prelude::*;

fn id(raw: u32) -> TestResult<ProductId> {
    Ok(ProductId::try_from(raw)?)
}

fn ids<'p>(products: impl IntoIterator<Item = &'p Product<'static>>) -> Vec<u32> {
    products
        .into_iter()
        .map(|product| product.id.get())
        .collect()
}

const DETAILS: &str = r#"
email: ana@example.com
address:
  first_name: Ana
  last_name: Gómez
  address: "Calle 10 # 5-20"
  city: Bogotá
  state: Cundinamarca
  zip_code: '110111'
payment:
  method: card
  number: 4111 1111 1111 1111
  expiry: 12/30
  cvv: '123'
  holder: Ana Gómez
"#;

#[test]
fn every_product_is_found_by_its_id() -> TestResult {
    let catalog = default_catalog()?;

    for product in catalog.iter() {
        let found = catalog.find_by_id(product.id).ok_or("product not indexed")?;

        assert_eq!(found, product);
    }

    assert!(catalog.find_by_id(id(99)?).is_none());

    Ok(())
}

#[test]
fn search_results_mention_the_query() -> TestResult {
    let catalog = default_catalog()?;

    for query in ["mecánico", "RGB", "keycaps", "gameforce", "zzz"] {
        let needle = query.to_lowercase();

        for product in catalog.search(query) {
            let haystack = [
                &product.name,
                &product.description,
                &product.brand,
                &product.category,
            ];

            assert!(
                haystack
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle)),
                "{} does not mention {query}",
                product.name
            );
        }
    }

    assert_eq!(catalog.search("").len(), catalog.len());

    Ok(())
}

#[test]
fn search_for_mechanical_keeps_catalog_order() -> TestResult {
    let catalog = default_catalog()?;

    assert_eq!(ids(catalog.search("mecánico")), vec![1, 2, 4, 6, 7]);
    assert_eq!(ids(catalog.search("MECÁNICO")), vec![1, 2, 4, 6, 7]);

    Ok(())
}

#[test]
fn featured_products_are_rated_four_point_seven_or_higher() -> TestResult {
    let catalog = default_catalog()?;

    assert_eq!(ids(catalog.featured()), vec![1, 3, 4, 6]);

    Ok(())
}

#[test]
fn categories_filter_and_relate_products() -> TestResult {
    let catalog = default_catalog()?;

    assert_eq!(
        catalog.categories(),
        vec!["mechanical", "gaming", "keycaps", "accessories"]
    );
    assert_eq!(ids(catalog.find_by_category("keycaps")), vec![3, 8]);
    assert_eq!(ids(catalog.related(id(2)?, 4)), vec![7]);

    Ok(())
}

#[test]
fn listing_sorts_and_pages_the_catalog() -> TestResult {
    let catalog = default_catalog()?;

    let first = catalog.listing(&ListingQuery {
        sort: SortOrder::PriceLowToHigh,
        ..ListingQuery::default()
    });

    assert_eq!(first.total_matches, 8);
    assert_eq!(first.total_pages, 2);
    assert_eq!(ids(first.products.iter().copied()), vec![6, 5, 8, 3, 7, 2]);

    let second = catalog.listing(&ListingQuery {
        sort: SortOrder::PriceLowToHigh,
        page: 2,
        ..ListingQuery::default()
    });

    assert_eq!(ids(second.products.iter().copied()), vec![1, 4]);

    Ok(())
}

#[test]
fn cart_session_clamps_to_stock() -> TestResult {
    let catalog = default_catalog()?;
    let mut cart = Cart::new(&catalog);
    let rgb_pro = id(1)?;

    assert_eq!(cart.add_item(rgb_pro, 1), CartUpdate::Inserted(1));
    assert_eq!(cart.add_item(rgb_pro, 1), CartUpdate::Updated(2));
    assert_eq!(cart.subtotal(), Money::from_minor(599_800, COP));
    assert_eq!(cart.item_count(), 2);

    assert_eq!(cart.set_quantity(rgb_pro, 20), CartUpdate::Updated(15));
    assert_eq!(cart.line(rgb_pro).map(CartLine::quantity), Some(15));

    assert_eq!(cart.remove_item(rgb_pro), CartUpdate::Removed);
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);

    Ok(())
}

#[test]
fn checkout_prices_the_cart_and_empties_it() -> TestResult {
    let catalog = default_catalog()?;
    let mut cart = Cart::new(&catalog);

    cart.add_item(id(1)?, 2);
    cart.add_item(id(5)?, 1);

    let details: CheckoutDetails = serde_norway::from_str(DETAILS)?;
    let checkout = Checkout::default();

    let receipt = checkout.place_order(&mut cart, &details, &mut StdRng::seed_from_u64(42))?;

    // 2 x 299900 + 49900 = 649700; 8% tax is 51976
    assert_eq!(receipt.summary().subtotal, Money::from_minor(649_700, COP));
    assert_eq!(receipt.summary().tax, Money::from_minor(51_976, COP));
    assert_eq!(receipt.summary().shipping, Money::from_minor(0, COP));
    assert_eq!(receipt.summary().total, Money::from_minor(701_676, COP));

    assert_eq!(receipt.number().as_str().len(), 9);
    assert_eq!(receipt.item_count(), 3);
    assert!(cart.is_empty());

    let mut printed = Vec::new();
    receipt.write_to(&mut printed)?;
    let printed = String::from_utf8(printed)?;

    assert!(printed.contains(receipt.number().as_str()));
    assert!(printed.contains("Teclado Mecánico RGB Pro"));

    Ok(())
}

#[test]
fn checkout_with_an_empty_cart_is_refused() -> TestResult {
    let catalog = default_catalog()?;
    let mut cart = Cart::new(&catalog);

    let details: CheckoutDetails = serde_norway::from_str(DETAILS)?;

    let result =
        Checkout::default().place_order(&mut cart, &details, &mut StdRng::seed_from_u64(1));

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));

    Ok(())
}

#[test]
fn incomplete_details_leave_the_cart_alone() -> TestResult {
    let catalog = default_catalog()?;
    let mut cart = Cart::new(&catalog);

    cart.add_item(id(3)?, 2);

    let details: CheckoutDetails =
        serde_norway::from_str("email: ana@example.com\npayment:\n  method: cash\n")?;

    let result =
        Checkout::default().place_order(&mut cart, &details, &mut StdRng::seed_from_u64(1));

    assert!(matches!(
        result,
        Err(CheckoutError::MissingFields(ref fields))
            if fields.len() == 6 && !fields.contains(&"card_number")
    ));
    assert_eq!(cart.item_count(), 2);

    Ok(())
}

#[test]
fn express_checkout_total_leaves_shipping_out() -> TestResult {
    let catalog = default_catalog()?;
    let mut cart = Cart::new(&catalog);

    cart.add_item(id(1)?, 1);

    let mut details: CheckoutDetails =
        serde_norway::from_str(include_str!("../fixtures/checkout/card.yml"))?;
    details.shipping = ShippingMethod::Express;

    let receipt =
        Checkout::default().place_order(&mut cart, &details, &mut StdRng::seed_from_u64(9))?;
    let summary = receipt.summary();

    assert_eq!(summary.subtotal, Money::from_minor(299_900, COP));
    assert_eq!(summary.tax, Money::from_minor(23_992, COP));
    assert_eq!(summary.shipping, Money::from_minor(999, COP));
    assert_eq!(summary.total, Money::from_minor(299_900 + 23_992, COP));

    Ok(())
}

#[test]
fn sample_checkout_details_are_complete() -> TestResult {
    let card: CheckoutDetails =
        serde_norway::from_str(include_str!("../fixtures/checkout/card.yml"))?;
    let cash: CheckoutDetails =
        serde_norway::from_str(include_str!("../fixtures/checkout/cash.yml"))?;

    assert!(card.missing_fields().is_empty());
    assert!(matches!(card.payment, Payment::Card(_)));
    assert_eq!(card.shipping, ShippingMethod::Standard);

    assert!(cash.missing_fields().is_empty());
    assert_eq!(cash.payment, Payment::Cash);
    assert_eq!(cash.shipping, ShippingMethod::Express);

    Ok(())
}
