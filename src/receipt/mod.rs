//! Receipt

use std::{io, ops::Range};

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    checkout::OrderNumber,
    pricing::{OrderSummary, ShippingMethod},
    products::{Product, ProductId},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// One purchased line, frozen at the moment the order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine<'a> {
    /// Product identifier
    pub product: ProductId,

    /// Product name
    pub name: String,

    /// Price of one unit
    pub unit_price: Money<'a, Currency>,

    /// Units bought
    pub quantity: u32,

    /// Unit price × quantity
    pub line_total: Money<'a, Currency>,
}

impl<'a> ReceiptLine<'a> {
    /// Snapshot `quantity` units of `product`.
    pub fn new(product: &Product<'a>, quantity: u32) -> Self {
        let line_total = product
            .price
            .to_minor_units()
            .saturating_mul(i64::from(quantity));

        ReceiptLine {
            product: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            line_total: Money::from_minor(line_total, product.price.currency()),
        }
    }
}

/// Receipt for a placed order.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    number: OrderNumber,
    lines: Vec<ReceiptLine<'a>>,
    summary: OrderSummary<'a>,
    shipping_method: ShippingMethod,
}

impl<'a> Receipt<'a> {
    /// Create a new receipt with the given details.
    pub fn new(
        number: OrderNumber,
        lines: Vec<ReceiptLine<'a>>,
        summary: OrderSummary<'a>,
        shipping_method: ShippingMethod,
    ) -> Self {
        Receipt {
            number,
            lines,
            summary,
            shipping_method,
        }
    }

    /// Order number
    pub fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// Purchased lines, in cart order
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Subtotal, tax, shipping and total
    pub fn summary(&self) -> &OrderSummary<'a> {
        &self.summary
    }

    /// Delivery speed chosen at checkout
    pub fn shipping_method(&self) -> ShippingMethod {
        self.shipping_method
    }

    /// Total units bought.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Writes the receipt as a table followed by the order totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        writeln!(out, "\n Order #{}", self.number).map_err(|_err| ReceiptError::IO)?;

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                line.line_total.to_string(),
            ]);
        }

        write_table(&mut out, builder, 2..5)?;

        write_summary(&mut out, &self.summary, self.shipping_method)
    }
}

/// Writes a table with the shared receipt styling: rounded borders, a bold header row and
/// right-aligned `numeric` column range.
///
/// # Errors
///
/// Returns an error if the table cannot be written.
pub(crate) fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: Range<usize>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)
}

fn write_summary(
    out: &mut impl io::Write,
    summary: &OrderSummary<'_>,
    shipping_method: ShippingMethod,
) -> Result<(), ReceiptError> {
    let shipping_label = match shipping_method {
        ShippingMethod::Standard => " Shipping (standard):",
        ShippingMethod::Express => " Shipping (express):",
        ShippingMethod::Overnight => " Shipping (overnight):",
    };

    let rows = [
        (" Subtotal:", summary.subtotal.to_string()),
        (" Tax:", summary.tax.to_string()),
        (shipping_label, summary.shipping.to_string()),
        (" Total:", summary.total.to_string()),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in &rows {
        write_summary_line(out, label, value, label_width, value_width)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

/// Writes a summary line with a right-aligned label and a right-aligned value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReceiptError> {
    writeln!(out, "{label:>label_col_width$}  {value:>value_col_width$}")
        .map_err(|_err| ReceiptError::IO)
}
