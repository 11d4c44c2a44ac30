//! Pricing
//!
//! Tax and shipping on top of a cart subtotal.

use clap::ValueEnum;
use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

/// Sales tax applied to every order, as a fraction.
pub const TAX_RATE: f64 = 0.08;

/// Errors that can occur while pricing an order.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Minor unit arithmetic overflowed.
    #[error("order total overflowed")]
    Overflow,
}

/// Calculate `percent` of an amount in minor units, rounding half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the result cannot be represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Shipping method chosen at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    /// Standard delivery, free
    #[default]
    Standard,

    /// Express delivery
    Express,

    /// Next-day delivery
    Overnight,
}

/// Shipping cost per method, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShippingRates {
    /// Standard delivery cost
    pub standard: i64,

    /// Express delivery cost
    pub express: i64,

    /// Overnight delivery cost
    pub overnight: i64,
}

impl Default for ShippingRates {
    fn default() -> Self {
        ShippingRates {
            standard: 0,
            express: 999,
            overnight: 1_999,
        }
    }
}

impl ShippingRates {
    /// Cost of `method` in minor units.
    pub fn cost(&self, method: ShippingMethod) -> i64 {
        match method {
            ShippingMethod::Standard => self.standard,
            ShippingMethod::Express => self.express,
            ShippingMethod::Overnight => self.overnight,
        }
    }
}

/// Rates used to turn a subtotal into an order total.
#[derive(Debug, Clone, Copy)]
pub struct PricingSettings {
    /// Tax rate applied to the subtotal
    pub tax_rate: Percentage,

    /// Shipping costs
    pub shipping: ShippingRates,
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate: Percentage::from(TAX_RATE),
            shipping: ShippingRates::default(),
        }
    }
}

/// Order summary: subtotal, tax, shipping and the total to pay.
///
/// Shipping is quoted alongside the order but is not part of the total, which is the subtotal
/// plus tax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary<'a> {
    /// Sum of line totals
    pub subtotal: Money<'a, Currency>,

    /// Tax on the subtotal
    pub tax: Money<'a, Currency>,

    /// Shipping cost, shown with the order
    pub shipping: Money<'a, Currency>,

    /// Subtotal plus tax
    pub total: Money<'a, Currency>,
}

impl<'a> OrderSummary<'a> {
    /// Price an order from its subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the tax cannot be calculated or the total overflows.
    pub fn new(
        subtotal: Money<'a, Currency>,
        settings: &PricingSettings,
        shipping_method: ShippingMethod,
    ) -> Result<Self, PricingError> {
        let currency = subtotal.currency();
        let subtotal_minor = subtotal.to_minor_units();

        let tax_minor = percent_of_minor(&settings.tax_rate, subtotal_minor)?;
        let shipping_minor = settings.shipping.cost(shipping_method);

        let total_minor = subtotal_minor
            .checked_add(tax_minor)
            .ok_or(PricingError::Overflow)?;

        Ok(OrderSummary {
            subtotal,
            tax: Money::from_minor(tax_minor, currency),
            shipping: Money::from_minor(shipping_minor, currency),
            total: Money::from_minor(total_minor, currency),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::COP;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_calculates_correctly() -> TestResult {
        let result = percent_of_minor(&Percentage::from(0.08), 599_800)?;

        assert_eq!(result, 47_984);

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        // 8% of 1_000_006 is 80_000.48; half of 3 is 1.5
        let eight_percent = Percentage::from(0.08);

        assert_eq!(percent_of_minor(&eight_percent, 1_000_006)?, 80_000);
        assert_eq!(percent_of_minor(&Percentage::from(0.5), 3)?, 2);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let result = percent_of_minor(&Percentage::from(2.0), i64::MAX);

        assert!(matches!(result, Err(PricingError::PercentConversion)));
    }

    #[test]
    fn standard_shipping_is_free() {
        let rates = ShippingRates::default();

        let express = rates.cost(ShippingMethod::Express);
        let overnight = rates.cost(ShippingMethod::Overnight);

        assert_eq!(rates.cost(ShippingMethod::Standard), 0);
        assert!(express < overnight);
    }

    #[test]
    fn summary_quotes_shipping_outside_the_total() -> TestResult {
        let summary = OrderSummary::new(
            Money::from_minor(599_800, COP),
            &PricingSettings::default(),
            ShippingMethod::Express,
        )?;

        assert_eq!(summary.subtotal, Money::from_minor(599_800, COP));
        assert_eq!(summary.tax, Money::from_minor(47_984, COP));
        assert_eq!(summary.shipping, Money::from_minor(999, COP));
        assert_eq!(summary.total, Money::from_minor(647_784, COP));

        Ok(())
    }

    #[test]
    fn summary_of_nothing_is_free() -> TestResult {
        let summary = OrderSummary::new(
            Money::from_minor(0, COP),
            &PricingSettings::default(),
            ShippingMethod::Standard,
        )?;

        assert_eq!(summary.total, Money::from_minor(0, COP));

        Ok(())
    }

    #[test]
    fn summary_overflow_is_reported() {
        let result = OrderSummary::new(
            Money::from_minor(i64::MAX - 1, COP),
            &PricingSettings {
                tax_rate: Percentage::from(0.01),
                shipping: ShippingRates::default(),
            },
            ShippingMethod::Overnight,
        );

        assert!(matches!(result, Err(PricingError::Overflow)));
    }
}
