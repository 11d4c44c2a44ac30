//! Checkout details
//!
//! What the shopper types into the checkout form. Nothing here is sent anywhere; the details
//! are only checked for completeness before an order is placed.

use serde::Deserialize;
use smallvec::SmallVec;

use crate::pricing::ShippingMethod;

/// Names of the form fields left blank.
pub type MissingFields = SmallVec<[&'static str; 12]>;

/// Delivery address
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShippingAddress {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// State or department
    pub state: String,

    /// Postal code
    pub zip_code: String,
}

/// Card details
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    /// Card number
    pub number: String,

    /// Expiry date, as typed
    pub expiry: String,

    /// Security code
    pub cvv: String,

    /// Name on the card
    pub holder: String,
}

/// How the order is paid for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum Payment {
    /// Card payment
    Card(CardDetails),

    /// Cash on delivery
    Cash,
}

impl Default for Payment {
    fn default() -> Self {
        Payment::Card(CardDetails::default())
    }
}

/// Checkout form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CheckoutDetails {
    /// Contact email
    pub email: String,

    /// Delivery address
    pub address: ShippingAddress,

    /// Payment
    pub payment: Payment,

    /// Delivery speed
    pub shipping: ShippingMethod,
}

impl CheckoutDetails {
    /// Names of every required field that is blank.
    ///
    /// Card fields are only required when paying by card.
    pub fn missing_fields(&self) -> MissingFields {
        let address = &self.address;

        let mut fields: SmallVec<[(&'static str, &str); 12]> = SmallVec::new();

        fields.extend([
            ("email", self.email.as_str()),
            ("first_name", address.first_name.as_str()),
            ("last_name", address.last_name.as_str()),
            ("address", address.address.as_str()),
            ("city", address.city.as_str()),
            ("state", address.state.as_str()),
            ("zip_code", address.zip_code.as_str()),
        ]);

        if let Payment::Card(card) = &self.payment {
            fields.extend([
                ("card_number", card.number.as_str()),
                ("card_expiry", card.expiry.as_str()),
                ("card_cvv", card.cvv.as_str()),
                ("card_holder", card.holder.as_str()),
            ]);
        }

        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}
