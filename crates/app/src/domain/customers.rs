//! Customer and address details copied onto carts and orders.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneDetails {
    /// Country calling code, e.g. `60`.
    pub country: String,

    pub number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Identifier of the customer in an external user system, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<CustomerName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address_one: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_two: Option<String>,

    pub city: String,

    pub country: String,

    pub postcode: String,

    pub state: String,

    pub created_at: Timestamp,

    pub created_by: String,
}

impl Address {
    /// Placeholder shipping address given to freshly checked-out orders.
    #[must_use]
    pub fn blank_shipping(created_at: Timestamp, created_by: impl Into<String>) -> Self {
        Self {
            address_one: String::new(),
            address_two: None,
            city: String::new(),
            country: "MY".to_string(),
            postcode: String::new(),
            state: "selangor".to_string(),
            created_at,
            created_by: created_by.into(),
        }
    }
}
