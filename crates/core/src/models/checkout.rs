//! Checkout form.

use serde::{Deserialize, Serialize};

use crate::stores::orders::ShippingAddress;
use crate::validation::{ValidationErrors, Validator};

/// Contact and shipping details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

impl CheckoutDetails {
    /// Check every field rule.
    ///
    /// # Errors
    ///
    /// Returns all failing fields.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.non_empty("fullName", &self.full_name, "Full name is required")
            .email("email", &self.email, "Invalid email address")
            .min_len("phone", &self.phone, 10, "Phone number is required")
            .non_empty("address", &self.address, "Address is required")
            .non_empty("city", &self.city, "City is required")
            .non_empty("zipCode", &self.zip_code, "ZIP code is required");
        v.finish()
    }

    /// The part of the form stored on the order.
    #[must_use]
    pub fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            full_name: self.full_name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            zip_code: self.zip_code.clone(),
        }
    }
}
