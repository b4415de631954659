//! Course pricing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Highest list price a course may carry (one million in major units).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Discount applied to a course's list price, 0 to 100 percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Discount(u8);

impl Discount {
    pub const NONE: Self = Self(0);

    pub fn try_new(percent: u8) -> Result<Self, ValidationError> {
        if percent > 100 {
            return Err(ValidationError::out_of_range(
                "discount_percent",
                0,
                100,
                i64::from(percent),
            ));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Price after discount. The discount amount is truncated to whole cents.
    pub fn apply(&self, price_cents: i64) -> i64 {
        let price = i128::from(price_cents);
        let discounted = price - price * i128::from(self.0) / 100;
        // Lies between 0 and `price_cents`, so the narrowing is lossless.
        discounted as i64
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
