//! Post-computation rounding of schedule values.
//!
//! The engine computes in `f64`. Every value it emits is rounded to a fixed
//! number of fractional digits through `rust_decimal`, which removes
//! floating-point noise before display and export without touching the
//! payment formula itself.

use log::warn;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Number of fractional digits schedule values are rounded to.
///
/// # Examples
///
/// ```
/// use loan_amortization::Precision;
///
/// let cents = Precision::new(2);
/// assert_eq!(cents.round(1.005_f64), 1.0);
/// assert_eq!(cents.round(2.675_f64), 2.67);
/// assert_eq!(Precision::default().digits(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precision(u32);

impl Precision {
    /// Digits used when nothing else is configured.
    pub const DEFAULT_DIGITS: u32 = 10;

    /// Largest scale `rust_decimal` can represent.
    pub const MAX_DIGITS: u32 = 28;

    /// Creates a precision, clamping to [`Precision::MAX_DIGITS`].
    pub fn new(digits: u32) -> Self {
        if digits > Self::MAX_DIGITS {
            warn!(
                "Precision of {} digits exceeds the maximum, using {}",
                digits,
                Self::MAX_DIGITS
            );
            return Precision(Self::MAX_DIGITS);
        }
        Precision(digits)
    }

    pub fn digits(&self) -> u32 {
        self.0
    }

    /// Rounds `value` half-to-even on its exact binary value.
    ///
    /// Values `rust_decimal` cannot hold (NaN, infinities, magnitudes beyond
    /// ~7.9e28) are returned unchanged. Negative zero becomes `0.0`.
    pub fn round(&self, value: f64) -> f64 {
        match self.to_decimal(value) {
            Some(decimal) => decimal.to_f64().unwrap_or(value),
            None => value,
        }
    }

    /// Converts `value` to a decimal with exactly `digits` fractional digits.
    pub fn to_decimal(&self, value: f64) -> Option<Decimal> {
        let mut decimal = Decimal::from_f64_retain(value)?
            .round_dp_with_strategy(self.0, RoundingStrategy::MidpointNearestEven);
        decimal.rescale(self.0);
        if decimal.is_zero() {
            decimal.set_sign_positive(true);
        }
        Some(decimal)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision(Self::DEFAULT_DIGITS)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} digits", self.0)
    }
}
