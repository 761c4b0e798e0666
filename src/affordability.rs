//! Payment-to-income affordability rule.
//!
//! A loan is affordable when the monthly payment is at most half of the
//! borrower's monthly income. This is a business rule layered on top of the
//! engine output; the engine itself knows nothing about income.

use crate::error::{AppError, Result};

/// Largest share of monthly income the payment may take.
pub const MAX_PAYMENT_TO_INCOME: f64 = 0.5;

/// Outcome of an affordability check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affordability {
    pub payment: f64,
    pub monthly_income: f64,

    /// `payment / monthly_income`.
    pub ratio: f64,

    pub affordable: bool,
}

impl Affordability {
    /// Payment as a percentage of income.
    pub fn percent_of_income(&self) -> f64 {
        self.ratio * 100.0
    }

    /// Human-readable verdict.
    pub fn status(&self) -> &'static str {
        if self.affordable {
            "SAFE (Affordable)"
        } else {
            "NOT AFFORDABLE (payment exceeds 50% of income)"
        }
    }
}

/// Checks `payment` against `monthly_income`.
///
/// # Errors
///
/// `InvalidInput` when the income is not a finite, strictly positive number.
pub fn assess(payment: f64, monthly_income: f64) -> Result<Affordability> {
    if !monthly_income.is_finite() || monthly_income <= 0.0 {
        return Err(AppError::invalid("income", "must be a positive number"));
    }

    Ok(Affordability {
        payment,
        monthly_income,
        ratio: payment / monthly_income,
        affordable: payment <= monthly_income * MAX_PAYMENT_TO_INCOME,
    })
}
