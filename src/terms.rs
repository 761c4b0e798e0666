//! Loan inputs: raw user request and the validated terms the engine consumes.

use crate::error::{AppError, Result};

/// Immutable input to every engine computation.
///
/// `term_periods` is signed so that zero or negative month counts reach the
/// engine and are reported as [`crate::AmortizationError::InvalidTerm`]
/// instead of being silently coerced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    /// Amount borrowed, in currency units.
    pub principal: f64,

    /// Nominal annual rate in percent (10.0 means 10% per year).
    pub annual_rate_percent: f64,

    /// Number of monthly periods.
    pub term_periods: i64,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, term_periods: i64) -> Self {
        LoanTerms {
            principal,
            annual_rate_percent,
            term_periods,
        }
    }

    /// Monthly rate as a fraction: `annual_rate_percent / 100 / 12`.
    pub fn periodic_rate(&self) -> f64 {
        periodic_rate(self.annual_rate_percent)
    }
}

pub(crate) fn periodic_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// How the loan term was expressed by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TermSpec {
    /// Explicit number of months, passed through unchanged.
    Months(i64),

    /// Years, possibly fractional. Converted with `round(years * 12)`.
    Years(f64),
}

impl TermSpec {
    /// Resolves the term to a number of monthly periods.
    ///
    /// Positivity is not checked here; the engine owns that rule.
    pub fn to_periods(self) -> Result<i64> {
        match self {
            TermSpec::Months(months) => Ok(months),
            TermSpec::Years(years) => {
                if !years.is_finite() {
                    return Err(AppError::invalid("years", "must be a finite number"));
                }
                let months = (years * 12.0).round();
                if months.abs() > i64::MAX as f64 {
                    return Err(AppError::invalid("years", "term is too long"));
                }
                Ok(months as i64)
            }
        }
    }
}

/// Unvalidated loan parameters as collected from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanRequest {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term: TermSpec,
}

impl LoanRequest {
    /// Validates user input into [`LoanTerms`].
    ///
    /// Rejects non-finite or negative principal and rate. The term is only
    /// resolved to months here.
    pub fn validate(&self) -> Result<LoanTerms> {
        if !self.principal.is_finite() {
            return Err(AppError::invalid("principal", "must be a finite number"));
        }
        if self.principal < 0.0 {
            return Err(AppError::invalid("principal", "must not be negative"));
        }
        if !self.annual_rate_percent.is_finite() {
            return Err(AppError::invalid("rate", "must be a finite number"));
        }
        if self.annual_rate_percent < 0.0 {
            return Err(AppError::invalid("rate", "must not be negative"));
        }

        let term_periods = self.term.to_periods()?;

        Ok(LoanTerms::new(
            self.principal,
            self.annual_rate_percent,
            term_periods,
        ))
    }
}
