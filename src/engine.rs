//! Core amortization engine.
//!
//! Derives the level payment of a fixed-rate loan and walks the balance down
//! period by period. The engine is pure: it owns no state between calls and
//! identical inputs always produce a bit-identical [`Schedule`].

use crate::error::AmortizationError;
use crate::precision::Precision;
use crate::schedule::{PeriodRow, Schedule};
use crate::terms::{periodic_rate, LoanTerms};
use log::debug;

/// Rows reserved up front; longer schedules grow the vector as they go.
const PREALLOCATED_ROWS: u32 = 1200;

/// Amortization engine configured with the rounding applied to emitted rows.
///
/// The engine is `Copy` and stateless, so a single value can be shared by any
/// number of callers or threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmortizationEngine {
    precision: Precision,
}

impl AmortizationEngine {
    /// Creates an engine rounding rows to [`Precision::DEFAULT_DIGITS`].
    pub fn new() -> Self {
        AmortizationEngine::default()
    }

    /// Creates an engine rounding rows to the given precision.
    pub fn with_precision(precision: Precision) -> Self {
        AmortizationEngine { precision }
    }

    /// Level payment for `terms`, unrounded.
    pub fn payment(&self, terms: &LoanTerms) -> Result<f64, AmortizationError> {
        compute_payment(terms.principal, terms.annual_rate_percent, terms.term_periods)
    }

    /// Full period-by-period schedule for `terms`.
    ///
    /// # Terminal correction
    ///
    /// When the nominal principal portion would exceed the open balance, it is
    /// clamped to the balance and that period's payment becomes
    /// `interest + balance`. The final period always retires whatever balance
    /// remains, so the last row's balance is exactly zero.
    ///
    /// # Errors
    ///
    /// [`AmortizationError::InvalidTerm`] when `term_periods` is not positive
    /// or does not fit a `u32` period index.
    pub fn schedule(&self, terms: &LoanTerms) -> Result<Schedule, AmortizationError> {
        let periods = period_count(terms.term_periods)?;
        let mut payment = self.payment(terms)?;
        let rate = terms.periodic_rate();
        let mut balance = terms.principal;
        let mut rows = Vec::with_capacity(row_capacity(periods));

        for period in 1..=periods {
            let interest = balance * rate;
            let mut principal = payment - interest;

            if principal > balance || period == periods {
                if principal != balance {
                    debug!(
                        "Period {}: principal portion {} adjusted to balance {}",
                        period, principal, balance
                    );
                }
                principal = balance;
                payment = interest + principal;
            }

            balance -= principal;
            if balance <= 0.0 {
                balance = 0.0;
            }

            rows.push(PeriodRow {
                period,
                payment: self.precision.round(payment),
                interest: self.precision.round(interest),
                principal: self.precision.round(principal),
                balance: self.precision.round(balance),
            });
        }

        Ok(Schedule::new(rows, self.precision))
    }
}

/// Computes the level monthly payment.
///
/// - `principal == 0` yields `0.0`.
/// - An interest-free loan is repaid in equal straight-line instalments.
/// - Otherwise the annuity formula
///   `P * r * (1 + r)^n / ((1 + r)^n - 1)` is applied with
///   `r = annual_rate_percent / 100 / 12`, evaluated as
///   `P * r / (1 - (1 + r)^-n)` through `ln_1p`/`exp_m1` so that long terms
///   do not overflow and tiny rates do not cancel to zero.
///
/// # Examples
///
/// ```
/// use loan_amortization::compute_payment;
///
/// let payment = compute_payment(1200.0, 0.0, 12).unwrap();
/// assert_eq!(payment, 100.0);
///
/// assert!(compute_payment(1200.0, 5.0, 0).is_err());
/// ```
pub fn compute_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_periods: i64,
) -> Result<f64, AmortizationError> {
    if term_periods <= 0 {
        return Err(AmortizationError::InvalidTerm { term: term_periods });
    }
    if principal == 0.0 {
        return Ok(0.0);
    }

    let rate = periodic_rate(annual_rate_percent);
    let payment = if rate == 0.0 {
        principal / term_periods as f64
    } else {
        // 1 - (1 + r)^-n
        let discount = -(-(term_periods as f64) * rate.ln_1p()).exp_m1();
        principal * rate / discount
    };

    debug!(
        "Level payment {} for principal {} at {}% over {} periods",
        payment, principal, annual_rate_percent, term_periods
    );
    Ok(payment)
}

/// Computes the amortization schedule with the default precision.
///
/// See [`AmortizationEngine::schedule`].
pub fn compute_schedule(
    principal: f64,
    annual_rate_percent: f64,
    term_periods: i64,
) -> Result<Schedule, AmortizationError> {
    AmortizationEngine::new().schedule(&LoanTerms::new(
        principal,
        annual_rate_percent,
        term_periods,
    ))
}

fn row_capacity(periods: u32) -> usize {
    periods.min(PREALLOCATED_ROWS) as usize
}

fn period_count(term_periods: i64) -> Result<u32, AmortizationError> {
    match u32::try_from(term_periods) {
        Ok(periods) if periods > 0 => Ok(periods),
        _ => Err(AmortizationError::InvalidTerm { term: term_periods }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annuity(principal: f64, annual_rate_percent: f64, n: i64) -> f64 {
        let r = annual_rate_percent / 100.0 / 12.0;
        principal * r * (1.0 + r).powf(n as f64) / ((1.0 + r).powf(n as f64) - 1.0)
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn test_payment_matches_annuity_formula() {
        let payment = compute_payment(250_000.0, 6.0, 360).unwrap();
        assert_close(payment, 1498.876_312_881_892, 1e-9 * 1498.88);
    }

    #[test]
    fn test_payment_reference_loan() {
        let payment = compute_payment(20_000_000.0, 10.0, 120).unwrap();
        assert_close(payment, 264_301.473_763_523_86, 1e-9 * 264_301.47);
        assert_close(payment, annuity(20_000_000.0, 10.0, 120), 1e-9 * payment);
    }

    #[test]
    fn test_payment_interest_free_is_straight_line() {
        assert_eq!(compute_payment(1200.0, 0.0, 12).unwrap(), 100.0);
        assert_eq!(compute_payment(1000.0, 0.0, 3).unwrap(), 1000.0 / 3.0);
    }

    #[test]
    fn test_payment_zero_principal() {
        assert_eq!(compute_payment(0.0, 7.5, 360).unwrap(), 0.0);
        assert_eq!(compute_payment(0.0, 0.0, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_payment_rejects_non_positive_term() {
        assert_eq!(
            compute_payment(1000.0, 5.0, 0),
            Err(AmortizationError::InvalidTerm { term: 0 })
        );
        assert_eq!(
            compute_payment(1000.0, 5.0, -12),
            Err(AmortizationError::InvalidTerm { term: -12 })
        );
    }

    #[test]
    fn test_zero_principal_is_checked_after_term() {
        assert!(compute_payment(0.0, 5.0, 0).is_err());
    }

    #[test]
    fn test_schedule_rejects_non_positive_term() {
        assert_eq!(
            compute_schedule(1000.0, 5.0, 0),
            Err(AmortizationError::InvalidTerm { term: 0 })
        );
        assert_eq!(
            compute_schedule(1000.0, 5.0, -1),
            Err(AmortizationError::InvalidTerm { term: -1 })
        );
    }

    #[test]
    fn test_schedule_rejects_term_beyond_period_index() {
        let term = i64::from(u32::MAX) + 1;
        assert_eq!(
            compute_schedule(1000.0, 5.0, term),
            Err(AmortizationError::InvalidTerm { term })
        );
    }

    #[test]
    fn test_schedule_reference_loan() {
        let schedule = compute_schedule(20_000_000.0, 10.0, 120).unwrap();
        assert_eq!(schedule.len(), 120);

        let first = schedule.first().unwrap();
        assert_eq!(first.period, 1);
        assert_close(first.interest, 166_666.666_666_666_7, 1e-6);
        assert_close(first.principal, 97_634.807_096_857, 1e-6);

        let last = schedule.last().unwrap();
        assert_eq!(last.period, 120);
        assert_eq!(last.balance, 0.0);
        assert_close(schedule.total_principal(), 20_000_000.0, 1e-6);
    }

    #[test]
    fn test_schedule_interest_free() {
        let schedule = compute_schedule(1200.0, 0.0, 12).unwrap();
        for (i, row) in schedule.iter().enumerate() {
            assert_eq!(row.payment, 100.0);
            assert_eq!(row.interest, 0.0);
            assert_eq!(row.principal, 100.0);
            assert_eq!(row.balance, 1200.0 - 100.0 * (i as f64 + 1.0));
        }
    }

    #[test]
    fn test_single_period_pays_everything() {
        let schedule = compute_schedule(1000.0, 12.0, 1).unwrap();
        assert_eq!(schedule.len(), 1);

        let row = schedule.first().unwrap();
        assert_close(row.payment, 1010.0, 1e-9 * 1010.0);
        assert_close(row.interest, 10.0, 1e-12);
        assert_eq!(row.principal, 1000.0);
        assert_eq!(row.balance, 0.0);
    }

    #[test]
    fn test_zero_principal_schedule_is_all_zero() {
        let schedule = compute_schedule(0.0, 9.0, 24).unwrap();
        assert_eq!(schedule.len(), 24);
        for row in &schedule {
            assert_eq!(row.payment, 0.0);
            assert_eq!(row.interest, 0.0);
            assert_eq!(row.principal, 0.0);
            assert_eq!(row.balance, 0.0);
        }
    }

    #[test]
    fn test_final_payment_absorbs_residual() {
        // 1000 / 3 is not representable, so the last period picks up the drift.
        let schedule = compute_schedule(1000.0, 0.0, 3).unwrap();
        let last = schedule.last().unwrap();
        assert_eq!(last.balance, 0.0);
        assert_close(last.payment, 1000.0 / 3.0, 1e-9);
        assert_close(schedule.total_principal(), 1000.0, 1e-9);
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let a = compute_schedule(333_333.33, 4.375, 97).unwrap();
        let b = compute_schedule(333_333.33, 4.375, 97).unwrap();
        assert_eq!(a, b);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.payment.to_bits(), y.payment.to_bits());
            assert_eq!(x.balance.to_bits(), y.balance.to_bits());
        }
    }

    #[test]
    fn test_custom_precision_rounds_rows() {
        let engine = AmortizationEngine::with_precision(Precision::new(2));
        let terms = LoanTerms::new(20_000_000.0, 10.0, 120);
        let schedule = engine.schedule(&terms).unwrap();

        let first = schedule.first().unwrap();
        assert_eq!(first.interest, 166_666.67);
        assert_eq!(first.payment, 264_301.47);
        assert_eq!(schedule.precision(), Precision::new(2));
        assert_eq!(schedule.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_engine_payment_matches_free_function() {
        let terms = LoanTerms::new(50_000.0, 3.5, 60);
        let engine = AmortizationEngine::new();
        assert_eq!(
            engine.payment(&terms).unwrap(),
            compute_payment(50_000.0, 3.5, 60).unwrap()
        );
    }

    #[test]
    fn test_very_long_term_pays_interest_only_level() {
        let principal = 100_000.0;
        let payment = compute_payment(principal, 10.0, 100_000).unwrap();
        let interest_only = principal * 10.0 / 100.0 / 12.0;
        assert!(payment.is_finite());
        assert_close(payment, interest_only, 1e-9 * interest_only);

        let schedule = compute_schedule(principal, 10.0, 100_000).unwrap();
        assert_eq!(schedule.len(), 100_000);
        assert!(schedule.iter().all(|row| row.payment.is_finite()));
        assert_eq!(schedule.last().unwrap().balance, 0.0);
        assert_close(schedule.total_principal(), principal, 1e-6);
    }

    #[test]
    fn test_tiny_rate_stays_level() {
        let payment = compute_payment(1200.0, 1e-14, 12).unwrap();
        assert!(payment.is_finite());
        assert_close(payment, 100.0, 1e-9 * 100.0);

        let schedule = compute_schedule(1200.0, 1e-14, 12).unwrap();
        let first = schedule.first().unwrap();
        assert_close(first.payment, 100.0, 1e-9);
        assert_close(first.balance, 1100.0, 1e-9);
        assert_eq!(schedule.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_row_reservation_is_capped() {
        assert_eq!(row_capacity(12), 12);
        assert_eq!(row_capacity(PREALLOCATED_ROWS), PREALLOCATED_ROWS as usize);
        assert_eq!(row_capacity(u32::MAX), PREALLOCATED_ROWS as usize);
    }
}
