//! # Loan Amortization
//!
//! Computes the level payment and period-by-period amortization schedule of a
//! fixed-rate, fixed-term loan, and renders it as a console report or a CSV
//! export.
//!
//! ## Design Principles
//!
//! - **Pure engine**: no state between calls, identical inputs give
//!   bit-identical schedules
//! - **Exact payoff**: the final period retires the remaining balance, so the
//!   last balance is always zero
//! - **Configurable rounding**: rows are rounded through `rust_decimal` to a
//!   [`Precision`] (10 digits by default) after computation
//! - **Explicit terms**: zero or negative month counts are rejected, never
//!   substituted
//!
//! ## Example
//!
//! ```
//! use loan_amortization::{compute_payment, compute_schedule};
//!
//! let payment = compute_payment(20_000_000.0, 10.0, 120).unwrap();
//! assert!((payment - 264_301.47).abs() < 0.01);
//!
//! let schedule = compute_schedule(20_000_000.0, 10.0, 120).unwrap();
//! assert_eq!(schedule.len(), 120);
//! assert_eq!(schedule.last().unwrap().balance, 0.0);
//! ```

pub mod affordability;
pub mod engine;
pub mod error;
pub mod export;
pub mod precision;
pub mod report;
pub mod schedule;
pub mod terms;

pub use affordability::{assess, Affordability, MAX_PAYMENT_TO_INCOME};
pub use engine::{compute_payment, compute_schedule, AmortizationEngine};
pub use error::{AmortizationError, AppError, Result};
pub use export::{export_csv_file, write_csv};
pub use precision::Precision;
pub use report::{format_currency, Report, ReportOptions};
pub use schedule::{PeriodRow, Schedule};
pub use terms::{LoanRequest, LoanTerms, TermSpec};
