//! Period rows and the ordered schedule the engine produces.

use crate::precision::Precision;

/// One period of an amortization schedule.
///
/// Money values are already rounded to the schedule's [`Precision`].
/// `interest + principal == payment` holds within rounding tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodRow {
    /// 1-based period index.
    pub period: u32,

    /// Amount paid this period. Equal to the level payment except possibly
    /// on the final period.
    pub payment: f64,

    /// Interest accrued on the opening balance.
    pub interest: f64,

    /// Portion of the payment that retires principal.
    pub principal: f64,

    /// Balance remaining after the payment. Never negative.
    pub balance: f64,
}

/// Chronologically ordered amortization schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    rows: Vec<PeriodRow>,
    precision: Precision,
}

impl Schedule {
    pub(crate) fn new(rows: Vec<PeriodRow>, precision: Precision) -> Self {
        Schedule { rows, precision }
    }

    pub fn rows(&self) -> &[PeriodRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeriodRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&PeriodRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&PeriodRow> {
        self.rows.last()
    }

    /// Precision the row values were rounded to.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Sum of `payment` over all rows.
    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|r| r.payment).sum()
    }

    /// Sum of `interest` over all rows.
    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    /// Sum of `principal` over all rows. Matches the loan principal within
    /// rounding tolerance.
    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal).sum()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PeriodRow;
    type IntoIter = std::slice::Iter<'a, PeriodRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
