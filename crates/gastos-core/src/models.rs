use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Day-of-month → summed `amount_paid`, computed transiently for one month.
///
/// Days without records are simply absent; whether to draw a zero bar is
/// the view's decision.
pub type DailyTotals = BTreeMap<u32, f64>;

/// One row of the municipal payment ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payee name as free text, canonicalized by the cleaner.
    pub creditor_name: String,
    /// Opaque key of the paying municipal agency.
    pub agency_sequence: u32,
    /// Date the expense was committed.
    pub commitment_date: NaiveDate,
    /// Date the expense was settled.
    pub settlement_date: NaiveDate,
    /// Date the payment went out. Partition key for all monthly grouping.
    pub payment_date: NaiveDate,
    /// Amount effectively paid.
    pub amount_paid: f64,
    /// Amount withheld at source.
    pub amount_withheld: f64,
    /// Amount advanced.
    pub amount_advanced: f64,
    /// Amount annulled.
    pub amount_annulled: f64,
}

/// Sums of the four monetary fields for one calendar month.
///
/// The aggregator always produces exactly twelve of these, January through
/// December, so consumers never need to handle a missing month. A month with
/// no ledger rows carries zero sums and `record_count == 0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// Calendar month, 1-12.
    pub month: u32,
    /// Lower-cased Portuguese month name, the canonical label key.
    pub label: String,
    /// Sum of `amount_paid` over the month's records.
    pub sum_paid: f64,
    /// Sum of `amount_withheld` over the month's records.
    pub sum_withheld: f64,
    /// Sum of `amount_advanced` over the month's records.
    pub sum_advanced: f64,
    /// Sum of `amount_annulled` over the month's records.
    pub sum_annulled: f64,
    /// Number of ledger rows that fell into this month.
    pub record_count: u32,
}

impl MonthlyAggregate {
    /// Whether any ledger row fell into this month.
    pub fn has_data(&self) -> bool {
        self.record_count > 0
    }

    /// Accumulate one record's monetary fields into the sums.
    pub fn add_record(&mut self, record: &PaymentRecord) {
        self.sum_paid += record.amount_paid;
        self.sum_withheld += record.amount_withheld;
        self.sum_advanced += record.amount_advanced;
        self.sum_annulled += record.amount_annulled;
        self.record_count += 1;
    }
}

/// Whether a monthly total sits at-or-above or below the yearly mean.
///
/// A month exactly on the mean counts as [`DeltaDirection::AboveMean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaDirection {
    AboveMean,
    BelowMean,
}

/// One month's paid total and its distance from the twelve-month mean.
///
/// The delta is carried as a non-negative magnitude plus an explicit
/// direction because the presentation layer formats the two cases
/// differently (`+R$` in green, `-R$` in red).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMetric {
    /// Lower-cased Portuguese month name.
    pub label: String,
    /// The month's `sum_paid`.
    pub value: f64,
    /// Absolute distance from the mean of the twelve monthly paid sums.
    pub delta_magnitude: f64,
    /// Which side of the mean the month sits on.
    pub direction: DeltaDirection,
}

impl MonthlyMetric {
    /// Build a metric from the signed `value - mean` difference.
    pub fn from_signed_delta(label: impl Into<String>, value: f64, delta: f64) -> Self {
        let direction = if delta >= 0.0 {
            DeltaDirection::AboveMean
        } else {
            DeltaDirection::BelowMean
        };
        Self {
            label: label.into(),
            value,
            delta_magnitude: delta.abs(),
            direction,
        }
    }

    /// The signed `value - mean` difference.
    pub fn signed_delta(&self) -> f64 {
        match self.direction {
            DeltaDirection::AboveMean => self.delta_magnitude,
            DeltaDirection::BelowMean => -self.delta_magnitude,
        }
    }
}
