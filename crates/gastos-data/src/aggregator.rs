//! Daily, monthly and yearly aggregation over the cleaned ledger.
//!
//! Every operation here is a pure function of the record slice. The dataset
//! is small (tens of thousands of rows at most), so each call recomputes
//! from scratch; there is deliberately no caching layer.

use std::collections::BTreeMap;

use chrono::Datelike;
use gastos_core::calendar::{month_label, MONTHS_PER_YEAR};
use gastos_core::error::{DashboardError, Result};
use gastos_core::models::{DailyTotals, MonthlyAggregate, MonthlyMetric, PaymentRecord};

/// Stateless helper that derives every aggregate the views consume.
pub struct PaymentAggregator;

impl PaymentAggregator {
    /// Sum `amount_paid` per day-of-month for the given calendar month.
    ///
    /// `month` must be 1-12; anything else is a caller error. Records from
    /// other months never contribute, even when they share a day-of-month.
    pub fn daily_totals(records: &[PaymentRecord], month: u32) -> Result<DailyTotals> {
        if !(1..=12).contains(&month) {
            return Err(DashboardError::InvalidMonth(month));
        }

        let mut totals = DailyTotals::new();
        for record in records {
            if record.payment_date.month() == month {
                *totals.entry(record.payment_date.day()).or_insert(0.0) += record.amount_paid;
            }
        }
        Ok(totals)
    }

    /// Sum all four monetary fields per calendar month of `payment_date`,
    /// reindexed to the full January→December list.
    ///
    /// Always returns exactly twelve entries in chronological order. Months
    /// absent from the data appear with zero sums and `record_count == 0`
    /// rather than being dropped; downstream consumers rely on the fixed
    /// length and order.
    pub fn monthly_totals(records: &[PaymentRecord]) -> Vec<MonthlyAggregate> {
        let mut by_month: BTreeMap<u32, MonthlyAggregate> = BTreeMap::new();

        for record in records {
            let month = record.payment_date.month();
            by_month
                .entry(month)
                .or_insert_with(|| empty_aggregate(month))
                .add_record(record);
        }

        // Reindex: every month of the year appears, present or not.
        (1..=MONTHS_PER_YEAR as u32)
            .map(|month| by_month.remove(&month).unwrap_or_else(|| empty_aggregate(month)))
            .collect()
    }

    /// Sum of `amount_paid` across the whole ledger, independent of month.
    pub fn grand_total(records: &[PaymentRecord]) -> f64 {
        records.iter().map(|r| r.amount_paid).sum()
    }

    /// Mean of the twelve monthly paid sums.
    ///
    /// The divisor is the fixed constant 12, not the count of months with
    /// data; an absent month contributes its zero identity.
    pub fn monthly_mean(monthly: &[MonthlyAggregate]) -> f64 {
        monthly.iter().map(|m| m.sum_paid).sum::<f64>() / MONTHS_PER_YEAR as f64
    }

    /// Each month's paid sum and its signed distance from the yearly mean.
    ///
    /// Returns twelve metrics in chronological order. The sign is kept
    /// (exposed as magnitude plus direction) so the views can format
    /// above-mean and below-mean months differently.
    pub fn monthly_mean_and_deltas(records: &[PaymentRecord]) -> Vec<MonthlyMetric> {
        let monthly = Self::monthly_totals(records);
        let mean = Self::monthly_mean(&monthly);

        monthly
            .into_iter()
            .map(|m| MonthlyMetric::from_signed_delta(m.label, m.sum_paid, m.sum_paid - mean))
            .collect()
    }
}

/// A zero aggregate for a month with no ledger rows.
fn empty_aggregate(month: u32) -> MonthlyAggregate {
    MonthlyAggregate {
        month,
        label: month_label(month).unwrap_or_default().to_string(),
        ..Default::default()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
