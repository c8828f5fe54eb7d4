//! Presentation layer for the Capelinha spending dashboard.
//!
//! Renders the aggregated ledger as ratatui views: the monthly bar chart,
//! per-month daily charts, the metric grid with mean deltas and the
//! grand-total panel.

pub mod app;
pub mod charts;
pub mod components;
pub mod themes;
