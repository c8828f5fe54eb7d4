mod bootstrap;

use std::path::PathBuf;

use anyhow::Result;
use gastos_core::error::DashboardError;
use gastos_core::settings::Settings;
use gastos_data::aggregator::PaymentAggregator;
use gastos_data::{cleaner, loader};
use gastos_ui::app::{App, DashboardData, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Gastos Capelinha v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    let data_dir = match settings.data_path.clone() {
        Some(path) => path,
        None => bootstrap::discover_data_dir().ok_or_else(|| {
            DashboardError::DataPathNotFound(PathBuf::from("data/dadosabertos/2022"))
        })?,
    };

    let payment_path = loader::payment_file_path(&data_dir);
    tracing::info!("Loading payment ledger from {}", payment_path.display());

    // Any load failure propagates from here and the process exits non-zero:
    // no partial dashboard is ever rendered.
    let records = loader::load_payment_records(&payment_path)?;
    let records = cleaner::clean_records(records);
    tracing::info!("{} payment records after cleaning", records.len());

    // Compute every aggregate the views consume up front; the dataset never
    // changes while the TUI runs.
    let monthly = PaymentAggregator::monthly_totals(&records);

    // The twelve daily queries always come from the fixed literal 1-12 range.
    let daily_by_month = (1..=12)
        .map(|month| PaymentAggregator::daily_totals(&records, month))
        .collect::<gastos_core::Result<Vec<_>>>()?;

    let grand_total = PaymentAggregator::grand_total(&records);
    let metrics = PaymentAggregator::monthly_mean_and_deltas(&records);

    tracing::info!("Grand total for 2022: {:.2}", grand_total);

    let data = DashboardData {
        monthly,
        daily_by_month,
        grand_total,
        metrics,
    };

    let app = App::new(
        &settings.theme,
        ViewMode::from_name(&settings.view),
        settings.month,
    );
    app.run(&data)?;

    Ok(())
}
