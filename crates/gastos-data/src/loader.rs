//! Payment-ledger loading for the Capelinha spending dashboard.
//!
//! Reads the `;`-separated open-data export into [`PaymentRecord`] structs.
//! The load is all-or-nothing: a missing file, a missing column, or a single
//! cell that fails date or number parsing aborts the whole load. No partial
//! dataset ever reaches the aggregation layer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use gastos_core::error::{DashboardError, Result};
use gastos_core::models::PaymentRecord;
use tracing::debug;

// ── Dataset layout ─────────────────────────────────────────────────────────────

/// Payment ledger export for fiscal year 2022 (IBGE code 3112307).
pub const PAYMENT_FILE: &str = "2022.3112307.despesa.pagamento.csv";

/// Municipal agencies export (present in the dataset, not loaded).
pub const AGENCY_FILE: &str = "2022.3112307.orgao.orgao.csv";

/// Agency responsibles export (present in the dataset, not loaded).
pub const RESPONSIBLE_FILE: &str = "2022.3112307.orgao.orgaoResp.csv";

/// Budget units export (present in the dataset, not loaded).
pub const UNIT_FILE: &str = "2022.3112307.orgao.orgaoUnidade.csv";

/// Date format used by every date column in the export.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Columns the payment export must carry.
const REQUIRED_COLUMNS: [&str; 9] = [
    "nom_credor",
    "seq_orgao",
    "dat_empenho",
    "dat_liquidacao",
    "dat_pagamento",
    "vlr_pag_fonte",
    "vlr_ret_fonte",
    "vlr_ant_fonte",
    "vlr_anu_fonte",
];

/// Full path of the payment export inside `data_dir`.
pub fn payment_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PAYMENT_FILE)
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Load the payment ledger at `path` into records, preserving file order.
///
/// Creditor names are kept as text; the three date columns are parsed
/// against [`DATE_FORMAT`]; monetary cells accept both plain (`1234.56`)
/// and pt-BR (`1.234,56`) decimal spellings, with an empty cell counting
/// as `0.0`.
pub fn load_payment_records(path: &Path) -> Result<Vec<PaymentRecord>> {
    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let columns = build_column_map(&headers);

    for name in REQUIRED_COLUMNS {
        if !columns.contains_key(name) {
            return Err(DashboardError::MissingColumn(name.to_string()));
        }
    }

    let mut records = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2 because records() starts after the header row and CSV line
        // numbers are 1-based.
        let line = idx + 2;
        let record = result?;

        records.push(PaymentRecord {
            creditor_name: cell(&record, &columns, "nom_credor").to_string(),
            agency_sequence: parse_integer(cell(&record, &columns, "seq_orgao"), line)?,
            commitment_date: parse_date(cell(&record, &columns, "dat_empenho"), line)?,
            settlement_date: parse_date(cell(&record, &columns, "dat_liquidacao"), line)?,
            payment_date: parse_date(cell(&record, &columns, "dat_pagamento"), line)?,
            amount_paid: parse_amount(cell(&record, &columns, "vlr_pag_fonte"), line)?,
            amount_withheld: parse_amount(cell(&record, &columns, "vlr_ret_fonte"), line)?,
            amount_advanced: parse_amount(cell(&record, &columns, "vlr_ant_fonte"), line)?,
            amount_annulled: parse_amount(cell(&record, &columns, "vlr_anu_fonte"), line)?,
        });
    }

    debug!("Loaded {} payment records from {}", records.len(), path.display());

    Ok(records)
}

// ── Internal helpers ───────────────────────────────────────────────────────────

/// Map header names to column indexes, lower-cased and BOM-stripped.
///
/// Spreadsheet tools sometimes emit UTF-8 CSVs with a BOM prefix glued to
/// the first header; without stripping it the first column would be
/// reported missing.
fn build_column_map(headers: &csv::StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = name.trim().trim_start_matches('\u{feff}');
            (name.to_ascii_lowercase(), idx)
        })
        .collect()
}

/// Fetch a cell by column name. The column is guaranteed present by the
/// header check; a short row yields an empty cell.
fn cell<'r>(
    record: &'r csv::StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> &'r str {
    columns
        .get(name)
        .and_then(|&idx| record.get(idx))
        .unwrap_or("")
}

/// Parse a `DD/MM/YYYY` date cell. Any mismatch fails the load.
fn parse_date(value: &str, line: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DashboardError::InvalidDate {
        line,
        value: value.to_string(),
    })
}

/// Parse an integer identifier cell.
fn parse_integer(value: &str, line: usize) -> Result<u32> {
    value.parse::<u32>().map_err(|_| DashboardError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

/// Parse a monetary cell.
///
/// An empty cell is the additive identity, never "missing". Non-empty
/// cells accept either a plain decimal point or the pt-BR spelling with
/// `.` grouping and a `,` decimal mark.
fn parse_amount(value: &str, line: usize) -> Result<f64> {
    if value.is_empty() {
        return Ok(0.0);
    }

    let normalized = if value.contains(',') {
        value.replace('.', "").replace(',', ".")
    } else {
        value.to_string()
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DashboardError::InvalidNumber {
            line,
            value: value.to_string(),
        })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
