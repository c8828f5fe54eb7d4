//! Creditor-name canonicalization.
//!
//! The open-data export carries two known bad creditor values: payroll rows
//! published as "NAO INFORMADO" and the labor-court payroll rows published
//! under the court's own name. Both are rewritten to descriptive labels;
//! every other value passes through untouched.

use gastos_core::models::PaymentRecord;

/// The static substitution table. Exactly these two rewrites apply.
pub const CREDITOR_SUBSTITUTIONS: [(&str, &str); 2] = [
    (
        "NAO INFORMADO",
        "FOLHA DE PAGAMENTO DOS SERVIDORES(AS) MUNICIPAIS",
    ),
    (
        "TRIBUNAL REGIONAL DO TRABALHO DA 03ª REGIAO VARA DO TRABALHO DE GUANHAES",
        "FOLHA DE PAGAMENTO DOS SERVIDORES(AS) DA CÂMARA DE VEREADORES",
    ),
];

/// Canonical label for `name`, or `None` when no substitution applies.
///
/// Only exact matches are rewritten; this is a lookup table, not a rules
/// engine.
pub fn canonical_creditor(name: &str) -> Option<&'static str> {
    CREDITOR_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
}

/// Rewrite known bad creditor names across the whole ledger.
///
/// Pure and order-preserving: no record is dropped, duplicated or
/// reordered, and no field other than `creditor_name` is touched.
pub fn clean_records(records: Vec<PaymentRecord>) -> Vec<PaymentRecord> {
    records
        .into_iter()
        .map(|mut record| {
            if let Some(canonical) = canonical_creditor(&record.creditor_name) {
                record.creditor_name = canonical.to_string();
            }
            record
        })
        .collect()
}
