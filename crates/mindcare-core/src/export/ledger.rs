//! Ledger export for bookkeeping.

use serde::{Deserialize, Serialize};

use crate::models::Transaction;
use crate::store::{KindFilter, Ledger, LedgerTotals};

/// Export format version.
pub const LEDGER_EXPORT_VERSION: &str = "1.0";

/// Ledger export metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerExportMetadata {
    /// Export format version
    pub format_version: String,
    /// Export timestamp
    pub exported_at: String,
    /// Which entries were selected
    pub filter: KindFilter,
    /// `(year, month)` when limited to one month
    pub month: Option<(i32, u32)>,
}

/// Snapshot of the ledger, newest entry first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    pub metadata: LedgerExportMetadata,
    pub transactions: Vec<Transaction>,
    /// Totals over the whole ledger, not just the exported rows
    pub totals: LedgerTotals,
}

impl LedgerExport {
    /// Export every transaction.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self::filtered(ledger, KindFilter::All, None)
    }

    /// Export the transactions a ledger listing would show.
    pub fn filtered(ledger: &Ledger, filter: KindFilter, month: Option<(i32, u32)>) -> Self {
        Self {
            metadata: LedgerExportMetadata {
                format_version: LEDGER_EXPORT_VERSION.to_string(),
                exported_at: chrono::Utc::now().to_rfc3339(),
                filter,
                month,
            },
            transactions: ledger.filtered(filter, month).into_iter().cloned().collect(),
            totals: ledger.totals(),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("id,date,type,category,description,amount\n");

        for t in &self.transactions {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                escape_csv(&t.id),
                t.date.format("%Y-%m-%d"),
                t.kind.as_str(),
                escape_csv(&t.category),
                escape_csv(&t.description),
                t.amount,
            ));
        }

        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionForm, TransactionKind};
    use chrono::NaiveDate;

    fn setup_ledger() -> Ledger {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let mut ledger = Ledger::new();
        for (kind, amount, description, category, date) in [
            (
                TransactionKind::Income,
                "150.00",
                "Session - Sarah Johnson",
                "Session Fee",
                "2024-01-15",
            ),
            (
                TransactionKind::Expense,
                "75.50",
                "Printer, toner",
                "Equipment",
                "2024-02-01",
            ),
        ] {
            ledger
                .add(
                    &TransactionForm {
                        kind,
                        amount: amount.into(),
                        description: description.into(),
                        category: category.into(),
                        date: date.into(),
                    },
                    today,
                )
                .unwrap();
        }
        ledger
    }

    #[test]
    fn test_ledger_export_json() {
        let export = LedgerExport::from_ledger(&setup_ledger());
        let json = export.to_json().unwrap();
        assert!(json.contains("\"type\": \"expense\""));
        assert!(json.contains("\"netProfit\""));
        assert!(json.contains("\"formatVersion\": \"1.0\""));
    }

    #[test]
    fn test_ledger_export_csv() {
        let csv = LedgerExport::from_ledger(&setup_ledger()).to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "id,date,type,category,description,amount");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with(",2024-02-01,expense,Equipment,\"Printer, toner\",75.50"));
        assert!(lines[2].contains("income,Session Fee,Session - Sarah Johnson,150.00"));
    }

    #[test]
    fn test_filtered_export_keeps_full_totals() {
        let ledger = setup_ledger();
        let export = LedgerExport::filtered(&ledger, KindFilter::Income, None);
        assert_eq!(export.transactions.len(), 1);
        assert_eq!(export.totals, ledger.totals());
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }
}
