//! Balance sheet CSV export.
//!
//! Two fixed layouts: a participant's own ledger rows, and every row in the
//! system. Amounts are written at money scale.

use std::io;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{BalanceSheetId, ExpenseId, UserId, round_money};
use thiserror::Error;

/// Errors while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding or the underlying writer failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// The finished buffer could not be recovered from the writer.
    #[error("CSV export failed: {0}")]
    Io(#[from] io::Error),

    /// Output was not UTF-8.
    #[error("CSV export produced invalid UTF-8")]
    Encoding,
}

/// One participant's denormalized view of one expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Ledger row id.
    pub id: BalanceSheetId,
    /// Expense the row belongs to.
    pub expense_id: ExpenseId,
    /// Participant.
    pub user: UserId,
    /// Participant's share.
    pub split_amount: Decimal,
    /// Payer.
    pub owner: UserId,
    /// Expense total.
    pub amount: Decimal,
    /// Expense title.
    pub title: String,
    /// Expense description.
    pub description: String,
}

/// Which rows an export covers, and so which layout it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// Rows of the requesting user; the user column is implied.
    Participant,
    /// Every row, with the participant column.
    Overall,
}

const PARTICIPANT_HEADER: &[&str] = &[
    "ID",
    "Expense ID",
    "Split Amount",
    "Owner ID",
    "Total Amount",
    "Title",
    "Description",
];

const OVERALL_HEADER: &[&str] = &[
    "ID",
    "Expense ID",
    "User ID",
    "Split Amount",
    "Owner ID",
    "Total Amount",
    "Title",
    "Description",
];

impl ExportScope {
    /// Column names in output order.
    #[must_use]
    pub const fn header(self) -> &'static [&'static str] {
        match self {
            Self::Participant => PARTICIPANT_HEADER,
            Self::Overall => OVERALL_HEADER,
        }
    }

    /// Download filename.
    #[must_use]
    pub const fn filename(self) -> &'static str {
        match self {
            Self::Participant => "balance_sheet.csv",
            Self::Overall => "overall_balance_sheet.csv",
        }
    }

    fn record(self, row: &LedgerRow) -> Vec<String> {
        let mut record = vec![row.id.to_string(), row.expense_id.to_string()];
        if self == Self::Overall {
            record.push(row.user.to_string());
        }
        record.extend([
            money(row.split_amount),
            row.owner.to_string(),
            money(row.amount),
            row.title.clone(),
            row.description.clone(),
        ]);
        record
    }
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

/// Writes the header and `rows` to `out`.
///
/// # Errors
///
/// Returns `ExportError::Csv` if encoding or writing fails.
pub fn write_csv<'a, W, I>(scope: ExportScope, rows: I, out: W) -> Result<(), ExportError>
where
    W: io::Write,
    I: IntoIterator<Item = &'a LedgerRow>,
{
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(scope.header())?;
    for row in rows {
        writer.write_record(scope.record(row))?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders the export into a string.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn render_csv(scope: ExportScope, rows: &[LedgerRow]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(scope, rows, &mut buffer)?;
    String::from_utf8(buffer).map_err(|_| ExportError::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row() -> LedgerRow {
        LedgerRow {
            id: BalanceSheetId::new(),
            expense_id: ExpenseId::new(),
            user: UserId::new(),
            split_amount: dec!(50),
            owner: UserId::new(),
            amount: dec!(100.0),
            title: "Taxi, airport".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_participant_layout() {
        let row = row();
        let csv = render_csv(ExportScope::Participant, std::slice::from_ref(&row)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "ID,Expense ID,Split Amount,Owner ID,Total Amount,Title,Description"
        );
        assert_eq!(
            lines[1],
            format!(
                "{},{},50.00,{},100.00,\"Taxi, airport\",",
                row.id, row.expense_id, row.owner
            )
        );
    }

    #[test]
    fn test_overall_layout_adds_user_column() {
        let row = row();
        let csv = render_csv(ExportScope::Overall, std::slice::from_ref(&row)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "ID,Expense ID,User ID,Split Amount,Owner ID,Total Amount,Title,Description"
        );
        assert!(lines[1].starts_with(&format!("{},{},{},50.00,", row.id, row.expense_id, row.user)));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = render_csv(ExportScope::Overall, &[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_filenames() {
        assert_eq!(ExportScope::Participant.filename(), "balance_sheet.csv");
        assert_eq!(ExportScope::Overall.filename(), "overall_balance_sheet.csv");
    }
}
