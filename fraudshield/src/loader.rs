use std::io::Read;

use csv::ReaderBuilder;
use csv::StringRecord;
use tracing::debug;
use tracing::info;
use tracing::instrument;

use crate::error::LoadError;
use crate::model::Transaction;
use crate::model::TransactionTable;

pub const SENDER_COLUMN: &str = "sender";
pub const RECEIVER_COLUMN: &str = "receiver";
pub const AMOUNT_COLUMN: &str = "amount";

const REQUIRED_COLUMNS: [&str; 3] = [SENDER_COLUMN, RECEIVER_COLUMN, AMOUNT_COLUMN];

/// Positions of the required columns inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Schema {
    sender:   usize,
    receiver: usize,
    amount:   usize,
}

impl Schema {
    fn resolve(columns: &[String]) -> Result<Self, LoadError> {
        let position = |name: &str| columns.iter().position(|c| c == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(**name).is_none())
            .map(|name| name.to_string())
            .collect();

        match (position(SENDER_COLUMN), position(RECEIVER_COLUMN), position(AMOUNT_COLUMN)) {
            (Some(sender), Some(receiver), Some(amount)) => Ok(Self { sender, receiver, amount }),
            _ => Err(LoadError::MissingColumns { missing, found: columns.to_vec() }),
        }
    }
}

/// Reads a CSV with a header row into a [`TransactionTable`].
///
/// Header names are lowercased before the `sender`, `receiver` and `amount`
/// columns are looked up, so any casing is accepted. Every record is validated
/// here; later stages never see a partially valid table.
#[instrument(level = "debug", skip(reader))]
pub fn load_transactions<R: Read>(reader: R) -> Result<TransactionTable, LoadError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let columns = normalize_headers(csv_reader.headers()?);
    if columns.is_empty() {
        return Err(LoadError::MissingHeader);
    }
    reject_duplicates(&columns)?;

    let schema = Schema::resolve(&columns)?;
    debug!("loader::columns_resolved::{:?}", schema);

    let mut transactions = Vec::new();
    let mut record = StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        transactions.push(parse_record(&record, schema, line)?);
    }

    info!("loader::loaded::{}_rows::{}_columns", transactions.len(), columns.len());

    Ok(TransactionTable { columns, transactions })
}

fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
            h.to_lowercase()
        })
        .collect();

    // A zero-byte file yields a single empty header.
    if columns.len() == 1 && columns[0].is_empty() { Vec::new() } else { columns }
}

fn reject_duplicates(columns: &[String]) -> Result<(), LoadError> {
    for (i, column) in columns.iter().enumerate() {
        if columns[..i].contains(column) {
            return Err(LoadError::DuplicateColumn(column.clone()));
        }
    }
    Ok(())
}

fn parse_record(
    record: &StringRecord,
    schema: Schema,
    line: u64,
) -> Result<Transaction, LoadError> {
    let sender = account_field(record, schema.sender, SENDER_COLUMN, line)?;
    let receiver = account_field(record, schema.receiver, RECEIVER_COLUMN, line)?;
    let amount = parse_amount(record.get(schema.amount).unwrap_or(""), line)?;

    Ok(Transaction { sender, receiver, amount })
}

fn account_field(
    record: &StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
) -> Result<String, LoadError> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(LoadError::EmptyAccount { line, column }),
    }
}

fn parse_amount(
    raw: &str,
    line: u64,
) -> Result<f64, LoadError> {
    let amount: f64 = raw.trim().parse().map_err(|_| LoadError::InvalidAmount { line, value: raw.to_string() })?;

    if !amount.is_finite() {
        return Err(LoadError::InvalidAmount { line, value: raw.to_string() });
    }
    if amount < 0.0 {
        return Err(LoadError::NegativeAmount { line, value: amount });
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn load(csv: &str) -> Result<TransactionTable, LoadError> { load_transactions(csv.as_bytes()) }

    #[test]
    fn lowercases_headers_and_keeps_extra_columns() {
        let table = load("Sender,RECEIVER,Amount,Memo\nA,B,10,rent\n").unwrap();

        assert_eq!(table.columns, vec!["sender", "receiver", "amount", "memo"]);
        assert_eq!(table.transactions, vec![Transaction::new("A", "B", 10.0)]);
    }

    #[test]
    fn column_order_does_not_matter() {
        let table = load("amount,receiver,sender\n12.5,B,A\n").unwrap();

        assert_eq!(table.transactions, vec![Transaction::new("A", "B", 12.5)]);
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let table = load("sender,receiver,amount\n").unwrap();

        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 3);
    }

    #[test]
    fn zero_byte_file_has_no_header() {
        assert!(matches!(load(""), Err(LoadError::MissingHeader)));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let table = load("\u{feff}sender,receiver,amount\nA,B,1\n").unwrap();

        assert_eq!(table.columns[0], "sender");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let table = load("sender,receiver,amount\nA,B,1\n\nB,C,2\n").unwrap();

        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_amount_column_is_named() {
        let err = load("sender,receiver\nA,B\n").unwrap_err();

        match &err {
            LoadError::MissingColumns { missing, found } => {
                assert_eq!(missing, &vec!["amount".to_string()]);
                assert_eq!(found, &vec!["sender".to_string(), "receiver".to_string()]);
            },
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("Missing required column(s): amount"));
    }

    #[test]
    fn every_missing_column_is_listed() {
        let err = load("from,to,value\nA,B,1\n").unwrap_err();

        assert!(err.to_string().starts_with("Missing required column(s): sender, receiver, amount"));
    }

    #[test]
    fn case_collision_is_a_duplicate_column() {
        let err = load("sender,receiver,amount,Amount\nA,B,1,2\n").unwrap_err();

        assert!(matches!(err, LoadError::DuplicateColumn(ref c) if c == "amount"));
    }

    #[rstest]
    #[case::ragged_row("sender,receiver,amount\nA,B\n")]
    #[case::extra_field("sender,receiver,amount\nA,B,1,2\n")]
    fn ragged_rows_are_malformed(#[case] csv: &str) {
        assert!(matches!(load(csv), Err(LoadError::Malformed { line: 2, .. })));
    }

    #[rstest]
    #[case::word("ten")]
    #[case::empty("")]
    #[case::nan("NaN")]
    #[case::infinite("inf")]
    #[case::thousands_separator("\"1,000\"")]
    fn unparseable_amounts_are_rejected(#[case] amount: &str) {
        let csv = format!("sender,receiver,amount\nA,B,1\nA,B,{amount}\n");

        assert!(matches!(load(&csv), Err(LoadError::InvalidAmount { line: 3, .. })));
    }

    #[rstest]
    #[case::padded(" 42 ", 42.0)]
    #[case::exponent("1e3", 1000.0)]
    #[case::zero("0", 0.0)]
    fn lenient_amount_formats(
        #[case] amount: &str,
        #[case] expected: f64,
    ) {
        let table = load(&format!("sender,receiver,amount\nA,B,{amount}\n")).unwrap();

        assert_eq!(table.transactions[0].amount, expected);
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(matches!(
            load("sender,receiver,amount\nA,B,-5\n"),
            Err(LoadError::NegativeAmount { line: 2, value }) if value == -5.0
        ));
    }

    #[rstest]
    #[case::sender("sender,receiver,amount\n,B,1\n", "sender")]
    #[case::receiver("sender,receiver,amount\nA,,1\n", "receiver")]
    fn empty_account_is_rejected(
        #[case] csv: &str,
        #[case] expected: &str,
    ) {
        assert!(matches!(load(csv), Err(LoadError::EmptyAccount { line: 2, column }) if column == expected));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let bytes: &[u8] = b"sender,receiver,amount\nA,\xff\xfe,1\n";

        assert!(matches!(load_transactions(bytes), Err(LoadError::Malformed { .. })));
    }
}
