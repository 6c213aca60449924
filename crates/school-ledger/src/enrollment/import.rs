//! CSV adapters for seeding school records and fee tables.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::domain::{LedgerError, LicenseClass, SchoolRecord};
use super::fees::FeeSchedule;
use super::ledger::Ledger;

const ID_COLUMN: &str = "id";
const NAME_COLUMN: &str = "name";

/// Read school records from `id,name,<class codes...>` rows.
///
/// Count columns may be omitted or left empty; both read as zero.
pub fn read_schools<R: Read>(reader: R) -> Result<Vec<SchoolRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let id_index = column_index(&headers, ID_COLUMN)?;
    let name_index = column_index(&headers, NAME_COLUMN)?;
    let class_columns = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != id_index && *index != name_index)
        .map(|(index, code)| LicenseClass::from_code(code).map(|class| (index, class)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut schools = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let mut counts = Vec::with_capacity(class_columns.len());
        for (index, class) in &class_columns {
            let raw = record.get(*index).unwrap_or_default();
            let count = if raw.is_empty() {
                0
            } else {
                raw.parse::<i64>().map_err(|_| ImportError::InvalidCount {
                    row: row + 1,
                    column: class.code(),
                    value: raw.to_string(),
                })?
            };
            counts.push((class.code(), count));
        }

        schools.push(SchoolRecord::new(
            record.get(id_index).unwrap_or_default(),
            record.get(name_index).unwrap_or_default(),
            Ledger::from_codes(counts)?,
        ));
    }

    Ok(schools)
}

pub fn read_schools_from_path(path: impl AsRef<Path>) -> Result<Vec<SchoolRecord>, ImportError> {
    let file = File::open(path.as_ref())?;
    read_schools(file)
}

#[derive(Debug, Deserialize)]
struct FeeRow {
    category: String,
    fee: u64,
}

/// Read a fee table from `category,fee` rows. Classes not listed cost zero.
pub fn read_fee_schedule<R: Read>(reader: R) -> Result<FeeSchedule, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<FeeRow>() {
        let row = row?;
        rows.push((row.category, row.fee));
    }
    Ok(FeeSchedule::from_codes(rows)?)
}

pub fn read_fee_schedule_from_path(path: impl AsRef<Path>) -> Result<FeeSchedule, ImportError> {
    let file = File::open(path.as_ref())?;
    read_fee_schedule(file)
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, ImportError> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
        .ok_or(ImportError::MissingColumn(name))
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to open CSV: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("CSV is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("row {row}: '{value}' is not a valid count for {column}")]
    InvalidCount {
        row: usize,
        column: &'static str,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_partial_school_rows() {
        let csv = "id,name,B,A1,FARK_A2\n\
                   x,Yıldız Sürücü Kursu,2,,\n\
                   y,Anadolu Sürücü Kursu,1,1,-3\n";
        let schools = read_schools(Cursor::new(csv)).expect("valid csv");

        assert_eq!(schools.len(), 2);
        assert_eq!(schools[0].id.as_str(), "x");
        assert_eq!(schools[0].candidates.read(LicenseClass::B), 2);
        assert_eq!(schools[0].candidates.read(LicenseClass::A1), 0);
        assert_eq!(schools[1].name, "Anadolu Sürücü Kursu");
        assert_eq!(schools[1].candidates.read(LicenseClass::A1), 1);
        assert_eq!(schools[1].candidates.read(LicenseClass::FarkA2), 0);
        assert_eq!(schools[1].candidates.read(LicenseClass::D), 0);
    }

    #[test]
    fn unknown_class_column_is_rejected() {
        let csv = "id,name,B,E\nx,Kurs,1,1\n";
        match read_schools(Cursor::new(csv)) {
            Err(ImportError::Ledger(LedgerError::UnknownCategory(code))) => assert_eq!(code, "E"),
            other => panic!("expected unknown category, got {other:?}"),
        }
    }

    #[test]
    fn malformed_counts_report_row_and_column() {
        let csv = "id,name,C\nx,Kurs,many\n";
        match read_schools(Cursor::new(csv)) {
            Err(ImportError::InvalidCount { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "C");
                assert_eq!(value, "many");
            }
            other => panic!("expected invalid count, got {other:?}"),
        }
    }

    #[test]
    fn missing_name_column_is_rejected() {
        let csv = "id,B\nx,1\n";
        assert!(matches!(
            read_schools(Cursor::new(csv)),
            Err(ImportError::MissingColumn("name"))
        ));
    }

    #[test]
    fn reads_fee_tables() {
        let csv = "category,fee\nB,5000\nA1,7000\n";
        let schedule = read_fee_schedule(Cursor::new(csv)).expect("valid fee csv");
        assert_eq!(schedule.fee_of(LicenseClass::B), 5_000);
        assert_eq!(schedule.fee_of(LicenseClass::A1), 7_000);
        assert_eq!(schedule.fee_of(LicenseClass::D), 0);

        let bad = "category,fee\nQ,1\n";
        assert!(matches!(
            read_fee_schedule(Cursor::new(bad)),
            Err(ImportError::Ledger(LedgerError::UnknownCategory(_)))
        ));
    }
}
