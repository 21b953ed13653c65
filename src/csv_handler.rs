use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use crate::error::LoadError;

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["fecha", "tipo_transaccion", "cliente_id"];

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Deserialize)]
struct TransactionRaw {
    fecha: String,
    tipo_transaccion: String,
    cliente_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub fecha: NaiveDateTime,
    pub tipo_transaccion: String,
    pub cliente_id: String,
}

/// Rows of the input file in file order, plus the header as read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionTable {
    columns: Vec<String>,
    records: Vec<TransactionRecord>,
}

impl TransactionTable {
    pub fn new(columns: Vec<String>, records: Vec<TransactionRecord>) -> Self {
        TransactionTable { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn head(&self, n: usize) -> &[TransactionRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

/// Parses a `fecha` cell. Offsets are folded into UTC; date-only values map to midnight.
/// Slash dates are month first.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_utc());
    }
    if let Some(timestamp) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(timestamp);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Loads the transaction table from a CSV file on disk.
pub fn load_csv_file(path: &Path) -> Result<TransactionTable, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound { path: path.to_path_buf() },
        _ => LoadError::Csv(e.into()),
    })?;
    debug!("Reading transactions from {}", path.display());
    read_transactions(file)
}

/// Reads a transaction table from any CSV source.
///
/// The header is checked for the required columns before any row is read, and
/// the whole load fails on the first `fecha` that cannot be parsed.
pub fn read_transactions<R: Read>(source: R) -> Result<TransactionTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|required| !columns.iter().any(|column| column == required))
    {
        return Err(LoadError::Schema { column });
    }

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<TransactionRaw>().enumerate() {
        let raw = result?;
        let fecha = parse_timestamp(&raw.fecha).ok_or_else(|| LoadError::Parse {
            row: index + 1,
            value: raw.fecha.clone(),
        })?;
        records.push(TransactionRecord {
            fecha,
            tipo_transaccion: raw.tipo_transaccion,
            cliente_id: raw.cliente_id,
        });
    }
    debug!("Loaded {} transactions with {} columns", records.len(), columns.len());

    Ok(TransactionTable::new(columns, records))
}
