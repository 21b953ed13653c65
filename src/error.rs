use std::path::PathBuf;

/// Errors raised while loading the transaction table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Required column '{column}' is missing from the header")]
    Schema { column: &'static str },

    #[error("Row {row}: cannot parse '{value}' as a date in column 'fecha'")]
    Parse { row: usize, value: String },

    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised while drawing a chart.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("Failed to render chart to {}: {message}", path.display())]
    Render { path: PathBuf, message: String },
}
