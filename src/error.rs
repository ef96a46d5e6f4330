use std::path::PathBuf;

/// Errors that abort a plotting run.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// The input csv does not exist
    #[error("input file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A line does not split into the number of columns of the schema
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Row layout files hold one series per line
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("series {series}, entry {index}: {value:?} is not a number")]
    NotNumeric {
        series: String,
        index: usize,
        value: String,
    },

    #[error("unknown series: {0}")]
    UnknownSeries(String),

    #[error("series {y} has {y_len} values but x series {x} has {x_len}")]
    LengthMismatch {
        x: String,
        x_len: usize,
        y: String,
        y_len: usize,
    },

    #[error("series {0} is empty, nothing to plot")]
    EmptySeries(String),

    #[error("no y series to plot against {0}")]
    NoCurves(String),

    /// The padded axis range is too wide to be represented
    #[error("axis range [{min}, {max}] is too wide to draw")]
    AxisRange { min: f64, max: f64 },

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("unknown marker: {0:?}")]
    UnknownMarker(String),

    #[error("unknown line style: {0:?}")]
    UnknownLineStyle(String),

    #[error("unknown legend position: {0}")]
    UnknownLegendPosition(String),

    /// Only png and svg are written
    #[error("unsupported image format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("drawing error: {0}")]
    Drawing(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;
