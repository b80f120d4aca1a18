use thiserror::Error;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Sheet '{sheet}' not found (available: {available})")]
    MissingSheet { sheet: String, available: String },

    #[error("Required column '{field}' not found; expected a header named one of: {candidates}")]
    MissingColumn { field: String, candidates: String },

    #[error("Row {row}: missing or unparseable start time '{value}'")]
    InvalidStartTime { row: usize, value: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Duplicate archive entry: {0}")]
    DuplicateEntry(String),
}

impl From<rust_xlsxwriter::XlsxError> for RosterError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        RosterError::Export(e.to_string())
    }
}
