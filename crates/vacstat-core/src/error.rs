use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("record source error: {0}")]
    Source(#[from] vacstat_parser::SourceError),

    #[error("unsupported salary currency '{code}'")]
    UnsupportedCurrency { code: String },

    #[error("invalid {field} value '{value}'")]
    NumericParse { field: &'static str, value: String },

    #[error("malformed publication date '{value}'")]
    DateParse { value: String },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
