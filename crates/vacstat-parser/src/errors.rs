use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("header is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("input did not contain a header row")]
    EmptyInput,
}
