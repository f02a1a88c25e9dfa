pub mod errors;
pub mod model;
mod source;

pub use errors::SourceError;
pub use model::{RawRecord, REQUIRED_COLUMNS};
pub use source::RecordSource;
