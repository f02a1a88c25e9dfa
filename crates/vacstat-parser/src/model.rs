use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::errors::SourceError;

/// Columns the pipeline consumes. The header may carry more; these six
/// must all be present.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "salary_from",
    "salary_to",
    "salary_currency",
    "area_name",
    "published_at",
];

/// A structurally valid input row, reduced to the consumed columns.
/// All values are still raw strings; typing happens downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub salary_from: String,
    pub salary_to: String,
    pub salary_currency: String,
    pub area_name: String,
    pub published_at: String,
}

/// Positions of the consumed columns within the header, plus the header
/// width used for the arity check.
#[derive(Debug, Clone)]
pub(crate) struct HeaderIndex {
    name: usize,
    salary_from: usize,
    salary_to: usize,
    salary_currency: usize,
    area_name: usize,
    published_at: usize,
    width: usize,
}

impl HeaderIndex {
    pub(crate) fn from_header(header: &StringRecord) -> Result<Self, SourceError> {
        let position = |column: &'static str| {
            header
                .iter()
                .position(|field| field == column)
                .ok_or(SourceError::MissingColumn { column })
        };

        Ok(Self {
            name: position("name")?,
            salary_from: position("salary_from")?,
            salary_to: position("salary_to")?,
            salary_currency: position("salary_currency")?,
            area_name: position("area_name")?,
            published_at: position("published_at")?,
            width: header.len(),
        })
    }

    /// Extracts a `RawRecord`, or `None` when the row is structurally
    /// malformed: field count differs from the header, or any field
    /// (consumed or not) is empty.
    pub(crate) fn extract(&self, record: &StringRecord) -> Option<RawRecord> {
        if record.len() != self.width {
            return None;
        }
        if record.iter().any(|field| field.is_empty()) {
            return None;
        }

        Some(RawRecord {
            name: record[self.name].to_string(),
            salary_from: record[self.salary_from].to_string(),
            salary_to: record[self.salary_to].to_string(),
            salary_currency: record[self.salary_currency].to_string(),
            area_name: record[self.area_name].to_string(),
            published_at: record[self.published_at].to_string(),
        })
    }
}
