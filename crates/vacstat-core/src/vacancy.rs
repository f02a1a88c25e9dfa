use vacstat_parser::RawRecord;

use crate::error::{PipelineError, Result};
use crate::rates::RateTable;

/// A vacancy after type parsing and currency normalization, ready for
/// aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Vacancy {
    pub title: String,
    pub salary_from: i64,
    pub salary_to: i64,
    pub currency: String,
    /// Midpoint of the salary range, converted into the reference
    /// currency. Cross-currency averaging is valid only because every
    /// record goes through the same conversion.
    pub salary_average: f64,
    pub area_name: String,
    pub year: i32,
}

pub struct VacancyNormalizer {
    rates: RateTable,
}

impl VacancyNormalizer {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn normalize(&self, raw: &RawRecord) -> Result<Vacancy> {
        let salary_from = parse_salary("salary_from", &raw.salary_from)?;
        let salary_to = parse_salary("salary_to", &raw.salary_to)?;
        let rate = self.rates.to_reference(&raw.salary_currency)?;
        let year = parse_year(&raw.published_at)?;

        Ok(Vacancy {
            title: raw.name.clone(),
            salary_from,
            salary_to,
            currency: raw.salary_currency.clone(),
            salary_average: rate * (salary_from + salary_to) as f64 / 2.0,
            area_name: raw.area_name.clone(),
            year,
        })
    }
}

/// Salaries arrive as floating-point strings ("1230.0") but are carried
/// as integers, truncated toward zero.
fn parse_salary(field: &'static str, value: &str) -> Result<i64> {
    let parsed: f64 = value.parse().map_err(|_| PipelineError::NumericParse {
        field,
        value: value.to_string(),
    })?;
    Ok(parsed as i64)
}

/// The publication year is the four-digit prefix of the timestamp; the
/// rest of the string is never inspected.
fn parse_year(published_at: &str) -> Result<i32> {
    published_at
        .get(..4)
        .and_then(|prefix| prefix.parse().ok())
        .ok_or_else(|| PipelineError::DateParse {
            value: published_at.to_string(),
        })
}
