pub mod aggregate;
pub mod error;
pub mod pipeline;
pub mod rates;
pub mod report;
pub mod statistics;
pub mod vacancy;

pub use error::{PipelineError, Result};
pub use rates::RateTable;
pub use statistics::Statistics;
pub use vacancy::{Vacancy, VacancyNormalizer};
