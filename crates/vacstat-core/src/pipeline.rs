use std::io::Read;
use std::path::Path;

use tracing::{debug, info};
use vacstat_parser::RecordSource;

use crate::aggregate::Aggregator;
use crate::error::Result;
use crate::rates::RateTable;
use crate::statistics::Statistics;
use crate::vacancy::VacancyNormalizer;

/// Runs the full pipeline over a file: source → normalizer →
/// aggregator → finalizer. Any fatal error propagates before any
/// report artifact exists.
pub fn run_file(path: impl AsRef<Path>, profession: &str, rates: RateTable) -> Result<Statistics> {
    let path = path.as_ref();
    info!(input = %path.display(), profession, "running vacancy statistics pipeline");
    let source = RecordSource::open(path)?;
    run_source(source, profession, rates)
}

/// Reader-generic entry point, used directly by tests.
pub fn run_reader<R: Read>(input: R, profession: &str, rates: RateTable) -> Result<Statistics> {
    run_source(RecordSource::from_reader(input)?, profession, rates)
}

fn run_source<R: Read>(
    mut source: RecordSource<R>,
    profession: &str,
    rates: RateTable,
) -> Result<Statistics> {
    let normalizer = VacancyNormalizer::new(rates);
    let mut aggregator = Aggregator::new(profession);

    for raw in source.by_ref() {
        let vacancy = normalizer.normalize(&raw?)?;
        aggregator.push(&vacancy);
    }

    if source.skipped_rows() > 0 {
        debug!(
            skipped = source.skipped_rows(),
            "excluded structurally malformed rows"
        );
    }

    let groups = aggregator.into_groups();
    info!(
        total = groups.total(),
        years = groups.by_year.len(),
        "aggregation complete"
    );
    Ok(Statistics::finalize(&groups))
}
