use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::statistics::Statistics;

pub const YEARS_REPORT: &str = "report_years.csv";
pub const CITIES_REPORT: &str = "report_cities.csv";
pub const JSON_REPORT: &str = "report.json";

/// Locations of the written artifacts.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub years_csv: PathBuf,
    pub cities_csv: PathBuf,
    pub json: PathBuf,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    profession: &'a str,
    #[serde(flatten)]
    statistics: &'a Statistics,
}

/// Renders the finalized statistics into the three report artifacts:
/// a per-year sheet, a city-rankings sheet, and a JSON document. All
/// content is built in memory before the first file is created, so a
/// failed run leaves no partially written report behind.
pub fn write_report(
    statistics: &Statistics,
    profession: &str,
    out_dir: impl AsRef<Path>,
) -> Result<ReportPaths> {
    let out_dir = out_dir.as_ref();

    let years = years_sheet(statistics, profession)?;
    let cities = cities_sheet(statistics)?;
    let json = serde_json::to_vec_pretty(&ReportDocument {
        profession,
        statistics,
    })?;

    fs::create_dir_all(out_dir)?;
    let paths = ReportPaths {
        years_csv: out_dir.join(YEARS_REPORT),
        cities_csv: out_dir.join(CITIES_REPORT),
        json: out_dir.join(JSON_REPORT),
    };
    fs::write(&paths.years_csv, years)?;
    fs::write(&paths.cities_csv, cities)?;
    fs::write(&paths.json, json)?;

    info!(dir = %out_dir.display(), "report written");
    Ok(paths)
}

fn years_sheet(statistics: &Statistics, profession: &str) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Year".to_string(),
        "Average salary".to_string(),
        format!("Average salary - {profession}"),
        "Vacancy count".to_string(),
        format!("Vacancy count - {profession}"),
    ])?;

    for (year, salary) in &statistics.salary_by_year {
        // Years the filter never matched render as zero.
        let matching_salary = statistics
            .matching_salary_by_year
            .get(year)
            .copied()
            .unwrap_or(0);
        let matching_count = statistics
            .matching_count_by_year
            .get(year)
            .copied()
            .unwrap_or(0);
        writer.write_record([
            year.to_string(),
            salary.to_string(),
            matching_salary.to_string(),
            statistics.count_by_year[year].to_string(),
            matching_count.to_string(),
        ])?;
    }

    Ok(finish(writer)?)
}

fn cities_sheet(statistics: &Statistics) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["City", "Salary level", "City", "Vacancy share"])?;

    let rows = statistics
        .top_salary_cities
        .len()
        .max(statistics.top_share_cities.len());
    for index in 0..rows {
        let (salary_city, salary) = match statistics.top_salary_cities.get(index) {
            Some((city, salary)) => (city.as_str(), salary.to_string()),
            None => ("", String::new()),
        };
        let (share_city, share) = match statistics.top_share_cities.get(index) {
            Some((city, share)) => (city.as_str(), format!("{share:.4}")),
            None => ("", String::new()),
        };
        writer.write_record([salary_city, salary.as_str(), share_city, share.as_str()])?;
    }

    Ok(finish(writer)?)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> std::result::Result<Vec<u8>, csv::Error> {
    writer
        .into_inner()
        .map_err(|err| err.into_error().into())
}
