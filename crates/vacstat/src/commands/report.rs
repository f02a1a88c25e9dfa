use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing::info;
use vacstat_core::{pipeline, report, RateTable, Statistics};

use crate::{ReportArgs, ShowArgs};

pub fn handle_report_command(args: ReportArgs) -> Result<()> {
    let statistics = run_pipeline(&args.input, &args.profession)?;

    let paths = report::write_report(&statistics, &args.profession, &args.out_dir)
        .with_context(|| format!("failed to write report into {}", args.out_dir.display()))?;

    println!("Report written:");
    println!("  {}", paths.years_csv.display());
    println!("  {}", paths.cities_csv.display());
    println!("  {}", paths.json.display());
    Ok(())
}

pub fn handle_show_command(args: ShowArgs) -> Result<()> {
    let statistics = run_pipeline(&args.input, &args.profession)?;

    println!("{}", years_table(&statistics, &args.profession));
    println!();
    println!("{}", cities_table(&statistics));
    Ok(())
}

fn run_pipeline(input: &std::path::Path, profession: &str) -> Result<Statistics> {
    let statistics = pipeline::run_file(input, profession, RateTable::default())
        .with_context(|| format!("failed to process {}", input.display()))?;
    info!(years = statistics.salary_by_year.len(), "pipeline finished");
    Ok(statistics)
}

fn years_table(statistics: &Statistics, profession: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header([
        "Year".to_string(),
        "Average salary".to_string(),
        format!("Average salary - {profession}"),
        "Vacancy count".to_string(),
        format!("Vacancy count - {profession}"),
    ]);

    for (year, salary) in &statistics.salary_by_year {
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
        table.add_row([
            year.to_string(),
            salary.to_string(),
            matching_salary.to_string(),
            statistics.count_by_year[year].to_string(),
            matching_count.to_string(),
        ]);
    }
    table
}

fn cities_table(statistics: &Statistics) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(["City", "Salary level", "City", "Vacancy share"]);

    let rows = statistics
        .top_salary_cities
        .len()
        .max(statistics.top_share_cities.len());
    for index in 0..rows {
        let (salary_city, salary) = match statistics.top_salary_cities.get(index) {
            Some((city, salary)) => (city.clone(), salary.to_string()),
            None => (String::new(), String::new()),
        };
        let (share_city, share) = match statistics.top_share_cities.get(index) {
            Some((city, share)) => (city.clone(), format!("{:.2}%", share * 100.0)),
            None => (String::new(), String::new()),
        };
        table.add_row([salary_city, salary, share_city, share]);
    }
    table
}
