use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::aggregate::GroupedSalaries;

/// Cities below this share of all postings enter neither city ranking.
const MIN_CITY_SHARE: f64 = 0.01;

/// Entries kept per city ranking.
const TOP_SET_SIZE: usize = 10;

/// The six final outputs of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Truncated mean salary over all vacancies, per year.
    pub salary_by_year: BTreeMap<i32, i64>,
    pub count_by_year: BTreeMap<i32, usize>,
    /// Same pair over the profession-matching subset. When the filter
    /// matched nothing at all, both are zero-filled with exactly the
    /// year keys of the overall series.
    pub matching_salary_by_year: BTreeMap<i32, i64>,
    pub matching_count_by_year: BTreeMap<i32, usize>,
    /// Top cities by truncated mean salary, descending, at most ten.
    /// Only cities clearing the share floor are considered.
    pub top_salary_cities: Vec<(String, i64)>,
    /// Top cities by share of all postings (4-decimal fraction),
    /// descending, at most ten.
    pub top_share_cities: Vec<(String, f64)>,
}

impl Statistics {
    pub fn finalize(groups: &GroupedSalaries) -> Self {
        let salary_by_year: BTreeMap<i32, i64> = groups
            .by_year
            .iter()
            .map(|(year, salaries)| (*year, truncated_mean(salaries)))
            .collect();
        let count_by_year: BTreeMap<i32, usize> = groups
            .by_year
            .iter()
            .map(|(year, salaries)| (*year, salaries.len()))
            .collect();

        // One decision covers both matching series.
        let filter_matched_nothing = groups.by_year_matching.is_empty();
        let (matching_salary_by_year, matching_count_by_year) = if filter_matched_nothing {
            (
                groups.by_year.keys().map(|year| (*year, 0)).collect(),
                groups.by_year.keys().map(|year| (*year, 0)).collect(),
            )
        } else {
            (
                groups
                    .by_year_matching
                    .iter()
                    .map(|(year, salaries)| (*year, truncated_mean(salaries)))
                    .collect(),
                groups
                    .by_year_matching
                    .iter()
                    .map(|(year, salaries)| (*year, salaries.len()))
                    .collect(),
            )
        };

        let (top_salary_cities, top_share_cities) = rank_cities(groups);

        Self {
            salary_by_year,
            count_by_year,
            matching_salary_by_year,
            matching_count_by_year,
            top_salary_cities,
            top_share_cities,
        }
    }
}

/// Two-stage city ranking. Stage one filters and orders by share;
/// stage two ranks by salary over exactly the cities that cleared the
/// share floor (the pre-truncation survivors, not the top ten).
fn rank_cities(groups: &GroupedSalaries) -> (Vec<(String, i64)>, Vec<(String, f64)>) {
    let total = groups.total();
    if total == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut shares: Vec<(String, f64)> = Vec::new();
    for (city, salaries) in groups.cities() {
        // The floor applies to the already-rounded share.
        let share = round4(salaries.len() as f64 / total as f64);
        if share >= MIN_CITY_SHARE {
            shares.push((city.to_string(), share));
        }
    }
    // Stable sorts keep first-seen order on ties.
    shares.sort_by(|a, b| b.1.total_cmp(&a.1));

    let survivors: HashSet<&str> = shares.iter().map(|(city, _)| city.as_str()).collect();
    let mut salaries: Vec<(String, i64)> = groups
        .cities()
        .filter(|(city, _)| survivors.contains(city))
        .map(|(city, salaries)| (city.to_string(), truncated_mean(salaries)))
        .collect();
    salaries.sort_by(|a, b| b.1.cmp(&a.1));

    shares.truncate(TOP_SET_SIZE);
    salaries.truncate(TOP_SET_SIZE);
    (salaries, shares)
}

/// Mean truncated toward zero, the averaging rule for every salary
/// statistic (1999.9 becomes 1999).
fn truncated_mean(salaries: &[f64]) -> i64 {
    if salaries.is_empty() {
        return 0;
    }
    (salaries.iter().sum::<f64>() / salaries.len() as f64) as i64
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::vacancy::Vacancy;

    fn vacancy(title: &str, area: &str, year: i32, salary_average: f64) -> Vacancy {
        Vacancy {
            title: title.to_string(),
            salary_from: 0,
            salary_to: 0,
            currency: "RUR".to_string(),
            salary_average,
            area_name: area.to_string(),
            year,
        }
    }

    fn finalize(vacancies: &[Vacancy], profession: &str) -> Statistics {
        let mut aggregator = Aggregator::new(profession);
        for v in vacancies {
            aggregator.push(v);
        }
        Statistics::finalize(&aggregator.into_groups())
    }

    #[test]
    fn averages_and_counts_per_year() {
        let stats = finalize(
            &[
                vacancy("Engineer", "Moscow", 2020, 1500.0),
                vacancy("Engineer", "Moscow", 2021, 2500.0),
                vacancy("Analyst", "Tomsk", 2020, 500.0),
            ],
            "Engineer",
        );

        assert_eq!(stats.salary_by_year, BTreeMap::from([(2020, 1000), (2021, 2500)]));
        assert_eq!(stats.count_by_year, BTreeMap::from([(2020, 2), (2021, 1)]));
        assert_eq!(
            stats.matching_salary_by_year,
            BTreeMap::from([(2020, 1500), (2021, 2500)])
        );
        assert_eq!(
            stats.matching_count_by_year,
            BTreeMap::from([(2020, 1), (2021, 1)])
        );
    }

    #[test]
    fn mean_truncates_instead_of_rounding() {
        let stats = finalize(&[vacancy("A", "Moscow", 2020, 1999.9)], "A");
        assert_eq!(stats.salary_by_year[&2020], 1999);
    }

    #[test]
    fn empty_filter_match_zero_fills_both_matching_series() {
        let stats = finalize(
            &[
                vacancy("Engineer", "Moscow", 2020, 1500.0),
                vacancy("Engineer", "Moscow", 2021, 2500.0),
            ],
            "Surgeon",
        );

        assert_eq!(
            stats.matching_salary_by_year,
            BTreeMap::from([(2020, 0), (2021, 0)])
        );
        assert_eq!(
            stats.matching_count_by_year,
            BTreeMap::from([(2020, 0), (2021, 0)])
        );
    }

    #[test]
    fn partially_matching_filter_keeps_only_matched_years() {
        let stats = finalize(
            &[
                vacancy("Engineer", "Moscow", 2020, 1500.0),
                vacancy("Analyst", "Moscow", 2021, 2500.0),
            ],
            "Engineer",
        );

        assert_eq!(stats.matching_salary_by_year, BTreeMap::from([(2020, 1500)]));
        assert_eq!(stats.matching_count_by_year, BTreeMap::from([(2020, 1)]));
    }

    #[test]
    fn city_share_is_rounded_to_four_decimals() {
        let stats = finalize(
            &[
                vacancy("A", "Moscow", 2020, 1.0),
                vacancy("B", "Moscow", 2020, 1.0),
                vacancy("C", "Tomsk", 2020, 1.0),
            ],
            "x",
        );

        let moscow = stats
            .top_share_cities
            .iter()
            .find(|(city, _)| city == "Moscow")
            .unwrap();
        assert_eq!(moscow.1, 0.6667);
    }

    #[test]
    fn share_floor_excludes_city_from_both_rankings() {
        // 200 vacancies: Gorodok holds exactly one (share 0.005),
        // below the 1% floor despite the top salary in the sample.
        let mut vacancies = Vec::new();
        for i in 0..199 {
            let city = if i % 2 == 0 { "Moscow" } else { "Kazan" };
            vacancies.push(vacancy("A", city, 2020, 1000.0));
        }
        vacancies.push(vacancy("A", "Gorodok", 2020, 1_000_000.0));

        let stats = finalize(&vacancies, "A");
        assert!(stats
            .top_share_cities
            .iter()
            .all(|(city, _)| city != "Gorodok"));
        assert!(stats
            .top_salary_cities
            .iter()
            .all(|(city, _)| city != "Gorodok"));
    }

    #[test]
    fn rankings_are_descending_and_capped_at_ten() {
        // Twelve cities, each with a distinct count and salary, all
        // above the share floor.
        let mut vacancies = Vec::new();
        for n in 1..=12 {
            let city = format!("City{n:02}");
            for _ in 0..n {
                vacancies.push(vacancy("A", &city, 2020, (n * 1000) as f64));
            }
        }

        let stats = finalize(&vacancies, "A");
        assert_eq!(stats.top_share_cities.len(), 10);
        assert_eq!(stats.top_salary_cities.len(), 10);
        assert!(stats
            .top_share_cities
            .windows(2)
            .all(|w| w[0].1 >= w[1].1));
        assert!(stats
            .top_salary_cities
            .windows(2)
            .all(|w| w[0].1 >= w[1].1));
        // The two-vacancy and one-vacancy cities fall off the end.
        assert_eq!(stats.top_share_cities[0].0, "City12");
        assert_eq!(stats.top_salary_cities[0].0, "City12");
        assert!(stats.top_share_cities.iter().all(|(c, _)| c != "City01"));
    }

    #[test]
    fn share_ties_keep_first_seen_order() {
        let stats = finalize(
            &[
                vacancy("A", "Tomsk", 2020, 1.0),
                vacancy("A", "Moscow", 2020, 2.0),
            ],
            "A",
        );

        let order: Vec<&str> = stats
            .top_share_cities
            .iter()
            .map(|(city, _)| city.as_str())
            .collect();
        assert_eq!(order, vec!["Tomsk", "Moscow"]);
    }

    #[test]
    fn no_vacancies_produce_empty_statistics() {
        let stats = finalize(&[], "A");
        assert!(stats.salary_by_year.is_empty());
        assert!(stats.matching_salary_by_year.is_empty());
        assert!(stats.top_share_cities.is_empty());
        assert!(stats.top_salary_cities.is_empty());
    }
}
