use std::collections::{BTreeMap, HashMap};

use crate::vacancy::Vacancy;

/// Per-key salary groupings built in a single pass. Every `Vec` carries
/// both the sum material and, via its length, the count.
///
/// City order is first-seen order: ranking ties downstream are broken
/// by the position a city first appeared in the input.
#[derive(Debug, Default)]
pub struct GroupedSalaries {
    pub by_year: BTreeMap<i32, Vec<f64>>,
    pub by_year_matching: BTreeMap<i32, Vec<f64>>,
    city_order: Vec<String>,
    by_city: HashMap<String, Vec<f64>>,
    total: usize,
}

impl GroupedSalaries {
    /// Number of vacancies aggregated; the denominator for city shares.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Cities with their salary samples, in first-seen order.
    pub fn cities(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.city_order.iter().map(|city| {
            let salaries = self
                .by_city
                .get(city)
                .map(Vec::as_slice)
                .unwrap_or_default();
            (city.as_str(), salaries)
        })
    }

    fn push_city(&mut self, city: &str, salary: f64) {
        match self.by_city.get_mut(city) {
            Some(salaries) => salaries.push(salary),
            None => {
                self.city_order.push(city.to_string());
                self.by_city.insert(city.to_string(), vec![salary]);
            }
        }
    }
}

/// Single-pass grouping of normalized vacancies against a fixed
/// profession filter. Order of input does not affect the grouped sums.
pub struct Aggregator {
    profession: String,
    groups: GroupedSalaries,
}

impl Aggregator {
    pub fn new(profession: impl Into<String>) -> Self {
        Self {
            profession: profession.into(),
            groups: GroupedSalaries::default(),
        }
    }

    pub fn push(&mut self, vacancy: &Vacancy) {
        self.groups
            .by_year
            .entry(vacancy.year)
            .or_default()
            .push(vacancy.salary_average);

        // Literal, case-sensitive substring match.
        if vacancy.title.contains(&self.profession) {
            self.groups
                .by_year_matching
                .entry(vacancy.year)
                .or_default()
                .push(vacancy.salary_average);
        }

        self.groups.push_city(&vacancy.area_name, vacancy.salary_average);
        self.groups.total += 1;
    }

    pub fn into_groups(self) -> GroupedSalaries {
        self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn groups_by_year_city_and_filter() {
        let mut aggregator = Aggregator::new("Engineer");
        aggregator.push(&vacancy("Engineer", "Moscow", 2020, 1500.0));
        aggregator.push(&vacancy("Senior Engineer", "Moscow", 2021, 2500.0));
        aggregator.push(&vacancy("Analyst", "Tomsk", 2020, 1000.0));

        let groups = aggregator.into_groups();
        assert_eq!(groups.total(), 3);
        assert_eq!(groups.by_year[&2020], vec![1500.0, 1000.0]);
        assert_eq!(groups.by_year[&2021], vec![2500.0]);
        assert_eq!(groups.by_year_matching[&2020], vec![1500.0]);
        assert_eq!(groups.by_year_matching[&2021], vec![2500.0]);

        let cities: Vec<_> = groups.cities().map(|(city, s)| (city, s.len())).collect();
        assert_eq!(cities, vec![("Moscow", 2), ("Tomsk", 1)]);
    }

    #[test]
    fn filter_match_is_case_sensitive() {
        let mut aggregator = Aggregator::new("engineer");
        aggregator.push(&vacancy("Engineer", "Moscow", 2020, 1500.0));

        let groups = aggregator.into_groups();
        assert!(groups.by_year_matching.is_empty());
    }

    #[test]
    fn city_order_is_first_seen() {
        let mut aggregator = Aggregator::new("x");
        aggregator.push(&vacancy("A", "Tomsk", 2020, 1.0));
        aggregator.push(&vacancy("B", "Moscow", 2020, 2.0));
        aggregator.push(&vacancy("C", "Tomsk", 2020, 3.0));

        let groups = aggregator.into_groups();
        let order: Vec<_> = groups.cities().map(|(city, _)| city).collect();
        assert_eq!(order, vec!["Tomsk", "Moscow"]);
    }
}
