//! Aggregates over a ride listing.
//!
//! Everything here is a pure function of the input slice and is recomputed on
//! every render; nothing is cached between refresh cycles.

use crate::models::{RideRecord, RideStatus};
use indexmap::IndexMap;

/// Per-driver aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverSummary {
    pub driver_name: String,
    pub ride_count: usize,
    pub total_fare: f64,
}

impl DriverSummary {
    fn new(driver_name: String) -> Self {
        Self {
            driver_name,
            ride_count: 0,
            total_fare: 0.0,
        }
    }

    pub fn average_fare(&self) -> f64 {
        if self.ride_count == 0 {
            0.0
        } else {
            self.total_fare / self.ride_count as f64
        }
    }
}

/// Headline numbers of the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardTotals {
    pub total_count: usize,
    pub total_fare: f64,
    pub average_fare: f64,
    pub pending_count: usize,
    pub processed_count: usize,
}

pub fn total_count(rides: &[RideRecord]) -> usize {
    rides.len()
}

pub fn total_fare(rides: &[RideRecord]) -> f64 {
    rides.iter().map(RideRecord::fare_or_zero).sum()
}

pub fn average_fare(rides: &[RideRecord]) -> f64 {
    let count = total_count(rides);
    if count == 0 {
        return 0.0;
    }
    total_fare(rides) / count as f64
}

/// Groups rides by driver name, keeping the order in which drivers first appear.
pub fn group_by_driver(rides: &[RideRecord]) -> IndexMap<String, DriverSummary> {
    let mut groups: IndexMap<String, DriverSummary> = IndexMap::new();
    for ride in rides {
        let summary = groups
            .entry(ride.driver.name.clone())
            .or_insert_with(|| DriverSummary::new(ride.driver.name.clone()));
        summary.ride_count += 1;
        summary.total_fare += ride.fare_or_zero();
    }
    groups
}

pub fn dashboard_totals(rides: &[RideRecord]) -> DashboardTotals {
    let processed_count = rides
        .iter()
        .filter(|ride| ride.status_kind() == RideStatus::Processada)
        .count();

    DashboardTotals {
        total_count: total_count(rides),
        total_fare: total_fare(rides),
        average_fare: average_fare(rides),
        pending_count: rides.len() - processed_count,
        processed_count,
    }
}

/// Driver with the highest accumulated fare. Ties go to the driver seen first.
pub fn top_driver_by_fare(groups: &IndexMap<String, DriverSummary>) -> Option<&DriverSummary> {
    groups.values().fold(None, |best, summary| match best {
        Some(current) if current.total_fare >= summary.total_fare => Some(current),
        _ => Some(summary),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Driver;

    fn ride(id: &str, driver: &str, status: &str, fare: Option<f64>) -> RideRecord {
        RideRecord {
            id: id.to_string(),
            status: status.to_string(),
            driver: Driver {
                name: driver.to_string(),
                rating: Some(5.0),
            },
            fare_amount: fare,
            ..Default::default()
        }
    }

    #[test]
    fn test_totals_for_two_rides() {
        let rides = vec![
            ride("1", "Carla", "pendente", Some(10.0)),
            ride("2", "Joao", "processada", Some(25.5)),
        ];

        assert_eq!(total_count(&rides), 2);
        assert_eq!(total_fare(&rides), 35.5);
        assert_eq!(average_fare(&rides), 17.75);

        let totals = dashboard_totals(&rides);
        assert_eq!(totals.pending_count, 1);
        assert_eq!(totals.processed_count, 1);
    }

    #[test]
    fn test_missing_fares_count_as_zero() {
        let rides = vec![
            ride("1", "Carla", "pendente", None),
            ride("2", "Carla", "pendente", Some(7.25)),
            ride("3", "Carla", "pendente", Some(f64::INFINITY)),
        ];
        assert_eq!(total_fare(&rides), 7.25);
    }

    #[test]
    fn test_average_of_empty_list_is_zero() {
        assert_eq!(average_fare(&[]), 0.0);
        assert_eq!(dashboard_totals(&[]), DashboardTotals::default());
    }

    #[test]
    fn test_group_by_driver_keeps_first_appearance_order() {
        let rides = vec![
            ride("1", "Joao", "pendente", Some(10.0)),
            ride("2", "Carla", "pendente", Some(20.0)),
            ride("3", "Joao", "processada", Some(5.0)),
            ride("4", "Bia", "pendente", None),
        ];

        let groups = group_by_driver(&rides);
        let names: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Joao", "Carla", "Bia"]);

        let joao = &groups["Joao"];
        assert_eq!(joao.ride_count, 2);
        assert_eq!(joao.total_fare, 15.0);
        assert_eq!(joao.average_fare(), 7.5);
        assert_eq!(groups["Bia"].total_fare, 0.0);

        let counted: usize = groups.values().map(|s| s.ride_count).sum();
        assert_eq!(counted, rides.len());
    }

    #[test]
    fn test_top_driver() {
        let rides = vec![
            ride("1", "Joao", "pendente", Some(10.0)),
            ride("2", "Carla", "pendente", Some(10.0)),
            ride("3", "Bia", "pendente", Some(3.0)),
        ];
        let groups = group_by_driver(&rides);
        assert_eq!(top_driver_by_fare(&groups).unwrap().driver_name, "Joao");
        assert!(top_driver_by_fare(&IndexMap::new()).is_none());
    }
}
