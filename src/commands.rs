//! One-shot subcommands: print once and exit.

use crate::api::RideApi;
use crate::config::{Config, ConfigUpdate};
use crate::environment::{Environment, UrlOrigin};
use crate::export::{ExportDate, ExportError, write_export};
use crate::form::RideForm;
use crate::models::RideRecord;
use crate::pretty::format_brl;
use crate::stats::dashboard_totals;
use crate::ui::dashboard::utils::{RideRow, ride_rows, status_style};
use crate::{print_cmd_error, print_cmd_info, print_cmd_success, print_cmd_warn};
use chrono::Local;
use std::error::Error;
use std::path::{Path, PathBuf};

const TABLE_HEADER: [&str; 7] = ["ID", "STATUS", "PASSENGER", "DRIVER", "ROUTE", "FARE", "PAYMENT"];

fn row_cells(row: &RideRow) -> [String; 7] {
    let (icon, _) = status_style(row.status);
    [
        row.id.clone(),
        format!("{} {}", icon, row.status),
        row.passenger.clone(),
        row.driver.clone(),
        row.route.clone(),
        row.fare.clone(),
        row.payment_method.clone(),
    ]
}

/// Plain-text table of the rides, newest first, columns padded to their widest cell.
pub fn format_ride_table(rides: &[RideRecord]) -> String {
    let rows: Vec<[String; 7]> = ride_rows(rides).iter().map(row_cells).collect();

    let mut widths = TABLE_HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = TABLE_HEADER.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![format_line(&header[..])];
    lines.extend(rows.iter().map(|row| format_line(&row[..])));
    lines.join("\n")
}

pub fn format_totals(rides: &[RideRecord]) -> String {
    let totals = dashboard_totals(rides);
    format!(
        "{} rides | total {} | average {} | {} pending, {} processed",
        totals.total_count,
        format_brl(totals.total_fare),
        format_brl(totals.average_fare),
        totals.pending_count,
        totals.processed_count
    )
}

pub async fn list(api: &dyn RideApi, payment: Option<&str>) -> Result<(), Box<dyn Error>> {
    let result = match payment {
        Some(method) => api.list_rides_by_payment(method).await,
        None => api.list_rides().await,
    };
    let rides = result.inspect_err(|e| print_cmd_error!("Could not load rides", "{}", e))?;

    if rides.is_empty() {
        print_cmd_info!("No rides found", "{}", api.environment().api_url());
        return Ok(());
    }
    println!("{}", format_ride_table(&rides));
    print_cmd_info!("Totals", "{}", format_totals(&rides));
    Ok(())
}

pub async fn balance(api: &dyn RideApi, driver: &str) -> Result<(), Box<dyn Error>> {
    let balance = api
        .get_balance(driver)
        .await
        .inspect_err(|e| print_cmd_error!("Could not read balance", "{}", e))?;
    let name = if balance.driver.trim().is_empty() {
        driver
    } else {
        balance.driver.as_str()
    };
    print_cmd_info!("Balance", "{}: {}", name, format_brl(balance.amount()));
    Ok(())
}

pub async fn create(api: &dyn RideApi, form: &RideForm) -> Result<(), Box<dyn Error>> {
    let payload = form
        .build_payload()
        .inspect_err(|e| print_cmd_error!("Invalid ride", "{}", e))?;
    api.create_ride(&payload)
        .await
        .inspect_err(|e| print_cmd_error!("Error creating ride", "{}", e))?;
    print_cmd_success!(
        "Ride created",
        "{} -> {} with {}, {}",
        payload.origin,
        payload.destination,
        payload.driver.name,
        format_brl(payload.fare_amount)
    );
    Ok(())
}

/// Writes the export file. An empty listing is reported and leaves no file.
pub async fn export(
    api: &dyn RideApi,
    output_dir: &Path,
    date: ExportDate,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let rides = api
        .list_rides()
        .await
        .inspect_err(|e| print_cmd_error!("Could not load rides", "{}", e))?;

    match write_export(output_dir, &rides, date, Local::now()) {
        Ok(path) => {
            print_cmd_success!("Exported", "{} rides to {}", rides.len(), path.display());
            Ok(Some(path))
        }
        Err(ExportError::Empty) => {
            print_cmd_warn!("Nothing exported", "{}", ExportError::Empty);
            Ok(None)
        }
        Err(e) => {
            print_cmd_error!("Export failed", "{}", e);
            Err(e.into())
        }
    }
}

/// Merges the update into the config file at `path`, creating it when missing.
/// An unreadable file is replaced rather than blocking its own repair.
pub fn configure(path: &Path, update: ConfigUpdate) -> Result<Config, Box<dyn Error>> {
    if let Some(url) = update.api_url.as_deref().filter(|url| !url.trim().is_empty()) {
        Environment::parse_from(url, UrlOrigin::Flag)
            .inspect_err(|e| print_cmd_error!("Config not saved", "{}", e))?;
    }

    let mut config = Config::load_or_default(path).unwrap_or_else(|e| {
        print_cmd_warn!("Replacing unreadable config", "{}: {}", path.display(), e);
        Config::default()
    });
    config.apply(update);
    config
        .save(path)
        .inspect_err(|e| print_cmd_error!("Could not save config", "{}", e))?;
    print_cmd_success!("Config saved", "{}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockRideApi;
    use crate::api::error::ApiError;
    use crate::models::{CreateRidePayload, Driver, DriverBalance, Passenger};

    fn ride(id: &str, driver: &str, fare: f64, status: &str) -> RideRecord {
        RideRecord {
            id: id.to_string(),
            status: status.to_string(),
            passenger: Passenger {
                name: "Ana".to_string(),
                phone: String::new(),
            },
            driver: Driver {
                name: driver.to_string(),
                rating: None,
            },
            origin: "Centro".to_string(),
            destination: "Aeroporto".to_string(),
            fare_amount: Some(fare),
            payment_method: "Pix".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_is_newest_first_and_aligned() {
        let rides = vec![
            ride("1", "Carla", 10.0, "pendente"),
            ride("22", "Bruno", 25.5, "processada"),
        ];
        let table = format_ride_table(&rides);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  STATUS"));
        assert!(lines[1].starts_with("22  ✅ processada"));
        assert!(lines[2].starts_with("1   ⏳ pendente"));
        assert!(lines[1].contains("R$ 25,50"));
    }

    #[test]
    fn test_totals_line() {
        let rides = vec![
            ride("1", "Carla", 10.0, "pendente"),
            ride("2", "Bruno", 25.5, "processada"),
        ];
        assert_eq!(
            format_totals(&rides),
            "2 rides | total R$ 35,50 | average R$ 17,75 | 1 pending, 1 processed"
        );
    }

    #[tokio::test]
    async fn test_list_by_payment_uses_filtered_endpoint() {
        let mut mock = MockRideApi::new();
        mock.expect_list_rides().never();
        mock.expect_list_rides_by_payment()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        mock.expect_environment().return_const(Environment::Local);

        assert!(list(&mock, Some("Pix")).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_propagates_api_errors() {
        let mut mock = MockRideApi::new();
        mock.expect_list_rides().returning(|| {
            Err(ApiError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        });
        assert!(list(&mock, None).await.is_err());
    }

    #[tokio::test]
    async fn test_balance_reads_driver() {
        let mut mock = MockRideApi::new();
        mock.expect_get_balance().times(1).returning(|driver| {
            Ok(DriverBalance {
                driver: driver.to_string(),
                balance: Some(0.0),
            })
        });
        assert!(balance(&mock, "Desconhecido").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_fare_without_request() {
        let mut mock = MockRideApi::new();
        mock.expect_create_ride().never();
        let form = RideForm {
            fare: "-3".to_string(),
            ..Default::default()
        };
        assert!(create(&mock, &form).await.is_err());
    }

    #[tokio::test]
    async fn test_create_sends_payload() {
        let mut mock = MockRideApi::new();
        mock.expect_create_ride()
            .withf(|p: &CreateRidePayload| p.fare_amount == 7.25 && p.origin == "Centro")
            .times(1)
            .returning(|_| Ok(()));
        let form = RideForm {
            passenger_name: "Ana".to_string(),
            driver_name: "Carla".to_string(),
            origin: "Centro".to_string(),
            destination: "Aeroporto".to_string(),
            fare: "7,25".to_string(),
        };
        assert!(create(&mock, &form).await.is_ok());
    }

    #[tokio::test]
    async fn test_export_writes_file_or_warns_on_empty() {
        let dir = tempfile::tempdir().unwrap();

        let mut mock = MockRideApi::new();
        mock.expect_list_rides()
            .returning(|| Ok(vec![ride("1", "Carla", 10.0, "pendente")]));
        let path = export(&mock, dir.path(), ExportDate::Blank)
            .await
            .unwrap()
            .unwrap();
        assert!(path.starts_with(dir.path()));

        let mut empty = MockRideApi::new();
        empty.expect_list_rides().returning(|| Ok(Vec::new()));
        assert_eq!(
            export(&empty, dir.path(), ExportDate::Blank).await.unwrap(),
            None
        );
    }

    #[test]
    fn test_configure_merges_into_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".transflow").join("config.json");

        configure(
            &path,
            ConfigUpdate {
                balance_driver: Some("Carla".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let config = configure(
            &path,
            ConfigUpdate {
                poll_interval_ms: Some(5000),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.balance_driver.as_deref(), Some("Carla"));
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
        assert_eq!(config.poll_interval_ms, 5000);
    }

    #[test]
    fn test_configure_replaces_corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = configure(
            &path,
            ConfigUpdate {
                balance_driver: Some("Carla".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.balance_driver.as_deref(), Some("Carla"));
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_configure_blank_url_clears_and_bad_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let with_url = |url: &str| ConfigUpdate {
            api_url: Some(url.to_string()),
            ..Default::default()
        };

        configure(&path, with_url("http://rides.internal:8000")).unwrap();
        assert!(configure(&path, with_url("rides.internal:8000")).is_err());
        assert_eq!(
            Config::load_from_file(&path).unwrap().api_url.as_deref(),
            Some("http://rides.internal:8000")
        );

        let config = configure(&path, with_url("")).unwrap();
        assert_eq!(config.api_url, None);
        assert_eq!(Config::load_from_file(&path).unwrap().api_url, None);
    }
}
