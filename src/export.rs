//! CSV export of the ride listing.

use crate::models::RideRecord;
use crate::pretty::format_decimal_plain;
use chrono::{DateTime, Local, NaiveDate};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const HEADER: [&str; 9] = [
    "ID",
    "Data",
    "Passageiro",
    "Motorista",
    "Origem",
    "Destino",
    "Valor",
    "Pagamento",
    "Status",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There are no rides to export")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Value written in the date column.
///
/// Rides carry no date of their own, so the column holds the export date unless told otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportDate {
    /// The day the export runs, repeated on every row.
    #[default]
    Today,
    /// A fixed date on every row.
    Fixed(NaiveDate),
    /// Leave the column empty.
    Blank,
}

impl ExportDate {
    fn cell(&self) -> String {
        let date = match self {
            ExportDate::Today => Local::now().date_naive(),
            ExportDate::Fixed(date) => *date,
            ExportDate::Blank => return String::new(),
        };
        date.format("%d/%m/%Y").to_string()
    }
}

impl FromStr for ExportDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(ExportDate::Today),
            "blank" | "none" => Ok(ExportDate::Blank),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .map(ExportDate::Fixed)
                .map_err(|_| format!("expected 'today', 'blank' or YYYY-MM-DD, got '{}'", s)),
        }
    }
}

impl Display for ExportDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportDate::Today => write!(f, "today"),
            ExportDate::Fixed(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ExportDate::Blank => write!(f, "blank"),
        }
    }
}

/// Serializes the rides as CSV text, header first.
///
/// Fields containing quotes, commas or line breaks are quoted with embedded quotes doubled,
/// so the comma-decimal fare column is always quoted.
pub fn build_csv(rides: &[RideRecord], date: ExportDate) -> Result<String, ExportError> {
    if rides.is_empty() {
        return Err(ExportError::Empty);
    }

    let date_cell = date.cell();
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for ride in rides {
        let fare = format_decimal_plain(ride.fare_or_zero());
        writer.write_record([
            ride.display_id(),
            date_cell.as_str(),
            ride.passenger.name.as_str(),
            ride.driver.name.as_str(),
            ride.origin.as_str(),
            ride.destination.as_str(),
            fare.as_str(),
            ride.payment_method.as_str(),
            ride.status.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// `corridas_20261019_142501.csv`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("corridas_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Writes the CSV into `dir` under a timestamped name and returns the file path.
pub fn write_export(
    dir: &Path,
    rides: &[RideRecord],
    date: ExportDate,
    now: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let csv_text = build_csv(rides, date)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(now));
    std::fs::write(&path, csv_text.as_bytes())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Driver, Passenger};
    use chrono::TimeZone;

    fn sample_ride(id: &str, origin: &str, fare: f64) -> RideRecord {
        RideRecord {
            id: id.to_string(),
            status: "pendente".to_string(),
            passenger: Passenger {
                name: "Ana".to_string(),
                phone: "123".to_string(),
            },
            driver: Driver {
                name: "Carla".to_string(),
                rating: Some(4.8),
            },
            origin: origin.to_string(),
            destination: "Aeroporto".to_string(),
            fare_amount: Some(fare),
            payment_method: "Pix".to_string(),
            ..Default::default()
        }
    }

    fn fixed_date() -> ExportDate {
        ExportDate::Fixed(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn test_empty_export_is_rejected() {
        assert!(matches!(
            build_csv(&[], ExportDate::Today),
            Err(ExportError::Empty)
        ));
    }

    #[test]
    fn test_rows_follow_header() {
        let csv_text = build_csv(&[sample_ride("1", "Centro", 10.5)], fixed_date()).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "ID,Data,Passageiro,Motorista,Origem,Destino,Valor,Pagamento,Status"
        );
        assert_eq!(
            lines[1],
            "1,19/10/2026,Ana,Carla,Centro,Aeroporto,\"10,50\",Pix,pendente"
        );
    }

    #[test]
    fn test_quotes_survive_a_csv_reader() {
        let csv_text = build_csv(&[sample_ride("1", r#"A "B" St"#, 3.0)], fixed_date()).unwrap();
        assert!(csv_text.contains(r#""A ""B"" St""#));

        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[4], r#"A "B" St"#);
        assert_eq!(&record[6], "3,00");
    }

    #[test]
    fn test_blank_date_column() {
        let csv_text = build_csv(&[sample_ride("9", "X", 1.0)], ExportDate::Blank).unwrap();
        assert!(csv_text.lines().nth(1).unwrap().starts_with("9,,Ana"));
    }

    #[test]
    fn test_parse_export_date() {
        assert_eq!("today".parse::<ExportDate>(), Ok(ExportDate::Today));
        assert_eq!("blank".parse::<ExportDate>(), Ok(ExportDate::Blank));
        assert_eq!("2026-10-19".parse::<ExportDate>(), Ok(fixed_date()));
        assert!("19/10/2026".parse::<ExportDate>().is_err());
    }

    #[test]
    fn test_write_export_uses_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let now = Local.with_ymd_and_hms(2026, 10, 19, 14, 25, 1).unwrap();

        let path = write_export(
            dir.path(),
            &[sample_ride("1", "Centro", 10.0)],
            fixed_date(),
            now,
        )
        .unwrap();

        assert_eq!(path.file_name().unwrap(), "corridas_20261019_142501.csv");
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("ID,Data"));
    }
}
