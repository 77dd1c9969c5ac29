//! Ride data exchanged with the TransFlow API.
//!
//! Records are decoded leniently: the API is not schema-validated on this side,
//! so a missing or mistyped field becomes its default instead of failing the
//! whole listing.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Processing status of a ride, as far as the dashboard cares.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum RideStatus {
    #[strum(serialize = "pendente")]
    Pendente,
    #[strum(serialize = "processada")]
    Processada,
}

impl RideStatus {
    /// Maps the raw API value; anything unrecognized counts as pending.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("processada") {
            RideStatus::Processada
        } else {
            RideStatus::Pendente
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(rename = "nome", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "telefone", default, deserialize_with = "lenient_string")]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    #[serde(rename = "nome", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "nota", default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
}

/// A ride ("corrida") as listed by `GET /corridas`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RideRecord {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "id_corrida", default, deserialize_with = "lenient_opt_string")]
    pub ride_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(rename = "passageiro", default, deserialize_with = "lenient_struct")]
    pub passenger: Passenger,
    #[serde(rename = "motorista", default, deserialize_with = "lenient_struct")]
    pub driver: Driver,
    #[serde(rename = "origem", default, deserialize_with = "lenient_string")]
    pub origin: String,
    #[serde(rename = "destino", default, deserialize_with = "lenient_string")]
    pub destination: String,
    #[serde(rename = "valor_corrida", default, deserialize_with = "lenient_f64")]
    pub fare_amount: Option<f64>,
    #[serde(rename = "forma_pagamento", default, deserialize_with = "lenient_string")]
    pub payment_method: String,
}

impl RideRecord {
    /// Fare used by every aggregate. Absent, non-finite and negative values count as zero.
    pub fn fare_or_zero(&self) -> f64 {
        match self.fare_amount {
            Some(fare) if fare.is_finite() && fare >= 0.0 => fare,
            _ => 0.0,
        }
    }

    pub fn status_kind(&self) -> RideStatus {
        RideStatus::from_raw(&self.status)
    }

    /// Identifier shown to the user: the backend id, or the ride id when the former is empty.
    pub fn display_id(&self) -> &str {
        match (&self.id, &self.ride_id) {
            (id, Some(ride_id)) if id.is_empty() => ride_id,
            (id, _) => id,
        }
    }
}

/// Body of `POST /corridas`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRidePayload {
    #[serde(rename = "passageiro")]
    pub passenger: Passenger,
    #[serde(rename = "motorista")]
    pub driver: NewRideDriver,
    #[serde(rename = "origem")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    #[serde(rename = "valor_corrida")]
    pub fare_amount: f64,
    #[serde(rename = "forma_pagamento")]
    pub payment_method: String,
}

/// Driver block of a new ride; the rating is mandatory on creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRideDriver {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nota")]
    pub rating: f64,
}

/// Answer of `GET /saldo/{motorista}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DriverBalance {
    #[serde(rename = "motorista", default)]
    pub driver: String,
    #[serde(rename = "saldo", default, deserialize_with = "lenient_f64")]
    pub balance: Option<f64>,
}

impl DriverBalance {
    pub fn amount(&self) -> f64 {
        self.balance.filter(|b| b.is_finite()).unwrap_or(0.0)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_struct<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_backend_record() {
        let record: RideRecord = serde_json::from_value(json!({
            "_id": "6512a0c4",
            "id_corrida": "6512a0c4",
            "status": "processada",
            "passageiro": {"nome": "Ana", "telefone": "123"},
            "motorista": {"nome": "Carla", "nota": 4.8},
            "origem": "Centro",
            "destino": "Aeroporto",
            "valor_corrida": 35.5,
            "forma_pagamento": "DigitalCoin"
        }))
        .unwrap();

        assert_eq!(record.id, "6512a0c4");
        assert_eq!(record.status_kind(), RideStatus::Processada);
        assert_eq!(record.passenger.name, "Ana");
        assert_eq!(record.driver.name, "Carla");
        assert_eq!(record.driver.rating, Some(4.8));
        assert_eq!(record.fare_or_zero(), 35.5);
        assert_eq!(record.payment_method, "DigitalCoin");
    }

    #[test]
    fn test_malformed_fields_fall_back_to_defaults() {
        let record: RideRecord = serde_json::from_value(json!({
            "id": 7,
            "status": null,
            "passageiro": "not an object",
            "valor_corrida": "12.5"
        }))
        .unwrap();

        assert_eq!(record.id, "7");
        assert_eq!(record.status, "");
        assert_eq!(record.status_kind(), RideStatus::Pendente);
        assert_eq!(record.passenger, Passenger::default());
        assert_eq!(record.driver.name, "");
        assert_eq!(record.fare_amount, Some(12.5));
    }

    #[test]
    fn test_invalid_fares_count_as_zero() {
        let mut record = RideRecord::default();
        assert_eq!(record.fare_or_zero(), 0.0);
        record.fare_amount = Some(f64::NAN);
        assert_eq!(record.fare_or_zero(), 0.0);
        record.fare_amount = Some(-3.0);
        assert_eq!(record.fare_or_zero(), 0.0);
        record.fare_amount = Some(20.0);
        assert_eq!(record.fare_or_zero(), 20.0);
    }

    #[test]
    fn test_unknown_status_is_pending() {
        assert_eq!(RideStatus::from_raw("cancelada"), RideStatus::Pendente);
        assert_eq!(RideStatus::from_raw(" PROCESSADA "), RideStatus::Processada);
        assert_eq!(RideStatus::Processada.to_string(), "processada");
    }

    #[test]
    fn test_payload_uses_api_field_names() {
        let payload = CreateRidePayload {
            passenger: Passenger {
                name: "Teste".to_string(),
                phone: "123".to_string(),
            },
            driver: NewRideDriver {
                name: "Motorista Teste".to_string(),
                rating: 5.0,
            },
            origin: "A".to_string(),
            destination: "B".to_string(),
            fare_amount: 20.0,
            payment_method: "Pix".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "passageiro": {"nome": "Teste", "telefone": "123"},
                "motorista": {"nome": "Motorista Teste", "nota": 5.0},
                "origem": "A",
                "destino": "B",
                "valor_corrida": 20.0,
                "forma_pagamento": "Pix"
            })
        );
    }

    #[test]
    fn test_balance_decoding() {
        let balance: DriverBalance =
            serde_json::from_value(json!({"motorista": "Joao", "saldo": 50.5})).unwrap();
        assert_eq!(balance.driver, "Joao");
        assert_eq!(balance.amount(), 50.5);
    }
}
