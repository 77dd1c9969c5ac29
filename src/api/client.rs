//! TransFlow API Client
//!
//! A client for the ride backend, allowing rides to be listed and created and
//! driver balances to be read.

use crate::api::RideApi;
use crate::api::error::ApiError;
use crate::environment::Environment;
use crate::models::{CreateRidePayload, DriverBalance, RideRecord};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("transflow-dash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    /// Without a timeout a hung request simply never resolves.
    pub fn with_timeout(
        environment: Environment,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Parse)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self.client.get(&url).send().await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_request_no_response<B: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.build_url(endpoint);
        let response = self.client.post(&url).json(body).send().await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl RideApi for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn list_rides(&self) -> Result<Vec<RideRecord>, ApiError> {
        self.get_request("corridas").await
    }

    async fn list_rides_by_payment(
        &self,
        payment_method: &str,
    ) -> Result<Vec<RideRecord>, ApiError> {
        let method = urlencoding::encode(payment_method).into_owned();
        self.get_request(&format!("corridas/{}", method)).await
    }

    async fn get_balance(&self, driver_name: &str) -> Result<DriverBalance, ApiError> {
        let driver = urlencoding::encode(driver_name).into_owned();
        self.get_request(&format!("saldo/{}", driver)).await
    }

    async fn create_ride(&self, payload: &CreateRidePayload) -> Result<(), ApiError> {
        self.post_request_no_response("corridas", payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewRideDriver, Passenger};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves one canned HTTP response and reports the request head and body it received.
    async fn one_shot_server(
        status: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<(String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let head_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break buf.len();
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            while buf.len() < head_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let request_body = String::from_utf8_lossy(&buf[head_end..]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send((head, request_body));
        });

        (format!("http://{}", addr), rx)
    }

    fn client_for(url: &str) -> ApiClient {
        ApiClient::with_timeout(
            Environment::Custom {
                api_url: url.to_string(),
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_build_url_joins_segments() {
        let client = client_for("http://localhost:8000/");
        assert_eq!(client.build_url("/corridas"), "http://localhost:8000/corridas");
        assert_eq!(client.build_url("saldo/x"), "http://localhost:8000/saldo/x");
    }

    #[tokio::test]
    async fn test_list_rides_decodes_array() {
        let (url, rx) = one_shot_server(
            "200 OK",
            r#"[{"_id":"1","status":"pendente","motorista":{"nome":"Carla","nota":4.8},"valor_corrida":10}]"#,
        )
        .await;

        let rides = client_for(&url).list_rides().await.unwrap();
        assert_eq!(rides.len(), 1);
        assert_eq!(rides[0].driver.name, "Carla");
        assert_eq!(rides[0].fare_amount, Some(10.0));

        let (head, _) = rx.await.unwrap();
        assert!(head.starts_with("GET /corridas HTTP/1.1"));
        assert!(head.to_lowercase().contains("user-agent: transflow-dash/"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let (url, _rx) = one_shot_server("500 Internal Server Error", r#"{"detail":"boom"}"#).await;

        match client_for(&url).list_rides().await {
            Err(ApiError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("boom"));
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_object_body_is_parse_error() {
        let (url, _rx) = one_shot_server("200 OK", r#"{"corridas": []}"#).await;

        let result = client_for(&url).list_rides().await;
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_balance_encodes_driver_name() {
        let (url, rx) = one_shot_server("200 OK", r#"{"motorista":"João Silva","saldo":50.5}"#).await;

        let balance = client_for(&url).get_balance("João Silva").await.unwrap();
        assert_eq!(balance.amount(), 50.5);

        let (head, _) = rx.await.unwrap();
        assert!(head.starts_with("GET /saldo/Jo%C3%A3o%20Silva HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_create_ride_posts_json() {
        let (url, rx) = one_shot_server("201 Created", r#"{"_id":"abc","status":"pendente"}"#).await;
        let payload = CreateRidePayload {
            passenger: Passenger {
                name: "Teste".to_string(),
                phone: "99999-9999".to_string(),
            },
            driver: NewRideDriver {
                name: "Carla".to_string(),
                rating: 5.0,
            },
            origin: "A".to_string(),
            destination: "B".to_string(),
            fare_amount: 20.0,
            payment_method: "Pix".to_string(),
        };

        client_for(&url).create_ride(&payload).await.unwrap();

        let (head, body) = rx.await.unwrap();
        assert!(head.starts_with("POST /corridas HTTP/1.1"));
        let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(sent["motorista"]["nome"], "Carla");
        assert_eq!(sent["valor_corrida"], 20.0);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Nothing listens on the discard port.
        let client = client_for("http://127.0.0.1:9");
        let result = client.list_rides().await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
