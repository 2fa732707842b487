//! Downloads raw GHCN-Daily observation files (`<station_id>.dly`).
//!
//! This is the only component with a time bound: a download that exceeds the
//! configured limit surfaces as [`WeatherDataError::Timeout`], distinct from
//! other network failures. Parsing and aggregation stay pure and unbounded.

use crate::weather_data::error::WeatherDataError;
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

/// The NOAA archive holding one fixed-width `.dly` file per station.
pub const DEFAULT_BASE_URL: &str = "https://www1.ncdc.noaa.gov/pub/data/ghcn/daily/all/";

/// Default bound on a single daily-file download.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DlyFetcher {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl DlyFetcher {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    /// Downloads the raw `.dly` text for one station.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherDataError::Timeout`] when the bounded wait is
    /// exceeded, [`WeatherDataError::HttpStatus`] for non-success responses,
    /// and [`WeatherDataError::NetworkRequest`] for other transport faults.
    pub async fn fetch_daily_file(&self, station_id: &str) -> Result<String, WeatherDataError> {
        let url = format!("{}{}.dly", self.base_url, station_id);
        info!("Downloading daily observations from {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify_request_error(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    WeatherDataError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    WeatherDataError::NetworkRequest(url, e)
                });
            }
        };

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error(url.clone(), e)
            } else {
                WeatherDataError::BodyRead(url.clone(), e)
            }
        })?;
        info!(
            "Downloaded {} bytes of daily observations for station {}",
            text.len(),
            station_id
        );
        Ok(text)
    }

    fn classify_request_error(&self, url: String, error: reqwest::Error) -> WeatherDataError {
        if error.is_timeout() {
            self.timeout_error(url, error)
        } else {
            WeatherDataError::NetworkRequest(url, error)
        }
    }

    fn timeout_error(&self, url: String, source: reqwest::Error) -> WeatherDataError {
        warn!("Download of {} exceeded the {:?} limit", url, self.timeout);
        WeatherDataError::Timeout {
            url,
            timeout_secs: self.timeout.as_secs(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FaultClass, GhcndError};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accepts one connection and holds it open without ever answering.
    async fn stalling_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        format!("http://{addr}/")
    }

    /// Accepts one connection and answers every read request with `status`
    /// and `body`.
    async fn http_server(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn successful_download_returns_the_raw_text() {
        let body = "GME00129502199101TMIN  -94";
        let base_url = http_server("200 OK", body).await;
        let fetcher = DlyFetcher::new(base_url, Duration::from_secs(5));

        let text = fetcher.fetch_daily_file("GME00129502").await.unwrap();
        assert_eq!(text, body);
    }

    #[tokio::test]
    async fn exceeding_the_bound_is_a_dedicated_timeout() {
        let base_url = stalling_server().await;
        let fetcher = DlyFetcher::new(base_url, Duration::from_millis(200));

        let err = fetcher.fetch_daily_file("GME00129502").await.unwrap_err();
        assert!(matches!(err, WeatherDataError::Timeout { .. }), "{err:?}");
        assert_eq!(GhcndError::from(err).fault_class(), FaultClass::Timeout);
    }

    #[tokio::test]
    async fn non_success_status_reports_url_and_status() {
        let base_url = http_server("404 Not Found", "").await;
        let fetcher = DlyFetcher::new(base_url.clone(), Duration::from_secs(5));

        let err = fetcher.fetch_daily_file("GME00129502").await.unwrap_err();
        match err {
            WeatherDataError::HttpStatus { url, status, .. } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(url, format!("{base_url}GME00129502.dly"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
