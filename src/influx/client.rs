//! HTTP client for the InfluxDB 1.x query endpoint.

use super::query::{self, TagSelector};
use super::source::TraceSource;
use super::types::{QueryResponse, RawSeriesRow, Series};
use crate::utils::config::DEFAULT_QUERY_TIMEOUT;
use crate::utils::error::QueryError;
use log::{debug, info};
use reqwest::blocking::Client;

/// Credentials and location of an InfluxDB database
#[derive(Debug, Clone)]
pub struct InfluxConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

/// Blocking InfluxDB client
pub struct InfluxClient {
    client: Client,
    query_url: String,
    config: InfluxConfig,
}

impl InfluxClient {
    /// Create a new client
    pub fn new(config: InfluxConfig) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(DEFAULT_QUERY_TIMEOUT)
            .build()
            .map_err(QueryError::RequestFailed)?;

        Ok(Self {
            client,
            query_url: query_url(&config.host, config.port),
            config,
        })
    }

    /// Run one InfluxQL statement and return its series
    pub fn query(&self, statement: &str) -> Result<Vec<Series>, QueryError> {
        info!("Running query: {}", statement);

        let response = self
            .client
            .get(&self.query_url)
            .query(&[
                ("u", self.config.username.as_str()),
                ("p", self.config.password.as_str()),
                ("db", self.config.database.as_str()),
                ("q", statement),
            ])
            .send()
            .map_err(QueryError::RequestFailed)?;

        // InfluxDB reports query errors as JSON with a 400 status
        let status = response.status();
        let body = response.text().map_err(QueryError::RequestFailed)?;

        let parsed: Result<QueryResponse, _> = serde_json::from_str(&body);
        match parsed {
            Ok(parsed) if status.is_success() || parsed.error.is_some() => {
                let series = parsed.into_series()?;
                debug!("Query returned {} series", series.len());
                Ok(series)
            }
            Ok(_) => Err(QueryError::InvalidResponse(format!("HTTP {}: {}", status, body))),
            Err(e) if status.is_success() => Err(QueryError::InvalidResponse(e.to_string())),
            Err(_) => Err(QueryError::InvalidResponse(format!("HTTP {}: {}", status, body))),
        }
    }
}

impl TraceSource for InfluxClient {
    fn tag_values(&self, measurement: &str, tag: &str) -> Result<Vec<String>, QueryError> {
        let series = self.query(&query::show_tag_values(measurement, tag))?;
        Ok(series.iter().flat_map(Series::tag_values).collect())
    }

    fn first_sample_time(
        &self,
        measurement: &str,
        selector: &TagSelector,
    ) -> Result<Option<String>, QueryError> {
        let series = self.query(&query::first_sample(measurement, selector))?;
        Ok(series.first().and_then(Series::first_time))
    }

    fn trace_rows(
        &self,
        prefix: &str,
        selector: &TagSelector,
    ) -> Result<Vec<RawSeriesRow>, QueryError> {
        self.query(&query::trace_series(prefix, selector))?
            .into_iter()
            .map(Series::into_trace_row)
            .collect()
    }
}

/// Build the `/query` URL, defaulting to plain HTTP
fn query_url(host: &str, port: u16) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}:{}/query", host, port)
    } else {
        format!("http://{}:{}/query", host, port)
    }
}
