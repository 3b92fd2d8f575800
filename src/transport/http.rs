//! Blocking HTTP runner.
//!
//! Dispatches [`Request`]s with `reqwest`'s blocking client. Any timeout is
//! configured on the client; the executor never enforces one.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

use super::{DispatchError, Request, Response, Runner};

/// Runner backed by a configured `reqwest` blocking client.
#[derive(Debug, Clone)]
pub struct HttpRunner {
    client: Client,
    timeout: Duration,
}

impl HttpRunner {
    /// Create a runner with the default 30-second timeout.
    pub fn new() -> Result<Self, DispatchError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a runner with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DispatchError> {
        Self::with_default_headers(timeout, std::iter::empty::<(&str, &str)>())
    }

    /// Create a runner that sends `headers` with every request.
    ///
    /// A header set on an individual [`Request`] replaces the default of
    /// the same name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if a header name or value is not valid HTTP.
    pub fn with_default_headers<I, K, V>(
        timeout: Duration,
        headers: I,
    ) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut defaults = HeaderMap::new();
        for (name, value) in headers {
            let (name, value) = (name.as_ref(), value.as_ref());
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                DispatchError::InvalidRequest {
                    message: format!("invalid header name '{}': {}", name, e),
                }
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                DispatchError::InvalidRequest {
                    message: format!("invalid value for header '{}': {}", name, e),
                }
            })?;
            defaults.append(header_name, header_value);
        }

        let client = Client::builder()
            .user_agent(concat!("behaviours/", env!("CARGO_PKG_VERSION")))
            .default_headers(defaults)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }

    /// Wrap an existing client.
    pub fn from_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Runner for HttpRunner {
    fn dispatch(&self, request: Request) -> Result<Response, DispatchError> {
        tracing::debug!("{} {}", request.method, request.url);
        let response = send(&self.client, request)?;
        tracing::debug!("-> {}", response.status);
        Ok(response)
    }
}

impl Runner for Client {
    fn dispatch(&self, request: Request) -> Result<Response, DispatchError> {
        send(self, request)
    }
}

fn send(client: &Client, request: Request) -> Result<Response, DispatchError> {
    let url = Url::parse(&request.url).map_err(|e| DispatchError::InvalidRequest {
        message: format!("invalid URL '{}': {}", request.url, e),
    })?;

    let mut builder = client.request(request.method, url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder.send()?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response.text()?;

    Ok(Response {
        status,
        headers,
        body,
    })
}
