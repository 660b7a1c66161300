//! HTTP transport: the pluggable GET interface and its reqwest implementation

use reqwest::blocking::Client;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Status and body returned by a completed GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues a single blocking GET.
///
/// Implementations return `Err` with the transport's error text when no HTTP
/// response was obtained (DNS failure, refused connection, timeout). Any
/// response that did arrive, whatever its status, is returned as `Ok`.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        timeout: Duration,
        source: Option<IpAddr>,
    ) -> Result<TransportResponse, String>;
}

/// Creates a blocking HTTP client with the given timeout applied to both the
/// connect phase and the whole request, optionally bound to a local address.
pub fn create_http_client_with_timeout(
    timeout: Duration,
    source: Option<IpAddr>,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .local_address(source)
        .build()
}

struct BoundClient {
    source: Option<IpAddr>,
    timeout: Duration,
    client: Client,
}

/// Production transport on `reqwest::blocking`.
///
/// The client is kept between calls and rebuilt only when the source address
/// or timeout changes.
#[derive(Default)]
pub struct HttpTransport {
    cached: Mutex<Option<BoundClient>>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn client_for(&self, timeout: Duration, source: Option<IpAddr>) -> Result<Client, String> {
        let mut guard = self
            .cached
            .lock()
            .map_err(|_| "HTTP client lock poisoned".to_string())?;

        if let Some(bound) = guard.as_ref()
            && bound.source == source
            && bound.timeout == timeout
        {
            return Ok(bound.client.clone());
        }

        debug!("Building HTTP client: timeout={timeout:?}, source={source:?}");
        let client = create_http_client_with_timeout(timeout, source).map_err(|e| e.to_string())?;
        *guard = Some(BoundClient {
            source,
            timeout,
            client: client.clone(),
        });
        Ok(client)
    }
}

impl Transport for HttpTransport {
    fn get(
        &self,
        url: &str,
        timeout: Duration,
        source: Option<IpAddr>,
    ) -> Result<TransportResponse, String> {
        let client = self.client_for(timeout, source)?;
        let response = client.get(url).send().map_err(describe_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(describe_reqwest_error)?;
        Ok(TransportResponse { status, body })
    }
}

fn describe_reqwest_error(e: reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Operation timed out: {e}")
    } else if e.is_connect() {
        format!("Failed to connect: {e}")
    } else {
        e.to_string()
    }
}
