//! The client façade: one entry point for every vendor action

use chrono::Local;
use serde_json::Value;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::api::decoder::decode_response;
use crate::api::fetch_utils::fetch;
use crate::api::http_client::{HttpTransport, Transport};
use crate::api::urls::{build_url, redact_api_key};
use crate::cache::{CacheGateway, CacheStore};
use crate::config::ClientConfig;
use crate::config::validation::parse_request_ip;
use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_REMAINING_API_CALLS, annotations};
use crate::error::AppError;
use crate::models::{ApiResponse, RequestParams};

/// Builder for [`Client`], used to inject the transport and cache store.
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<dyn CacheStore>>,
}

impl ClientBuilder {
    /// Replaces the default reqwest transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Enables caching through `store`. Writes also need `cache_time > 0`.
    pub fn cache(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(store);
        self
    }

    /// Validates the configuration and builds the client. No request is made.
    pub fn build(self) -> Result<Client, AppError> {
        self.config.validate()?;
        let source = self.config.source_address()?;
        let cache = CacheGateway::new(self.cache, self.config.cache_time);

        debug!(
            "Client configured: service_url={}, output_type={}, cache={}, cache_time={}s, generate_hash={}",
            self.config.service_url,
            self.config.output_type,
            cache.is_enabled(),
            self.config.cache_time,
            self.config.generate_hash
        );

        Ok(Client {
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(HttpTransport::new())),
            config: self.config,
            source,
            cache,
            remaining_api_calls: DEFAULT_REMAINING_API_CALLS,
        })
    }
}

/// Client for the football-api.com service.
///
/// Every vendor action goes through [`Client::call`]: build the URL, consult the
/// cache, fetch on a miss, decode and validate, store, return.
///
/// The remaining-calls counter is plain state on the instance. Calls take
/// `&mut self`; sharing a client between threads needs an external lock.
pub struct Client {
    config: ClientConfig,
    source: Option<IpAddr>,
    transport: Arc<dyn Transport>,
    cache: CacheGateway,
    remaining_api_calls: u32,
}

impl Client {
    /// Creates a client with the reqwest transport and no cache
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            transport: None,
            cache: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Remaining quota as last reported by the vendor (1000 until the first report)
    pub fn get_remaining_api_calls(&self) -> u32 {
        self.remaining_api_calls
    }

    /// Local address subsequent requests are bound to
    pub fn request_source(&self) -> Option<IpAddr> {
        self.source
    }

    /// Binds subsequent requests to a different local address
    pub fn set_request_source_interface(&mut self, ip: &str) -> Result<(), AppError> {
        let address = parse_request_ip(ip)?;
        info!("Binding requests to source address {address}");
        self.source = Some(address);
        self.config.request_ip = Some(address.to_string());
        Ok(())
    }

    /// Full request URL for an action, which is also its cache key
    pub fn build_url(&self, action: &str, params: &RequestParams) -> Result<String, AppError> {
        build_url(
            &self.config.service_url,
            &self.config.api_key,
            self.config.output_type,
            action,
            params,
        )
    }

    /// Executes a vendor action.
    ///
    /// # Errors
    /// * `AppError::InvalidParameter` - empty action or parameter name
    /// * `AppError::Transport` - no HTTP response was obtained
    /// * `AppError::InvalidResponse` - non-200 status or undecodable body
    /// * `AppError::General` / `AppError::RateLimit` - the envelope did not report OK
    /// * `AppError::Cache` - the store refused to keep the decoded result
    #[instrument(skip_all, fields(action = %action))]
    pub fn call(&mut self, action: &str, params: &RequestParams) -> Result<ApiResponse, AppError> {
        let url = self.build_url(action, params)?;
        info!("Calling {action}: {}", redact_api_key(&url));

        if let Some(cached) = self.cache.try_get(&url) {
            info!("Returning cached response for {action}");
            return Ok(cached);
        }

        let body = fetch(
            self.transport.as_ref(),
            &url,
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECONDS),
            self.source,
        )?;

        let mut decoded = decode_response(
            &body,
            self.config.output_type,
            self.config.generate_hash,
            &url,
        )?;

        if let Some(remaining) = decoded.requests_remaining() {
            debug!("Vendor reports {remaining} requests remaining");
            self.remaining_api_calls = remaining;
        }

        if self.cache.writes_enabled() {
            if let ApiResponse::Xml(doc) = &mut decoded {
                doc.append_child(
                    annotations::CACHED_FIELD,
                    Local::now()
                        .format(annotations::CACHED_TIMESTAMP_FORMAT)
                        .to_string(),
                );
            }
            self.cache.store(&url, &decoded)?;
        }

        Ok(decoded)
    }

    /// Executes a vendor action with dynamically shaped parameter groups.
    ///
    /// Each element of `groups` must be a JSON object of scalar values; anything
    /// else fails with `AppError::InvalidParameter` before a request is made.
    pub fn call_with_groups(
        &mut self,
        action: &str,
        groups: &[Value],
    ) -> Result<ApiResponse, AppError> {
        let params = RequestParams::from_json(groups)?;
        self.call(action, &params)
    }
}
