//! Single-attempt fetch with transport and HTTP status classification

use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::api::http_client::Transport;
use crate::api::urls::redact_api_key;
use crate::constants::ERROR_BODY_SNIPPET_CHARS;
use crate::error::AppError;

/// Fetches the raw body for `url`.
///
/// There is exactly one attempt. A failure before any HTTP response exists
/// becomes [`AppError::Transport`]; any status other than 200 becomes
/// [`AppError::InvalidResponse`] carrying the status and a body snippet.
#[instrument(skip(transport, url), fields(url = %redact_api_key(url)))]
pub fn fetch(
    transport: &dyn Transport,
    url: &str,
    timeout: Duration,
    source: Option<IpAddr>,
) -> Result<String, AppError> {
    info!("Fetching data from URL: {}", redact_api_key(url));

    let response = transport.get(url, timeout, source).map_err(|message| {
        error!("Request failed for URL {}: {}", redact_api_key(url), message);
        AppError::transport_error(message, url)
    })?;

    debug!("Response status: {}", response.status);

    if response.status != 200 {
        let snippet: String = response
            .body
            .chars()
            .take(ERROR_BODY_SNIPPET_CHARS)
            .collect();
        error!(
            "HTTP {} (URL: {}): {}",
            response.status,
            redact_api_key(url),
            snippet
        );
        return Err(AppError::http_status(response.status, snippet, url));
    }

    debug!("Response length: {} bytes", response.body.len());
    Ok(response.body)
}
