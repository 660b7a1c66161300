//! URL building utilities for API endpoints

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::AppError;
use crate::models::{OutputFormat, RequestParams};

/// Characters left untouched by RFC 3986 percent-encoding; space becomes `%20`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds the request URL for a vendor action.
///
/// The fixed `Action`, `APIKey` and `OutputType` fields come first, followed by
/// every parameter group in the order supplied. Keys are lower-cased and values
/// percent-encoded. The result doubles as the cache key, so the same inputs
/// always produce the same string.
///
/// # Example
/// ```
/// use football_api::api::build_url;
/// use football_api::models::{OutputFormat, ParamGroup, RequestParams};
///
/// let params = RequestParams::from(ParamGroup::new().with("Comp_Id", "1204"));
/// let url = build_url("http://football-api.com/api/", "key", OutputFormat::Array, "standings", &params).unwrap();
/// assert_eq!(url, "http://football-api.com/api/?Action=standings&APIKey=key&OutputType=JSON&comp_id=1204");
/// ```
pub fn build_url(
    service_url: &str,
    api_key: &str,
    output_format: OutputFormat,
    action: &str,
    params: &RequestParams,
) -> Result<String, AppError> {
    if action.trim().is_empty() {
        return Err(AppError::invalid_parameter("Action name cannot be empty"));
    }

    let mut url = format!(
        "{service_url}?Action={}&APIKey={}&OutputType={}",
        encode_value(action),
        encode_value(api_key),
        output_format.wire_name()
    );

    for (index, group) in params.groups().iter().enumerate() {
        for (key, value) in group.iter() {
            if key.is_empty() {
                return Err(AppError::invalid_parameter(format!(
                    "Parameter group {index} contains an empty parameter name"
                )));
            }
            url.push('&');
            url.push_str(&encode_value(&key.to_lowercase()));
            url.push('=');
            url.push_str(&encode_value(value));
        }
    }

    Ok(url)
}

/// Percent-encodes a single query value
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Escapes a URL for embedding in markup, as attached in `sourceUrl`
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Replaces the `APIKey` value for log output. Error values keep the full URL.
pub fn redact_api_key(url: &str) -> String {
    const MARKER: &str = "APIKey=";
    match url.find(MARKER) {
        Some(start) => {
            let value_start = start + MARKER.len();
            let value_end = url[value_start..]
                .find('&')
                .map_or(url.len(), |offset| value_start + offset);
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}
