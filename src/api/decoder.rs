//! Response decoding and envelope validation

use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::api::hashing::{hash_json_payload, hash_xml_payload};
use crate::api::urls::{escape_html, redact_api_key};
use crate::constants::{annotations, envelope};
use crate::error::AppError;
use crate::models::{ApiResponse, OutputFormat, XmlDocument};

/// Decodes a raw response body according to the configured output format.
///
/// XML, ARRAY and OBJECT responses are parsed and their `ERROR` envelope field is
/// checked before anything else is read. When `generate_hash` is set, the
/// decoded result gets `contentHash`, `contentHashAlgorithm` and `sourceUrl`
/// fields. The pass-through formats (JSON, LINE, CONSOLE, VAR) come back as the
/// body text, unvalidated.
#[instrument(skip(body, url), fields(url = %redact_api_key(url), format = %output_format))]
pub fn decode_response(
    body: &str,
    output_format: OutputFormat,
    generate_hash: bool,
    url: &str,
) -> Result<ApiResponse, AppError> {
    match output_format {
        OutputFormat::Xml => decode_xml(body, generate_hash, url),
        OutputFormat::Array | OutputFormat::Object => {
            decode_json(body, output_format, generate_hash, url)
        }
        OutputFormat::Json | OutputFormat::Line | OutputFormat::Console | OutputFormat::Var => {
            debug!("Returning {} bytes of undecoded body", body.len());
            Ok(ApiResponse::Raw(body.to_string()))
        }
    }
}

fn decode_xml(body: &str, generate_hash: bool, url: &str) -> Result<ApiResponse, AppError> {
    let mut doc = XmlDocument::parse(body).map_err(|e| {
        error!("Failed to parse XML response: {e}");
        AppError::invalid_response(format!("Invalid XML: {e}"), url)
    })?;

    // Quota exhaustion can arrive as bare root text with no ERROR child
    let error_field = doc.child_text(envelope::ERROR_FIELD).or_else(|| {
        doc.root()
            .get_text()
            .map(|text| text.into_owned())
            .filter(|text| text.contains(envelope::RATE_LIMIT_MARKER))
    });
    check_envelope(error_field, url)?;

    if generate_hash {
        let hash = hash_xml_payload(&doc).map_err(|e| {
            AppError::invalid_response(format!("Failed to serialize XML for hashing: {e}"), url)
        })?;
        doc.append_child(annotations::CONTENT_HASH_FIELD, hash);
        doc.append_child(
            annotations::CONTENT_HASH_ALGORITHM_FIELD,
            annotations::CONTENT_HASH_ALGORITHM,
        );
        doc.append_child(annotations::SOURCE_URL_FIELD, escape_html(url));
    }

    Ok(ApiResponse::Xml(doc))
}

fn decode_json(
    body: &str,
    output_format: OutputFormat,
    generate_hash: bool,
    url: &str,
) -> Result<ApiResponse, AppError> {
    let raw: Value = serde_json::from_str(body).map_err(|e| {
        error!(
            "Failed to parse JSON response: {e}. Body (first 200 chars): {}",
            body.chars().take(200).collect::<String>()
        );
        AppError::invalid_response(format!("Invalid JSON: {e}"), url)
    })?;

    if raw.is_null() {
        return Err(AppError::invalid_response("Response decoded to null", url));
    }
    let Value::Object(map) = &raw else {
        return Err(AppError::invalid_response(
            "Response is not a JSON object",
            url,
        ));
    };

    check_envelope(
        map.get(envelope::ERROR_FIELD).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
        url,
    )?;

    // Digest is taken over the raw payload; annotations go on the decoded shape
    let hash = if generate_hash {
        Some(hash_json_payload(&raw).map_err(|e| {
            AppError::invalid_response(format!("Failed to canonicalize JSON for hashing: {e}"), url)
        })?)
    } else {
        None
    };

    let mut decoded = match output_format {
        OutputFormat::Array => ApiResponse::Mapping(map.clone()),
        _ => ApiResponse::Object(raw),
    };

    if let Some(hash) = hash {
        decoded.annotate(annotations::CONTENT_HASH_FIELD, hash);
        decoded.annotate(
            annotations::CONTENT_HASH_ALGORITHM_FIELD,
            annotations::CONTENT_HASH_ALGORITHM,
        );
        decoded.annotate(annotations::SOURCE_URL_FIELD, escape_html(url));
    }

    Ok(decoded)
}

/// Accepts an envelope whose `ERROR` field, trimmed, equals `OK`.
///
/// Quota exhaustion is reported by the vendor as an error text containing
/// "To avoid misuse of the service" and maps to [`AppError::RateLimit`].
pub fn check_envelope(error_field: Option<String>, url: &str) -> Result<(), AppError> {
    match error_field {
        Some(text) if text.trim() == envelope::OK_VALUE => Ok(()),
        Some(text) if text.contains(envelope::RATE_LIMIT_MARKER) => {
            warn!("Vendor reported quota exhaustion: {}", text.trim());
            Err(AppError::rate_limit(text.trim(), url))
        }
        Some(text) => {
            warn!("Vendor reported error: {}", text.trim());
            Err(AppError::general_error(text.trim(), url))
        }
        None => Err(AppError::general_error(
            "Response does not contain an ERROR field",
            url,
        )),
    }
}
