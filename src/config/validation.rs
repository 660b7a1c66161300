use crate::error::AppError;
use std::net::IpAddr;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Service URL cannot be empty and must use http:// or https://
/// - API key cannot be empty
/// - Request IP, if provided, must be a valid IPv4 or IPv6 address
/// - Log file path, if provided, cannot be empty
pub fn validate_config(
    service_url: &str,
    api_key: &str,
    request_ip: &Option<String>,
    log_file_path: &Option<String>,
) -> Result<(), AppError> {
    if service_url.trim().is_empty() {
        return Err(AppError::config_error(
            "service_url cannot be empty. Please configure.",
        ));
    }

    if !service_url.starts_with("http://") && !service_url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "service_url must start with http:// or https://, got '{service_url}'"
        )));
    }

    if api_key.trim().is_empty() {
        return Err(AppError::config_error(
            "api_key cannot be empty. Please configure.",
        ));
    }

    if let Some(ip) = request_ip {
        parse_request_ip(ip)?;
    }

    if let Some(log_path) = log_file_path
        && log_path.is_empty()
    {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    Ok(())
}

/// Parses the address outbound requests are bound to
pub fn parse_request_ip(ip: &str) -> Result<IpAddr, AppError> {
    let trimmed = ip.trim();
    if trimmed.is_empty() {
        return Err(AppError::config_error("IP parameter cannot be empty."));
    }
    trimmed.parse().map_err(|_| {
        AppError::config_error(format!("'{trimmed}' is not a valid IP address"))
    })
}
