//! Application-wide constants and configuration values
//!
//! This module centralizes the fixed values of the vendor protocol and the
//! client defaults so they are not scattered through the pipeline.

/// Timeout for HTTP requests in seconds, applied to both connect and total read
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Vendor endpoint used when no service URL is configured
pub const DEFAULT_SERVICE_URL: &str = "http://football-api.com/api/";

/// Initial value of the remaining-calls counter before the vendor reports one
pub const DEFAULT_REMAINING_API_CALLS: u32 = 1000;

/// Maximum number of response body characters carried in error messages
pub const ERROR_BODY_SNIPPET_CHARS: usize = 200;

/// Vendor response envelope field names
pub mod envelope {
    /// Per-call status field; anything other than `OK` is a failure
    pub const ERROR_FIELD: &str = "ERROR";

    /// Value of the status field on success
    pub const OK_VALUE: &str = "OK";

    /// Remaining quota reported by the vendor
    pub const REQUESTS_REMAINING_FIELD: &str = "APIRequestsRemaining";

    /// Volatile timing field excluded from content hashes
    pub const COMPUTATION_TIME_FIELD: &str = "ComputationTime";

    /// Vendor wording for quota exhaustion
    pub const RATE_LIMIT_MARKER: &str = "To avoid misuse of the service";
}

/// Fields the client appends to decoded responses
pub mod annotations {
    /// Digest of the payload used for change detection
    pub const CONTENT_HASH_FIELD: &str = "contentHash";

    /// Name of the digest algorithm behind `contentHash`
    pub const CONTENT_HASH_ALGORITHM_FIELD: &str = "contentHashAlgorithm";

    /// HTML-escaped request URL
    pub const SOURCE_URL_FIELD: &str = "sourceUrl";

    /// Timestamp added to XML documents before they are cached
    pub const CACHED_FIELD: &str = "cached";

    /// Digest algorithm reported in `contentHashAlgorithm`
    pub const CONTENT_HASH_ALGORITHM: &str = "sha256";

    /// Format of the `cached` timestamp
    pub const CACHED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// Cache sizing
pub mod cache {
    /// Default number of entries held by the in-memory cache
    pub const DEFAULT_MEMORY_CAPACITY: usize = 100;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for service URL override
    pub const SERVICE_URL: &str = "FOOTBALL_API_SERVICE_URL";

    /// Environment variable for API key override
    pub const API_KEY: &str = "FOOTBALL_API_KEY";

    /// Environment variable for output type override
    pub const OUTPUT_TYPE: &str = "FOOTBALL_API_OUTPUT_TYPE";

    /// Environment variable for the source address override
    pub const REQUEST_IP: &str = "FOOTBALL_API_REQUEST_IP";

    /// Environment variable for cache TTL override in seconds
    pub const CACHE_TIME: &str = "FOOTBALL_API_CACHE_TIME";

    /// Environment variable for content hash generation (`true`/`false`)
    pub const GENERATE_HASH: &str = "FOOTBALL_API_GENERATE_HASH";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "FOOTBALL_API_LOG_FILE";
}
