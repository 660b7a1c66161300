//! football-api.com client library
//!
//! Builds request URLs for vendor actions, performs the HTTP call, decodes the
//! response into the configured output format, validates the vendor's `ERROR`
//! envelope and optionally caches results and attaches change-detection hashes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use football_api::{Client, ClientConfig, MemoryCache, OutputFormat, ParamGroup, RequestParams};
//! use football_api::error::AppError;
//!
//! fn main() -> Result<(), AppError> {
//!     let config = ClientConfig {
//!         output_type: OutputFormat::Array,
//!         cache_time: 300,
//!         generate_hash: true,
//!         ..ClientConfig::new("your-api-key")
//!     };
//!
//!     let mut client = Client::builder(config)
//!         .cache(Arc::new(MemoryCache::default()))
//!         .build()?;
//!
//!     let params = RequestParams::from(ParamGroup::new().with("comp_id", "1204"));
//!     let standings = client.call("standings", &params)?;
//!
//!     println!("{}", standings.to_display_string());
//!     println!("Calls remaining: {}", client.get_remaining_api_calls());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use api::{Client, ClientBuilder, HttpTransport, Transport, TransportResponse};
pub use cache::{CacheStore, MemoryCache};
pub use config::ClientConfig;
pub use error::AppError;
pub use models::{ApiResponse, OutputFormat, ParamGroup, RequestParams, XmlDocument};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
