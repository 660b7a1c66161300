pub mod decoder;
pub mod fetch_utils;
pub mod hashing;
pub mod http_client;
pub mod urls;
mod core;

// Re-export URL utilities
pub use urls::*;
// Re-export transport types
pub use http_client::{HttpTransport, Transport, TransportResponse};
// Re-export the client façade
pub use core::*;
pub use decoder::decode_response;
pub use fetch_utils::fetch;
