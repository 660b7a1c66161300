pub mod output_format;
pub mod params;
pub mod response;

pub use output_format::OutputFormat;
pub use params::{ParamGroup, RequestParams};
pub use response::{ApiResponse, XmlDocument};
