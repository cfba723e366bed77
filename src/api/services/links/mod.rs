//! JSON API for link management

pub mod error_code;
pub mod handlers;
pub mod helpers;
pub mod routes;
pub mod types;

pub use error_code::ErrorCode;
pub use helpers::ShortUrlBase;
pub use routes::{api_routes, links_routes};
pub use types::{ApiResponse, LinkCreatedResponse, LinkResponse, PostNewLink, PutLink};
