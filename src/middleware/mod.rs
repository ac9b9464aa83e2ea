pub mod api_key;
pub mod response;

pub use api_key::{api_key_middleware, check_api_key, API_KEY_HEADER};
pub use response::{ApiResponse, ApiResult};
