pub mod auth;
pub mod response;
pub mod trigger;

pub use auth::{jwt_auth_middleware, Actor};
pub use response::{ApiResponse, ApiResult};
pub use trigger::trigger_auth_middleware;
