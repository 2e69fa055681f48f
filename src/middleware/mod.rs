pub mod jwt_auth;
pub mod logging;
pub mod rate_limit;
pub mod service_key;

pub use jwt_auth::{jwt_auth_middleware, UserIdentity};
pub use logging::logging_middleware;
pub use rate_limit::create_rate_limiter;
pub use service_key::service_key_middleware;
