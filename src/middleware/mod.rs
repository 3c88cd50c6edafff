pub mod auth;
pub mod request_tracking;

pub use auth::{AdminUser, CurrentUser, JwtService, SuperAdminUser, auth_middleware};
pub use request_tracking::{REQUEST_ID_HEADER, request_tracking_middleware};
