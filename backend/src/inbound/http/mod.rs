//! HTTP inbound adapter exposing the admin REST endpoints.

pub mod docs;
pub mod error;
pub mod home;
pub mod response;
pub mod state;
pub mod users;

pub use error::{ApiError, ApiResult};
pub use state::HttpState;
