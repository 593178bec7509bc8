//! TableTalk HTTP presentation layer
//!
//! REST API for bookings, weather advice and the ML service proxies,
//! plus the static voice frontend.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use routes::{create_app, create_router};
pub use state::AppState;
