//! HTTP surface: route handlers, input validation, query translation,
//! the shared-secret access gate, and error-to-status mapping.

pub mod auth;
pub mod errors;
pub mod items;
pub mod meta;
pub mod products;
pub mod query;
pub mod server;
pub mod validate;

pub use errors::{ApiError, ApiResult};
pub use query::ListQuery;
pub use server::{build_router, AppState};
