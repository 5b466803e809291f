//! Shared Axum server plumbing: state, system routes, health check.

mod health;
mod router;
mod state;

pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
