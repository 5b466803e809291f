//! Convenience re-exports for server crates.

pub use crate::config::{ConfigError, load_config};
pub use crate::safe_nanoid;
pub use crate::server::{ApiState, ApiStateBuilder, ApiStateError};
pub use cfm_domain::config::ApiConfig;
