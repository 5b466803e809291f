//! Conversion feature slice.
//!
//! Converts feature models between external textual formats (UVL) and the
//! canonical CFM JSON by staging per-request artifacts and delegating the
//! actual transformation to the external `cfmtoolbox` converter.

mod error;
mod format;
mod pipeline;
mod routes;
mod staging;
mod toolbox;

pub use error::ConvertError;
pub use format::FileFormat;
pub use pipeline::{ConvertService, ExportedFile};
pub use routes::{ConvertState, convert_router};
pub use staging::Staging;
pub use toolbox::{CfmToolbox, FormatConverter};

use cfm_domain::config::ApiConfig;

/// Initialize the conversion feature from the process configuration.
pub fn init(config: &ApiConfig) -> ConvertState {
    tracing::info!(
        command = %config.converter.command.display(),
        "Convert slice initialized"
    );

    ConvertState { service: ConvertService::new(&config.converter) }
}
