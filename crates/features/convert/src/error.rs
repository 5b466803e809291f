use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cfm_domain::model::ModelError;
use std::borrow::Cow;
use tracing::{error, warn};

/// A specialized error enum for the conversion slice.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The requested format identifier is not in the registry.
    #[error("unsupported file type `{format}`")]
    UnsupportedFormat { format: String },

    /// The external converter exited non-zero or timed out; carries the
    /// captured diagnostic text verbatim.
    #[error("conversion failed: {diagnostic}")]
    Conversion { diagnostic: String },

    /// A client-submitted model violates a structural rule of the
    /// canonical format.
    #[error("malformed feature model: {0}")]
    Malformed(#[from] ModelError),

    /// The converter reported success but its output did not decode into
    /// a well-formed model. A fault on our side of the boundary, never
    /// the client's.
    #[error("converter produced an invalid model: {message}")]
    InvalidOutput { message: String },

    /// A validated model failed to encode to canonical JSON.
    #[error("feature model JSON error: {0}")]
    Codec(#[from] serde_json::Error),

    /// A temporary artifact could not be written, read, or removed.
    /// Logged distinctly from conversion failures; never retried.
    #[error("staging I/O failure while {context}: {source}")]
    Staging { source: std::io::Error, context: Cow<'static, str> },
}

impl ConvertError {
    pub(crate) fn staging(context: impl Into<Cow<'static, str>>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| Self::Staging { source, context }
    }
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        match self {
            Self::UnsupportedFormat { format } => {
                warn!(format, "rejected unsupported conversion format");
                (StatusCode::UNPROCESSABLE_ENTITY, "Unsupported file type").into_response()
            }
            Self::Malformed(err) => {
                warn!(%err, "rejected malformed feature model");
                (StatusCode::UNPROCESSABLE_ENTITY, format!("Malformed feature model: {err}"))
                    .into_response()
            }
            Self::InvalidOutput { message } => {
                error!(message, "converter output did not decode");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Error during conversion: {message}"))
                    .into_response()
            }
            Self::Codec(err) => {
                error!(%err, "feature model JSON did not encode");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error during conversion").into_response()
            }
            Self::Conversion { diagnostic } => {
                error!(diagnostic, "external converter failed");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Error during conversion: {diagnostic}"))
                    .into_response()
            }
            // Internal paths stay in the logs; the client gets a generic message.
            Self::Staging { source, context } => {
                error!(%source, %context, "staging I/O failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error during conversion").into_response()
            }
        }
    }
}
