use axum::extract::FromRef;
use cfm_domain::config::ApiConfig;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ApiStateError {
    #[error("State validation error: {message}")]
    Validation { message: &'static str },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
}

/// Shared, clone-cheap state attached to the server router.
///
/// Feature slices keep their own state; this carries only what every route
/// needs (the process-wide configuration built once at startup).
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self
            .config
            .ok_or(ApiStateError::Validation { message: "ApiConfig not provided" })?;

        Ok(ApiState { inner: Arc::new(ApiStateInner { config }) })
    }
}
