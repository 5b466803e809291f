use crate::error::ConvertError;
use crate::format::FileFormat;
use crate::staging::Staging;
use crate::toolbox::{CfmToolbox, FormatConverter};
use cfm_domain::config::ConverterConfig;
use cfm_domain::model::CfmModel;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Extension used for staged canonical-JSON artifacts.
const JSON_EXT: &str = "json";

/// A converted artifact ready to be served as a download.
#[derive(Debug)]
pub struct ExportedFile {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Orchestrates one conversion per call: stage, invoke, interpret, clean up.
///
/// Holds no per-request state; every call stages into its own [`Staging`]
/// scope and removes it before returning.
#[derive(Debug, Clone)]
pub struct ConvertService {
    converter: Arc<dyn FormatConverter>,
    staging_root: Option<PathBuf>,
}

impl ConvertService {
    /// Production service backed by the configured `cfmtoolbox` binary.
    #[must_use]
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            converter: Arc::new(CfmToolbox::new(&config.command, config.timeout())),
            staging_root: config.staging_dir.clone(),
        }
    }

    /// Service with an injected converter (used by tests).
    #[must_use]
    pub fn with_converter(
        converter: Arc<dyn FormatConverter>,
        staging_root: Option<PathBuf>,
    ) -> Self {
        Self { converter, staging_root }
    }

    /// Text → JSON: stages the raw payload, converts it, and decodes the
    /// canonical output into a validated model.
    pub async fn import(&self, format: FileFormat, payload: &[u8]) -> Result<CfmModel, ConvertError> {
        let staging =
            Staging::create(self.staging_root.as_deref(), format.extension(), JSON_EXT)?;

        let result = self.run_import(&staging, payload).await;
        staging.close();

        if result.is_ok() {
            info!(format = format.extension(), "imported feature model");
        }
        result
    }

    async fn run_import(&self, staging: &Staging, payload: &[u8]) -> Result<CfmModel, ConvertError> {
        tokio::fs::write(staging.input_path(), payload)
            .await
            .map_err(ConvertError::staging("writing the staged input"))?;

        self.converter.convert(staging.input_path(), staging.output_path()).await?;

        let content = tokio::fs::read(staging.output_path())
            .await
            .map_err(ConvertError::staging("reading the converter output"))?;

        let model: CfmModel = serde_json::from_slice(&content)
            .map_err(|err| ConvertError::InvalidOutput { message: err.to_string() })?;
        model
            .validate()
            .map_err(|err| ConvertError::InvalidOutput { message: err.to_string() })?;

        Ok(model)
    }

    /// JSON → text: validates and stages the model, converts it, and reads
    /// the produced artifact back for download.
    pub async fn export(
        &self,
        format: FileFormat,
        model: &CfmModel,
    ) -> Result<ExportedFile, ConvertError> {
        model.validate()?;

        let staging =
            Staging::create(self.staging_root.as_deref(), JSON_EXT, format.extension())?;

        let result = self.run_export(&staging, format, model).await;
        staging.close();

        if result.is_ok() {
            info!(format = format.extension(), "exported feature model");
        }
        result
    }

    async fn run_export(
        &self,
        staging: &Staging,
        format: FileFormat,
        model: &CfmModel,
    ) -> Result<ExportedFile, ConvertError> {
        let encoded = serde_json::to_vec(model)?;
        tokio::fs::write(staging.input_path(), encoded)
            .await
            .map_err(ConvertError::staging("writing the staged input"))?;

        self.converter.convert(staging.input_path(), staging.output_path()).await?;

        let content = tokio::fs::read(staging.output_path())
            .await
            .map_err(ConvertError::staging("reading the converter output"))?;

        Ok(ExportedFile {
            filename: format!("feature-model.{}", format.extension()),
            content,
        })
    }
}
