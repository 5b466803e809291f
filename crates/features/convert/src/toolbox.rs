use crate::error::ConvertError;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// The conversion capability: turn the artifact at `import` into the
/// artifact at `export`.
///
/// Production code talks to the external `cfmtoolbox` binary via
/// [`CfmToolbox`]; tests substitute deterministic stubs. Invocations are
/// never retried.
pub trait FormatConverter: Send + Sync + std::fmt::Debug {
    fn convert<'a>(
        &'a self,
        import: &'a Path,
        export: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<(), ConvertError>> + Send + 'a>>;
}

/// Invokes the `cfmtoolbox` command line tool to convert files.
///
/// The tool reports failure through a non-zero exit status and diagnostic
/// text on stderr; a run exceeding the timeout is killed and treated the
/// same as a failed run.
#[derive(Debug, Clone)]
pub struct CfmToolbox {
    command: PathBuf,
    timeout: Duration,
}

impl CfmToolbox {
    #[must_use]
    pub fn new(command: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self { command: command.into(), timeout }
    }

    async fn run(&self, import: &Path, export: &Path) -> Result<(), ConvertError> {
        debug!(command = %self.command.display(), import = %import.display(), "invoking converter");

        let mut command = Command::new(&self.command);
        command
            .arg("--import")
            .arg(import)
            .arg("--export")
            .arg(export)
            .arg("convert")
            .kill_on_drop(true);

        let invocation = command.output();

        let output = tokio::time::timeout(self.timeout, invocation)
            .await
            .map_err(|_| ConvertError::Conversion {
                diagnostic: format!("converter timed out after {:?}", self.timeout),
            })?
            .map_err(ConvertError::staging("spawning the external converter"))?;

        if !output.status.success() {
            return Err(ConvertError::Conversion {
                diagnostic: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}

impl FormatConverter for CfmToolbox {
    fn convert<'a>(
        &'a self,
        import: &'a Path,
        export: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<(), ConvertError>> + Send + 'a>> {
        Box::pin(self.run(import, export))
    }
}
