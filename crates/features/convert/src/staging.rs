use crate::error::ConvertError;
use cfm_kernel::safe_nanoid;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::warn;

/// A request-scoped staging directory for converter artifacts.
///
/// Every conversion gets its own directory whose name carries a nanoid, so
/// concurrent requests can never collide. The [`TempDir`] inside acts as a
/// drop guard: whichever way the request ends (success, converter failure,
/// client disconnect cancelling the handler), the directory and both
/// artifacts are removed. [`Staging::close`] removes it eagerly and logs a
/// failed removal instead of propagating it.
#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

impl Staging {
    /// Creates a fresh staging directory under `root` (OS temp dir when
    /// `None`) with input/output artifact paths carrying the given
    /// extensions.
    pub fn create(
        root: Option<&Path>,
        input_ext: &str,
        output_ext: &str,
    ) -> Result<Self, ConvertError> {
        let root = root.map_or_else(std::env::temp_dir, Path::to_path_buf);
        std::fs::create_dir_all(&root)
            .map_err(ConvertError::staging("creating the staging root"))?;

        let dir = tempfile::Builder::new()
            .prefix(&format!("cfm-{}-", safe_nanoid!()))
            .tempdir_in(&root)
            .map_err(ConvertError::staging("creating the staging directory"))?;

        let input = dir.path().join(format!("model.{input_ext}"));
        let output = dir.path().join(format!("model.{output_ext}"));

        Ok(Self { dir, input, output })
    }

    #[must_use]
    pub fn input_path(&self) -> &Path {
        &self.input
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Removes the staging directory and everything in it.
    ///
    /// Removal failures are logged, not returned: cleanup must never
    /// override the conversion's own outcome.
    pub fn close(self) {
        let path = self.dir.path().display().to_string();
        if let Err(source) = self.dir.close() {
            warn!(%source, path, "failed to remove staging directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifacts_live_in_a_unique_directory() {
        let root = tempfile::tempdir().expect("test root");
        let a = Staging::create(Some(root.path()), "uvl", "json").expect("staging a");
        let b = Staging::create(Some(root.path()), "uvl", "json").expect("staging b");

        assert_ne!(a.input_path(), b.input_path());
        assert!(a.input_path().ends_with("model.uvl"));
        assert!(a.output_path().ends_with("model.json"));

        a.close();
        b.close();
        let remaining = std::fs::read_dir(root.path()).expect("read root").count();
        assert_eq!(remaining, 0, "close must remove the staging directories");
    }

    #[test]
    fn drop_removes_the_directory() {
        let root = tempfile::tempdir().expect("test root");
        {
            let staging = Staging::create(Some(root.path()), "json", "uvl").expect("staging");
            std::fs::write(staging.input_path(), b"{}").expect("write artifact");
        }
        let remaining = std::fs::read_dir(root.path()).expect("read root").count();
        assert_eq!(remaining, 0, "drop guard must remove the staging directory");
    }
}
