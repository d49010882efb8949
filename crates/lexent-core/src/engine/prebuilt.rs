//! Prebuilt binding: resolve a distributed engine artifact, then load it.
//!
//! Resolution order:
//! 1. `LEXENT_ENGINE_PATH` environment variable (taken as-is)
//! 2. `<dist_dir>/<os>-<arch>/<artifact>` when a dist dir is given
//! 3. the same layout under the user data dir (`<data_dir>/lexent/engine`)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::library::{artifact_file_name, EngineLibrary};
use super::{EngineBinding, EngineHandle};
use crate::error::Error;
use crate::kind::Kind;
use crate::output::Match;

/// Resolves a prebuilt engine artifact before loading it.
///
/// Identical contract to [`super::DirectBinding`]; only the way the artifact
/// path is obtained differs.
#[derive(Debug)]
pub struct PrebuiltBinding {
    library: Arc<EngineLibrary>,
}

impl PrebuiltBinding {
    /// Resolve and load from the default locations.
    pub fn new() -> Result<Self, Error> {
        Self::load_resolved(resolve(None)?)
    }

    /// Resolve and load from an explicit dist directory.
    pub fn with_dist_dir(dist_dir: impl Into<PathBuf>) -> Result<Self, Error> {
        Self::load_resolved(resolve(Some(dist_dir.into()))?)
    }

    fn load_resolved(path: PathBuf) -> Result<Self, Error> {
        debug!(path = %path.display(), "resolved prebuilt engine artifact");
        Ok(Self {
            library: EngineLibrary::load(&path)?,
        })
    }

    /// Path of the loaded artifact.
    pub fn artifact_path(&self) -> &Path {
        self.library.path()
    }
}

impl EngineBinding for PrebuiltBinding {
    type Handle = EngineHandle;

    fn create_handle(&self, language: &str) -> Result<EngineHandle, Error> {
        self.library.create_handle(language)
    }

    fn run_parse(
        &self,
        handle: &EngineHandle,
        query: &str,
        kinds: &[Kind],
    ) -> Result<Vec<Match>, Error> {
        self.library.run_parse(handle, query, kinds)
    }
}

/// Resolve the platform-specific artifact path without loading it.
///
/// An explicit `LEXENT_ENGINE_PATH` wins and is returned unchecked (loading
/// reports its own failure); dist-layout candidates must exist on disk.
pub fn resolve(dist_dir: Option<PathBuf>) -> Result<PathBuf, Error> {
    if let Ok(path) = std::env::var("LEXENT_ENGINE_PATH") {
        return Ok(PathBuf::from(path));
    }

    let root = match dist_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .ok_or_else(|| {
                Error::EngineUnavailable(
                    "no user data directory to resolve the engine artifact from".to_string(),
                )
            })?
            .join("lexent")
            .join("engine"),
    };

    let candidate = root.join(platform_tag()).join(artifact_file_name());
    if candidate.exists() {
        Ok(candidate)
    } else {
        Err(Error::EngineUnavailable(format!(
            "no prebuilt engine artifact at {}",
            candidate.display()
        )))
    }
}

/// Platform tag used in the dist layout, e.g. `linux-x86_64`.
pub fn platform_tag() -> String {
    format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_finds_dist_layout() {
        let dist = tempfile::tempdir().unwrap();
        let platform_dir = dist.path().join(platform_tag());
        std::fs::create_dir_all(&platform_dir).unwrap();
        let artifact = platform_dir.join(artifact_file_name());
        std::fs::write(&artifact, b"stub").unwrap();

        let resolved = resolve(Some(dist.path().to_path_buf())).unwrap();
        assert_eq!(resolved, artifact);
    }

    #[test]
    fn test_resolve_empty_dist_is_unavailable() {
        let dist = tempfile::tempdir().unwrap();
        let err = resolve(Some(dist.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, Error::EngineUnavailable(_)));
    }

    #[test]
    fn test_resolved_stub_fails_to_load() {
        // Resolution only finds the file; loading it is where a bogus
        // artifact surfaces as unavailable.
        let dist = tempfile::tempdir().unwrap();
        let platform_dir = dist.path().join(platform_tag());
        std::fs::create_dir_all(&platform_dir).unwrap();
        std::fs::write(platform_dir.join(artifact_file_name()), b"stub").unwrap();

        let err = PrebuiltBinding::with_dist_dir(dist.path()).unwrap_err();
        assert!(matches!(err, Error::EngineUnavailable(_)));
    }
}
