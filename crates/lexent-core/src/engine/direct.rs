//! Direct binding: load the engine artifact a local build produced.

use std::path::Path;
use std::sync::Arc;

use super::library::{artifact_file_name, EngineLibrary};
use super::{EngineBinding, EngineHandle};
use crate::error::Error;
use crate::kind::Kind;
use crate::output::Match;

/// Loads the compute engine directly from a locally compiled artifact.
///
/// The conventional location is the `native/` directory of the working
/// directory, where the engine's local build step leaves its cdylib. Use
/// [`DirectBinding::from_path`] to point at anything else.
#[derive(Debug)]
pub struct DirectBinding {
    library: Arc<EngineLibrary>,
}

impl DirectBinding {
    /// Load from the conventional local build location (`native/`).
    pub fn new() -> Result<Self, Error> {
        Self::from_path(Path::new("native").join(artifact_file_name()))
    }

    /// Load a specific engine artifact.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self {
            library: EngineLibrary::load(path.as_ref())?,
        })
    }

    /// Path of the loaded artifact.
    pub fn artifact_path(&self) -> &Path {
        self.library.path()
    }
}

impl EngineBinding for DirectBinding {
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
