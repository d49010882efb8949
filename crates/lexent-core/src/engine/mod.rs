//! The seam between the facade and the native extraction engine.
//!
//! A binding knows how the engine artifact is obtained and invoked, and
//! exposes exactly two operations: create a language-scoped handle, and run
//! a parse against one. Everything above this module is strategy-agnostic.
//!
//! ## Strategies
//!
//! - [`DirectBinding`] - loads the locally compiled engine artifact
//! - [`PrebuiltBinding`] - resolves a distributed artifact path, then loads it
//!
//! Both drive the same four-symbol engine ABI; [`Strategy`] picks one at run
//! time the way a deployment would at build time.

mod direct;
mod library;
mod prebuilt;

pub use direct::DirectBinding;
pub use library::EngineHandle;
pub use prebuilt::PrebuiltBinding;

use std::path::PathBuf;

use crate::config::EngineConfig;
use crate::error::Error;
use crate::kind::Kind;
use crate::output::Match;

/// A strategy for reaching the native extraction engine.
///
/// Implementations differ only in how the engine is located and loaded; the
/// rest of the system never branches on which one is active.
pub trait EngineBinding: Send + Sync + std::fmt::Debug {
    /// Opaque per-language resource required for every parse call.
    type Handle;

    /// Create a handle scoped to one language.
    ///
    /// Fails with [`Error::EngineUnavailable`] when the engine cannot be
    /// loaded or initialized for that language.
    fn create_handle(&self, language: &str) -> Result<Self::Handle, Error>;

    /// Run one extraction over `query`, restricted to `kinds`.
    ///
    /// An empty `kinds` slice means "unrestricted"; that meaning belongs to
    /// the engine, the binding only preserves it. Returns an empty sequence
    /// (not an error) when nothing is recognized, and
    /// [`Error::EngineParse`] when the engine itself fails.
    fn run_parse(
        &self,
        handle: &Self::Handle,
        query: &str,
        kinds: &[Kind],
    ) -> Result<Vec<Match>, Error>;
}

/// Blanket implementation for boxed bindings.
impl<B: EngineBinding + ?Sized> EngineBinding for Box<B> {
    type Handle = B::Handle;

    fn create_handle(&self, language: &str) -> Result<Self::Handle, Error> {
        (**self).create_handle(language)
    }

    fn run_parse(
        &self,
        handle: &Self::Handle,
        query: &str,
        kinds: &[Kind],
    ) -> Result<Vec<Match>, Error> {
        (**self).run_parse(handle, query, kinds)
    }
}

/// A native binding whose strategy is chosen at run time.
pub type NativeBinding = Box<dyn EngineBinding<Handle = EngineHandle>>;

/// Engine-binding strategy selection.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Load a locally compiled engine artifact directly.
    Direct {
        /// Artifact path; the conventional `native/` build output when `None`.
        path: Option<PathBuf>,
    },
    /// Resolve a distributed prebuilt artifact, then load it.
    Prebuilt {
        /// Root of the dist layout; the user data dir when `None`.
        dist_dir: Option<PathBuf>,
    },
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Prebuilt { dist_dir: None }
    }
}

impl Strategy {
    /// Creates a strategy from an engine configuration section.
    pub fn from_config(config: &EngineConfig) -> Self {
        match config.strategy.as_str() {
            "direct" | "local" => Strategy::Direct {
                path: config.path.clone(),
            },
            _ => Strategy::Prebuilt {
                dist_dir: config.dist_dir.clone(),
            },
        }
    }

    /// Auto-detect a strategy from environment variables.
    ///
    /// Detection order:
    /// 1. `LEXENT_ENGINE_STRATEGY` explicitly set
    /// 2. `LEXENT_ENGINE_PATH` set -> direct load of that artifact
    /// 3. Default to prebuilt resolution
    pub fn from_env() -> Self {
        if let Ok(strategy) = std::env::var("LEXENT_ENGINE_STRATEGY") {
            return match strategy.to_lowercase().as_str() {
                "direct" | "local" => Strategy::Direct {
                    path: std::env::var("LEXENT_ENGINE_PATH").ok().map(PathBuf::from),
                },
                _ => Strategy::Prebuilt {
                    dist_dir: std::env::var("LEXENT_ENGINE_DIST_DIR")
                        .ok()
                        .map(PathBuf::from),
                },
            };
        }

        if let Ok(path) = std::env::var("LEXENT_ENGINE_PATH") {
            return Strategy::Direct {
                path: Some(PathBuf::from(path)),
            };
        }

        Strategy::Prebuilt {
            dist_dir: std::env::var("LEXENT_ENGINE_DIST_DIR")
                .ok()
                .map(PathBuf::from),
        }
    }

    /// Build the binding this strategy describes.
    ///
    /// Loading happens here, eagerly; a missing or unloadable artifact fails
    /// with [`Error::EngineUnavailable`] before any parser exists.
    pub fn build(self) -> Result<NativeBinding, Error> {
        match self {
            Strategy::Direct { path } => {
                let binding = match path {
                    Some(path) => DirectBinding::from_path(path)?,
                    None => DirectBinding::new()?,
                };
                Ok(Box::new(binding))
            }
            Strategy::Prebuilt { dist_dir } => {
                let binding = match dist_dir {
                    Some(dir) => PrebuiltBinding::with_dist_dir(dir)?,
                    None => PrebuiltBinding::new()?,
                };
                Ok(Box::new(binding))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy_is_prebuilt() {
        assert!(matches!(
            Strategy::default(),
            Strategy::Prebuilt { dist_dir: None }
        ));
    }

    #[test]
    fn test_strategy_from_config() {
        let config = EngineConfig {
            strategy: "direct".to_string(),
            path: Some(PathBuf::from("/opt/engine/libengine.so")),
            dist_dir: None,
        };
        let strategy = Strategy::from_config(&config);
        assert!(matches!(strategy, Strategy::Direct { path: Some(p) } if p.ends_with("libengine.so")));
    }

    #[test]
    fn test_unrecognized_config_strategy_falls_back_to_prebuilt() {
        let config = EngineConfig {
            strategy: "prebuilt".to_string(),
            path: None,
            dist_dir: Some(PathBuf::from("/opt/dist")),
        };
        assert!(matches!(
            Strategy::from_config(&config),
            Strategy::Prebuilt { dist_dir: Some(_) }
        ));
    }

    #[test]
    fn test_building_against_missing_artifact_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let strategy = Strategy::Prebuilt {
            dist_dir: Some(dir.path().to_path_buf()),
        };
        let err = strategy.build().unwrap_err();
        assert!(matches!(err, Error::EngineUnavailable(_)));
    }
}
