//! Shared machinery for loading the engine cdylib and talking to it.
//!
//! Both binding strategies end up here: one loaded artifact, the four
//! symbols of the engine ABI, and JSON across the boundary.
//!
//! ## Engine ABI
//!
//! ```text
//! lexent_engine_parser_new(lang)                 -> parser (null on failure)
//! lexent_engine_parser_free(parser)
//! lexent_engine_parse(parser, query, kinds_json) -> json (null on failure)
//! lexent_engine_string_free(json)
//! ```
//!
//! `kinds_json` is a JSON array of canonical kind labels; an empty array
//! asks for unrestricted extraction. The returned JSON is an array of match
//! records decoded by [`crate::output`].

use std::ffi::{c_char, c_void, CStr, CString};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::Error;
use crate::kind::Kind;
use crate::output::Match;

const SYM_PARSER_NEW: &[u8] = b"lexent_engine_parser_new";
const SYM_PARSER_FREE: &[u8] = b"lexent_engine_parser_free";
const SYM_PARSE: &[u8] = b"lexent_engine_parse";
const SYM_STRING_FREE: &[u8] = b"lexent_engine_string_free";

type ParserNewFn = unsafe extern "C" fn(*const c_char) -> *mut c_void;
type ParserFreeFn = unsafe extern "C" fn(*mut c_void);
type ParseFn = unsafe extern "C" fn(*mut c_void, *const c_char, *const c_char) -> *mut c_char;
type StringFreeFn = unsafe extern "C" fn(*mut c_char);

/// A loaded engine artifact.
#[derive(Debug)]
pub(crate) struct EngineLibrary {
    library: libloading::Library,
    path: PathBuf,
}

impl EngineLibrary {
    /// Load the engine artifact at `path` and check its ABI surface.
    ///
    /// Every symbol is resolved once up front so a truncated or mismatched
    /// artifact fails here, not mid-parse.
    pub(crate) fn load(path: &Path) -> Result<Arc<Self>, Error> {
        debug!(path = %path.display(), "loading engine artifact");

        let library = unsafe { libloading::Library::new(path) }.map_err(|e| {
            Error::EngineUnavailable(format!(
                "failed to load engine artifact {}: {}",
                path.display(),
                e
            ))
        })?;

        let lib = EngineLibrary {
            library,
            path: path.to_path_buf(),
        };
        lib.parser_new()?;
        lib.parser_free()?;
        lib.parse_raw()?;
        lib.string_free()?;

        Ok(Arc::new(lib))
    }

    /// Path of the loaded artifact.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn symbol<T>(&self, name: &'static [u8]) -> Result<libloading::Symbol<'_, T>, Error> {
        unsafe { self.library.get(name) }.map_err(|e| {
            Error::EngineUnavailable(format!(
                "engine artifact {} is missing symbol {}: {}",
                self.path.display(),
                String::from_utf8_lossy(name),
                e
            ))
        })
    }

    fn parser_new(&self) -> Result<libloading::Symbol<'_, ParserNewFn>, Error> {
        self.symbol(SYM_PARSER_NEW)
    }

    fn parser_free(&self) -> Result<libloading::Symbol<'_, ParserFreeFn>, Error> {
        self.symbol(SYM_PARSER_FREE)
    }

    fn parse_raw(&self) -> Result<libloading::Symbol<'_, ParseFn>, Error> {
        self.symbol(SYM_PARSE)
    }

    fn string_free(&self) -> Result<libloading::Symbol<'_, StringFreeFn>, Error> {
        self.symbol(SYM_STRING_FREE)
    }

    /// Create an engine parser scoped to `language`.
    pub(crate) fn create_handle(self: &Arc<Self>, language: &str) -> Result<EngineHandle, Error> {
        let lang = CString::new(language).map_err(|_| {
            Error::EngineUnavailable(format!("language code {language:?} contains a NUL byte"))
        })?;

        let parser_new = self.parser_new()?;
        let raw = unsafe { parser_new(lang.as_ptr()) };
        if raw.is_null() {
            return Err(Error::EngineUnavailable(format!(
                "engine rejected language {language:?}"
            )));
        }

        debug!(language, "created engine parser handle");
        Ok(EngineHandle {
            raw,
            library: Arc::clone(self),
            language: language.to_string(),
        })
    }

    /// Run one extraction call against an engine parser.
    pub(crate) fn run_parse(
        &self,
        handle: &EngineHandle,
        query: &str,
        kinds: &[Kind],
    ) -> Result<Vec<Match>, Error> {
        let query_c = CString::new(query)
            .map_err(|_| Error::EngineParse("query contains a NUL byte".to_string()))?;

        let labels: Vec<&str> = kinds.iter().map(Kind::label).collect();
        let kinds_json =
            serde_json::to_string(&labels).map_err(|e| Error::EngineParse(e.to_string()))?;
        let kinds_c =
            CString::new(kinds_json).map_err(|e| Error::EngineParse(e.to_string()))?;

        let parse = self.parse_raw()?;
        let string_free = self.string_free()?;

        let raw = unsafe { parse(handle.raw, query_c.as_ptr(), kinds_c.as_ptr()) };
        if raw.is_null() {
            return Err(Error::EngineParse(
                "engine reported an internal failure".to_string(),
            ));
        }

        // Copy out before handing the engine-owned buffer back.
        let json = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();
        unsafe { string_free(raw) };

        serde_json::from_str(&json)
            .map_err(|e| Error::EngineParse(format!("undecodable engine output: {e}")))
    }
}

/// Opaque per-language engine resource.
///
/// Owned exclusively by one parser instance, never shared or pooled; the
/// underlying engine parser is released when the handle drops. A handle is
/// not assumed safe for overlapping in-flight calls.
pub struct EngineHandle {
    raw: *mut c_void,
    library: Arc<EngineLibrary>,
    language: String,
}

// The engine contract allows moving a parser across threads as long as calls
// on it never overlap; exclusive ownership by one facade instance gives that.
unsafe impl Send for EngineHandle {}

impl EngineHandle {
    /// Language this handle is scoped to.
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        if let Ok(parser_free) = self.library.parser_free() {
            unsafe { parser_free(self.raw) };
        }
    }
}

/// Platform file name of the engine artifact, e.g. `liblexent_engine.so`.
pub(crate) fn artifact_file_name() -> String {
    format!(
        "{}lexent_engine{}",
        std::env::consts::DLL_PREFIX,
        std::env::consts::DLL_SUFFIX
    )
}
