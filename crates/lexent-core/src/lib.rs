//! Validated facade over a native natural-language entity-extraction engine.
//!
//! The engine itself is a black box reached through
//! [`engine::EngineBinding`]: construct a language-scoped handle, run a
//! parse, get structured matches back. This crate owns everything in front
//! of that seam: the closed [`Kind`] registry, request validation, the
//! per-language [`EntityParser`] facade, and the decoded [`Match`] model.

pub mod config;
pub mod engine;
pub mod error;
pub mod kind;
pub mod output;
pub mod parser;

pub use engine::{
    DirectBinding, EngineBinding, EngineHandle, NativeBinding, PrebuiltBinding, Strategy,
};
pub use error::Error;
pub use kind::Kind;
pub use output::{Match, MatchValue, Span};
pub use parser::EntityParser;
