//! The caller-facing parser: one language, one engine handle, validated
//! dispatch.

use tracing::debug;

use crate::engine::{EngineBinding, NativeBinding, Strategy};
use crate::error::Error;
use crate::kind::Kind;
use crate::output::Match;

/// A parser bound to one language for its lifetime.
///
/// Construction eagerly creates the engine handle, so an unusable language
/// surfaces immediately as [`Error::EngineUnavailable`] rather than on the
/// first parse. The language code is passed through to the engine
/// unvalidated. Instances are fully independent; nothing is shared between
/// parsers for different languages.
///
/// The facade is stateless across calls and adds no locking: a handle is not
/// assumed safe for overlapping in-flight calls, so callers that want
/// concurrency build one parser per worker.
///
/// # Example
///
/// ```ignore
/// use lexent_core::EntityParser;
///
/// let parser = EntityParser::new("FR")?;
/// let matches = parser.parse("quarante deux", &["Number"])?;
/// ```
pub struct EntityParser<B: EngineBinding> {
    binding: B,
    handle: B::Handle,
    language: String,
}

impl EntityParser<NativeBinding> {
    /// Create a parser on the engine-binding strategy the environment
    /// selects (prebuilt resolution by default).
    pub fn new(language: &str) -> Result<Self, Error> {
        Self::with_binding(Strategy::from_env().build()?, language)
    }
}

impl<B: EngineBinding> EntityParser<B> {
    /// Create a parser for `language` on an explicit engine binding.
    pub fn with_binding(binding: B, language: &str) -> Result<Self, Error> {
        let handle = binding.create_handle(language)?;
        Ok(Self {
            binding,
            handle,
            language: language.to_string(),
        })
    }

    /// Language code this parser is scoped to.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Extract entities from `query`, restricted to the requested kinds.
    ///
    /// Every requested label is checked against the kind registry before the
    /// engine sees anything; the first unregistered label fails the whole
    /// call with [`Error::UnknownKind`] and no engine call is made. The
    /// validated request is forwarded with its membership and order intact.
    ///
    /// An empty `kinds` slice requests matches of any kind. It is forwarded
    /// to the engine as-is, not expanded to the full registry: "unrestricted"
    /// is the engine's meaning of an empty filter.
    pub fn parse(&self, query: &str, kinds: &[&str]) -> Result<Vec<Match>, Error> {
        let kinds = validate_kinds(kinds)?;
        debug!(language = %self.language, ?kinds, "dispatching parse");
        self.binding.run_parse(&self.handle, query, &kinds)
    }

    /// Shorthand for `parse(query, &["Number"])`.
    pub fn parse_number(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::Number.label()])
    }

    /// Shorthand for `parse(query, &["Ordinal"])`.
    pub fn parse_ordinal(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::Ordinal.label()])
    }

    /// Shorthand for `parse(query, &["Datetime"])`.
    pub fn parse_datetime(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::Datetime.label()])
    }

    /// Shorthand for `parse(query, &["Date"])`.
    pub fn parse_date(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::Date.label()])
    }

    /// Shorthand for `parse(query, &["Time"])`.
    pub fn parse_time(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::Time.label()])
    }

    /// Shorthand for `parse(query, &["DatePeriod"])`.
    pub fn parse_date_period(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::DatePeriod.label()])
    }

    /// Shorthand for `parse(query, &["TimePeriod"])`.
    pub fn parse_time_period(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::TimePeriod.label()])
    }

    /// Shorthand for `parse(query, &["AmountOfMoney"])`.
    pub fn parse_amount_of_money(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::AmountOfMoney.label()])
    }

    /// Shorthand for `parse(query, &["Temperature"])`.
    pub fn parse_temperature(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::Temperature.label()])
    }

    /// Shorthand for `parse(query, &["Duration"])`.
    pub fn parse_duration(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::Duration.label()])
    }

    /// Shorthand for `parse(query, &["Percentage"])`.
    pub fn parse_percentage(&self, query: &str) -> Result<Vec<Match>, Error> {
        self.parse(query, &[Kind::Percentage.label()])
    }
}

/// Check a caller-supplied kind request against the registry.
///
/// Fail-fast: the first unknown label aborts the call, so no partially
/// validated request ever reaches the engine.
fn validate_kinds(labels: &[&str]) -> Result<Vec<Kind>, Error> {
    labels
        .iter()
        .map(|label| {
            Kind::from_label(label).ok_or_else(|| Error::UnknownKind((*label).to_string()))
        })
        .collect()
}
