//! The closed registry of entity kinds the engine can recognize.
//!
//! Kind labels are part of the public contract: they are matched exactly
//! (case-sensitive, no aliasing) and travel verbatim over the engine wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One category of recognizable entity.
///
/// The set is closed: it is never extended at runtime, and the canonical
/// string label is the identity of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Number,
    Ordinal,
    Datetime,
    Date,
    Time,
    DatePeriod,
    TimePeriod,
    AmountOfMoney,
    Temperature,
    Duration,
    Percentage,
}

impl Kind {
    /// Every kind, in registry order.
    ///
    /// This is the universe used for request validation and the meaning of
    /// "any kind" in the public API.
    pub const ALL: [Kind; 11] = [
        Kind::Number,
        Kind::Ordinal,
        Kind::Datetime,
        Kind::Date,
        Kind::Time,
        Kind::DatePeriod,
        Kind::TimePeriod,
        Kind::AmountOfMoney,
        Kind::Temperature,
        Kind::Duration,
        Kind::Percentage,
    ];

    /// Canonical string label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Number => "Number",
            Kind::Ordinal => "Ordinal",
            Kind::Datetime => "Datetime",
            Kind::Date => "Date",
            Kind::Time => "Time",
            Kind::DatePeriod => "DatePeriod",
            Kind::TimePeriod => "TimePeriod",
            Kind::AmountOfMoney => "AmountOfMoney",
            Kind::Temperature => "Temperature",
            Kind::Duration => "Duration",
            Kind::Percentage => "Percentage",
        }
    }

    /// Look up a kind by its canonical label.
    ///
    /// Matching is exact and case-sensitive; `"number"` and `"NUMBER"` name
    /// nothing.
    pub fn from_label(label: &str) -> Option<Kind> {
        Kind::ALL.iter().copied().find(|kind| kind.label() == label)
    }

    /// Check whether a candidate label names a registered kind.
    pub fn is_valid(label: &str) -> bool {
        Kind::from_label(label).is_some()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_label(s).ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}
