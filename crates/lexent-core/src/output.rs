//! Decoded entity values returned by the engine.
//!
//! The engine emits one JSON record per recognized entity occurrence; the
//! facade deserializes these and forwards them unchanged. Payload shapes are
//! fewer than request kinds: every datetime-family request decodes to an
//! instant, and both period requests decode to an interval.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::kind::Kind;

/// One recognized entity occurrence in a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// The requested kind this occurrence satisfied.
    pub kind: Kind,

    /// Where the occurrence sits in the source query.
    pub span: Span,

    /// Kind-specific decoded value.
    pub value: MatchValue,
}

/// Character offsets locating a match in the query, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Kind-specific decoded payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MatchValue {
    Number(NumberValue),
    Ordinal(OrdinalValue),
    Percentage(PercentageValue),
    InstantTime(InstantTimeValue),
    TimeInterval(TimeIntervalValue),
    AmountOfMoney(AmountOfMoneyValue),
    Temperature(TemperatureValue),
    Duration(DurationValue),
}

fn nearly_equal_f64(a: f64, b: f64) -> bool {
    let abs_a = a.abs();
    let abs_b = b.abs();
    let diff = (a - b).abs();

    if a == b {
        // Handles infinities.
        true
    } else if a == 0.0 || b == 0.0 || diff < f64::MIN_POSITIVE {
        // One of a or b is zero or extremely close to it, use absolute error.
        diff < (f64::EPSILON * f64::MIN_POSITIVE)
    } else {
        // Relative error.
        (diff / f64::min(abs_a + abs_b, f64::MAX)) < 0.00001
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct NumberValue {
    pub value: f64,
}

impl PartialEq for NumberValue {
    fn eq(&self, other: &NumberValue) -> bool {
        nearly_equal_f64(self.value, other.value)
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Copy, Debug)]
pub struct OrdinalValue {
    pub value: i64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct PercentageValue {
    pub value: f64,
}

impl PartialEq for PercentageValue {
    fn eq(&self, other: &PercentageValue) -> bool {
        nearly_equal_f64(self.value, other.value)
    }
}

/// A single resolved point in time.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct InstantTimeValue {
    #[serde(with = "instant_json")]
    pub value: NaiveDateTime,
    pub grain: TimeGrain,
    pub precision: Precision,
}

/// A resolved time interval; open on either end.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TimeIntervalValue {
    #[serde(with = "optional_instant_json")]
    pub from: Option<NaiveDateTime>,
    #[serde(with = "optional_instant_json")]
    pub to: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct AmountOfMoneyValue {
    pub value: f64,
    pub precision: Precision,
    pub unit: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TemperatureValue {
    pub value: f64,
    pub unit: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct DurationValue {
    pub years: i64,
    pub quarters: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub precision: Precision,
}

/// Granularity of a resolved instant.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Hash)]
pub enum TimeGrain {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Copy, Clone)]
pub enum Precision {
    Approximate,
    Exact,
}

/// Instants cross the engine wire as `"%Y-%m-%d %T"` strings.
mod instant_json {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %T";

    pub fn serialize<S: Serializer>(
        instant: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        instant.format(FORMAT).to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

mod optional_instant_json {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::instant_json;

    pub fn serialize<S: Serializer>(
        instant: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match instant {
            Some(instant) => instant_json::serialize(instant, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| {
            NaiveDateTime::parse_from_str(&s, instant_json::FORMAT)
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
