//! Typed identifiers for board view entries.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Identifier for an entry in the derived board view.
///
/// Real cards are persisted rows; virtual cards are read-time projections
/// of a plan and carry that plan's id. The variant is the discriminant, so
/// code never inspects id strings to decide which kind of record it holds.
/// The textual form keeps the `plan-<id>` prefix for virtual entries so
/// ids stay meaningful on the wire and in the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKey {
    /// A persisted card row
    Real(u64),

    /// A projection of the plan with this id; never persisted
    Virtual(u64),
}

impl CardKey {
    /// Whether this key names a virtual (plan-backed) entry.
    pub fn is_virtual(&self) -> bool {
        matches!(self, CardKey::Virtual(_))
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardKey::Real(id) => write!(f, "{id}"),
            CardKey::Virtual(plan_id) => write!(f, "plan-{plan_id}"),
        }
    }
}

impl FromStr for CardKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("plan-") {
            Some(rest) => rest.parse().map(CardKey::Virtual),
            None => s.parse().map(CardKey::Real),
        };
        parsed.map_err(|_| format!("Invalid card key: {s}"))
    }
}

impl Serialize for CardKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CardKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
