//! Column status enumeration for cards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Type-safe column assignment for a card.
///
/// Four fixed columns plus arbitrary user-created custom sections. Unknown
/// status strings are treated as custom-section identifiers rather than
/// rejected, since sections are created freely in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CardStatus {
    /// No forward-looking or active date range
    #[default]
    Inbox,

    /// Scheduled to start in the future
    Pending,

    /// Active today (or overdue and kept visible)
    InProgress,

    /// Terminal column
    Completed,

    /// User-defined section identifier
    Custom(String),
}

impl CardStatus {
    /// Parses a status string; unknown identifiers become custom sections.
    pub fn from_name(s: &str) -> Self {
        match s {
            "inbox" => CardStatus::Inbox,
            "pending" => CardStatus::Pending,
            "in-progress" | "inprogress" => CardStatus::InProgress,
            "completed" => CardStatus::Completed,
            other => CardStatus::Custom(other.to_string()),
        }
    }

    /// Convert to database string representation
    pub fn as_str(&self) -> &str {
        match self {
            CardStatus::Inbox => "inbox",
            CardStatus::Pending => "pending",
            CardStatus::InProgress => "in-progress",
            CardStatus::Completed => "completed",
            CardStatus::Custom(id) => id,
        }
    }

    /// Whether this is a user-created section rather than a fixed column.
    pub fn is_custom(&self) -> bool {
        matches!(self, CardStatus::Custom(_))
    }

    /// Whether derivation and routing may overwrite this status from dates.
    ///
    /// Custom sections and the terminal completed column always win over
    /// the date-derived computation.
    pub fn is_date_driven(&self) -> bool {
        !self.is_custom() && *self != CardStatus::Completed
    }
}

impl FromStr for CardStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CardStatus::from_name(s))
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CardStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CardStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(CardStatus::from_name(&s))
    }
}
