//! Attachment model shared by plans and cards.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A link or an opaque stored-file reference attached to a plan or card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    /// Unique identifier for the attachment
    pub id: u64,

    /// Whether the value is a URL or a stored-file reference
    pub kind: AttachmentKind,

    /// URL or opaque file reference
    pub value: String,
}

/// Type-safe enumeration of attachment kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// External URL
    Link,

    /// Opaque reference into file storage
    File,
}

impl FromStr for AttachmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "link" => Ok(AttachmentKind::Link),
            "file" => Ok(AttachmentKind::File),
            _ => Err(format!("Invalid attachment kind: {s}")),
        }
    }
}

impl AttachmentKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Link => "link",
            AttachmentKind::File => "file",
        }
    }
}
