//! Row conversion helpers shared by the query modules.

use jiff::civil::{Date, Time};
use jiff::Timestamp;
use rusqlite::types::Type;

use crate::models::AttachmentKind;

pub(super) fn parse_date(idx: usize, text: &str) -> rusqlite::Result<Date> {
    text.parse()
        .map_err(|e: jiff::Error| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(super) fn parse_opt_date(idx: usize, text: Option<String>) -> rusqlite::Result<Option<Date>> {
    text.map(|t| parse_date(idx, &t)).transpose()
}

pub(super) fn parse_time(idx: usize, text: &str) -> rusqlite::Result<Time> {
    text.parse()
        .map_err(|e: jiff::Error| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(super) fn parse_timestamp(idx: usize, text: &str) -> rusqlite::Result<Timestamp> {
    text.parse()
        .map_err(|e: jiff::Error| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(super) fn parse_attachment_kind(idx: usize, text: &str) -> rusqlite::Result<AttachmentKind> {
    text.parse().map_err(|message: String| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
        )
    })
}
