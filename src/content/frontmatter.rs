//! Front-matter parsing

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde_yaml::Value;

/// Marker line opening and closing the header block
const DELIMITER: &str = "---";

/// Front-matter data from a post: the `key: value` header, kept in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content without a delimited header yields an empty front-matter and the
    /// whole input as body. An opening marker without a closing one is treated
    /// the same way.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let trimmed = content.trim_start_matches(['\u{feff}', '\n', '\r']);

        let Some(rest) = strip_delimiter_line(trimmed) else {
            return Ok((FrontMatter::default(), content));
        };

        let Some((header, body)) = split_at_closing(rest) else {
            return Ok((FrontMatter::default(), content));
        };

        let body = body.trim_start_matches(['\n', '\r']);

        if header.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fields: IndexMap<String, Value> = serde_yaml::from_str(header)?;
        Ok((Self { fields }, body))
    }

    /// Raw value for a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Scalar value for a key rendered as a string
    ///
    /// Numbers and booleans are stringified, mappings and sequences are not
    /// scalars and yield `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Iterate over the header fields in file order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Strip a leading `---` line, returning what follows it
fn strip_delimiter_line(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(DELIMITER)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Find the closing `---` line and split into (header, body)
fn split_at_closing(rest: &str) -> Option<(&str, &str)> {
    // Closing marker directly after the opening one
    if let Some(body) = strip_delimiter_line(rest) {
        return Some(("", body));
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        if start > 0 && line.trim_end() == DELIMITER {
            return Some((&rest[..start], &rest[offset..]));
        }
    }
    None
}

/// Parse a date string in the formats posts use
///
/// RFC 3339 / ISO 8601 timestamps keep their offset; dates and times without
/// an offset are read as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().fixed_offset());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset());
        }
    }

    None
}
