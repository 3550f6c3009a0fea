//! `.metadata` codec.
//!
//! One `name=value` pair per line. Fields fall into three typed groups:
//! strings (kept verbatim), integers, and dates (RFC 3339). A line is
//! assigned to the field whose name followed by `=` starts the line, so a
//! field name that prefixes another (`title` vs `titleShort`) never
//! captures the longer one. Unknown lines are ignored and unparseable
//! values leave the field at its default.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::mission::MissionMetadata;

const SEPARATOR: char = '=';

#[derive(Debug, Clone, Copy)]
enum StringField {
    CoverImage,
    Kind,
    Title,
    Reading,
    WebSummary,
}

#[derive(Debug, Clone, Copy)]
enum NumberField {
    Number,
    SourceVersion,
}

#[derive(Debug, Clone, Copy)]
enum DateField {
    DueDate,
}

const STRING_FIELDS: [(&str, StringField); 5] = [
    ("coverImage", StringField::CoverImage),
    ("kind", StringField::Kind),
    ("title", StringField::Title),
    ("reading", StringField::Reading),
    ("webSummary", StringField::WebSummary),
];

const NUMBER_FIELDS: [(&str, NumberField); 2] = [
    ("number", NumberField::Number),
    ("sourceVersion", NumberField::SourceVersion),
];

const DATE_FIELDS: [(&str, DateField); 1] = [("dueDate", DateField::DueDate)];

impl StringField {
    fn value(self, metadata: &MissionMetadata) -> &str {
        match self {
            Self::CoverImage => &metadata.cover_image,
            Self::Kind => &metadata.kind,
            Self::Title => &metadata.title,
            Self::Reading => &metadata.reading,
            Self::WebSummary => &metadata.web_summary,
        }
    }

    fn slot(self, metadata: &mut MissionMetadata) -> &mut String {
        match self {
            Self::CoverImage => &mut metadata.cover_image,
            Self::Kind => &mut metadata.kind,
            Self::Title => &mut metadata.title,
            Self::Reading => &mut metadata.reading,
            Self::WebSummary => &mut metadata.web_summary,
        }
    }
}

impl NumberField {
    const fn value(self, metadata: &MissionMetadata) -> i64 {
        match self {
            Self::Number => metadata.number,
            Self::SourceVersion => metadata.source_version,
        }
    }

    fn slot(self, metadata: &mut MissionMetadata) -> &mut i64 {
        match self {
            Self::Number => &mut metadata.number,
            Self::SourceVersion => &mut metadata.source_version,
        }
    }
}

impl DateField {
    const fn value(self, metadata: &MissionMetadata) -> Option<DateTime<Utc>> {
        match self {
            Self::DueDate => metadata.due_date,
        }
    }

    fn slot(self, metadata: &mut MissionMetadata) -> &mut Option<DateTime<Utc>> {
        match self {
            Self::DueDate => &mut metadata.due_date,
        }
    }
}

/// Return the value part of `line` if it is `name=value`.
fn value_for<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    line.strip_prefix(name)?.strip_prefix(SEPARATOR)
}

/// Decode `.metadata` text. Never fails: missing or malformed lines leave
/// the corresponding field at its default.
#[must_use]
pub fn decode(text: &str) -> MissionMetadata {
    let mut metadata = MissionMetadata::default();
    let normalized = text.replace('\r', "");

    for line in normalized.split('\n') {
        decode_line(&mut metadata, line);
    }
    metadata
}

fn decode_line(metadata: &mut MissionMetadata, line: &str) {
    for (name, field) in STRING_FIELDS {
        if let Some(value) = value_for(line, name) {
            *field.slot(metadata) = value.to_string();
            return;
        }
    }

    for (name, field) in NUMBER_FIELDS {
        if let Some(value) = value_for(line, name) {
            match value.trim().parse::<i64>() {
                Ok(parsed) => *field.slot(metadata) = parsed,
                Err(e) => tracing::debug!(field = name, value, %e, "ignoring non-numeric metadata value"),
            }
            return;
        }
    }

    for (name, field) in DATE_FIELDS {
        if let Some(value) = value_for(line, name) {
            let value = value.trim();
            if value.is_empty() {
                *field.slot(metadata) = None;
            } else if let Some(parsed) = parse_date(value) {
                *field.slot(metadata) = Some(parsed);
            } else {
                tracing::debug!(field = name, value, "ignoring unparseable metadata date");
            }
            return;
        }
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
///
/// Signed and five-digit years, as written by [`encode`] for dates outside
/// 0000..=9999, parse through chrono's `FromStr`.
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = value.parse::<DateTime<Utc>>() {
        return Some(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Encode metadata as `.metadata` text.
///
/// Line breaks inside string values cannot be represented and are written
/// as spaces. An unset due date is omitted.
#[must_use]
pub fn encode(metadata: &MissionMetadata) -> String {
    let mut lines = Vec::with_capacity(8);

    for (name, field) in STRING_FIELDS {
        lines.push(format!("{name}{SEPARATOR}{}", single_line(field.value(metadata))));
    }
    for (name, field) in NUMBER_FIELDS {
        lines.push(format!("{name}{SEPARATOR}{}", field.value(metadata)));
    }
    for (name, field) in DATE_FIELDS {
        if let Some(date) = field.value(metadata) {
            lines.push(format!(
                "{name}{SEPARATOR}{}",
                date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
            ));
        }
    }

    lines.join("\n")
}

fn single_line(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
