//! Column schema for the booking export
//!
//! Columns are found by header name first. A few legacy exports only carry
//! the course fields at fixed positions, so those fields also accept a
//! positional fallback. The schema is resolved once per input file.

use crate::error::{RosterError, RosterResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CourseType,
    Start,
    FirstName,
    LastName,
    CourseLevel,
    Textbook,
    Kit,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::CourseType => "course type",
            Field::Start => "start",
            Field::FirstName => "participant first name",
            Field::LastName => "participant last name",
            Field::CourseLevel => "course level",
            Field::Textbook => "textbook",
            Field::Kit => "first aid kit",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    /// Accepted header names, matched case-insensitively after trimming
    pub names: &'static [&'static str],
    /// 0-based column used when no header matches
    pub fallback_position: Option<usize>,
    pub required: bool,
}

/// Column M in legacy exports
const COURSE_TYPE_POSITION: usize = 12;
/// Column BJ in legacy exports
const COURSE_LEVEL_POSITION: usize = 61;

pub const BOOKING_EXPORT_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        field: Field::CourseType,
        names: &["Course Type", "Course", "Product", "Product name"],
        fallback_position: Some(COURSE_TYPE_POSITION),
        required: true,
    },
    FieldSpec {
        field: Field::Start,
        names: &["Start", "Start time"],
        fallback_position: None,
        required: true,
    },
    FieldSpec {
        field: Field::FirstName,
        names: &["First name (participant)", "First name"],
        fallback_position: None,
        required: true,
    },
    FieldSpec {
        field: Field::LastName,
        names: &["Last name (participant)", "Last name"],
        fallback_position: None,
        required: true,
    },
    FieldSpec {
        field: Field::CourseLevel,
        names: &["Course Level", "Level", "Course level (participant)"],
        fallback_position: Some(COURSE_LEVEL_POSITION),
        required: true,
    },
    FieldSpec {
        field: Field::Textbook,
        names: &["Textbook", "Textbook purchase", "Textbook (participant)"],
        fallback_position: None,
        required: false,
    },
    FieldSpec {
        field: Field::Kit,
        names: &["First Aid Kit", "Kit", "First aid kit (participant)"],
        fallback_position: None,
        required: false,
    },
];

/// Column indexes for one particular header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub course_type: usize,
    pub start: usize,
    pub first_name: usize,
    pub last_name: usize,
    pub course_level: usize,
    pub textbook: Option<usize>,
    pub kit: Option<usize>,
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn locate(spec: &FieldSpec, headers: &[String]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize(h)).collect();

    for name in spec.names {
        let wanted = normalize(name);
        if let Some(idx) = normalized.iter().position(|h| *h == wanted) {
            return Some(idx);
        }
    }

    spec.fallback_position.filter(|&pos| pos < headers.len())
}

fn candidates(spec: &FieldSpec) -> String {
    let mut names: Vec<String> = spec.names.iter().map(|n| format!("'{}'", n)).collect();
    if let Some(pos) = spec.fallback_position {
        names.push(format!("or column {}", column_letter(pos)));
    }
    names.join(", ")
}

/// Spreadsheet column letter for a 0-based index (0 → A, 26 → AA)
pub fn column_letter(index: usize) -> String {
    let mut result = String::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        result.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    result
}

/// Resolve every field against a header row, failing on the first
/// required field that cannot be found.
pub fn resolve(schema: &[FieldSpec], headers: &[String]) -> RosterResult<ResolvedColumns> {
    let find = |field: Field| -> RosterResult<Option<usize>> {
        let Some(spec) = schema.iter().find(|s| s.field == field) else {
            return Ok(None);
        };
        match locate(spec, headers) {
            Some(idx) => Ok(Some(idx)),
            None if spec.required => Err(RosterError::MissingColumn {
                field: field.label().to_string(),
                candidates: candidates(spec),
            }),
            None => Ok(None),
        }
    };
    let require = |field: Field| -> RosterResult<usize> {
        find(field)?.ok_or_else(|| RosterError::MissingColumn {
            field: field.label().to_string(),
            candidates: "(not in schema)".to_string(),
        })
    };

    Ok(ResolvedColumns {
        course_type: require(Field::CourseType)?,
        start: require(Field::Start)?,
        first_name: require(Field::FirstName)?,
        last_name: require(Field::LastName)?,
        course_level: require(Field::CourseLevel)?,
        textbook: find(Field::Textbook)?,
        kit: find(Field::Kit)?,
    })
}
