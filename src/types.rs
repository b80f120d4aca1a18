use chrono::NaiveDateTime;
use serde::Serialize;

//==============================================================================
// Input
//==============================================================================

/// One registrant from the booking export
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputRow {
    /// 1-based row number in the source sheet (header is row 1)
    pub row_number: usize,
    pub first_name: String,
    pub last_name: String,
    /// Combined "<category> (<location>)" text
    pub course_type: String,
    /// Parsed start, `None` when the cell is blank or unparseable
    pub start: Option<NaiveDateTime>,
    /// Start cell as displayed text, kept for diagnostics
    pub start_text: String,
    pub course_level: String,
    pub textbook: Option<String>,
    pub kit: Option<String>,
}

//==============================================================================
// Grouping
//==============================================================================

/// Partition key. Ordering is location, then category, then start.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupKey {
    pub location: String,
    pub category: String,
    pub start: NaiveDateTime,
}

/// Rows sharing one key, in export order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: GroupKey,
    pub rows: Vec<InputRow>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A row left out of grouping because its start could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub row_number: usize,
    pub value: String,
}

//==============================================================================
// Roster Document
//==============================================================================

pub const ROSTER_COLUMNS: usize = 8;

/// Fixed header labels, in column order
pub const ROSTER_HEADERS: [&str; ROSTER_COLUMNS] = [
    "Pass (P) or Fail (F) or No-show (N)",
    "First Name",
    "Last Name",
    "Course Taken",
    "QR Code / Paper Test\n(specify which)",
    "First Aid Kit\n(HIGHLIGHT)\ndelivered = green\nnot delivered = red",
    "Textbook\n(HIGHLIGHT)\ndelivered = green\nnot delivered = red",
    "Notes for Instructor",
];

/// One participant line of a roster
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterRow {
    pub first_name: String,
    pub last_name: String,
    pub course: String,
    pub kit_status: String,
    pub textbook_status: String,
}

impl RosterRow {
    /// Cell values in header order; instructor-filled columns are blank
    pub fn cells(&self) -> [&str; ROSTER_COLUMNS] {
        [
            "",
            &self.first_name,
            &self.last_name,
            &self.course,
            "",
            &self.kit_status,
            &self.textbook_status,
            "",
        ]
    }
}

/// Boilerplate placed below the participant rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSection {
    /// 0-based sheet row of the first instruction line
    pub start_row: u32,
    pub instructions: Vec<String>,
    /// Informational block, row by row, cells from column A
    pub info: Vec<Vec<String>>,
}

impl StaticSection {
    /// Row of the "note to office" marker, after instructions, a spacer and the info block
    pub fn office_note_row(&self) -> u32 {
        self.start_row + self.instructions.len() as u32 + 1 + self.info.len() as u32 + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterDocument {
    pub rows: Vec<RosterRow>,
    pub static_section: Option<StaticSection>,
}

impl RosterDocument {
    pub fn headers(&self) -> [&'static str; ROSTER_COLUMNS] {
        ROSTER_HEADERS
    }

    pub fn participant_count(&self) -> usize {
        self.rows.len()
    }
}
