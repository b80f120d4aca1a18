//! Static informational block shared by every roster

use super::importer::cell_text;
use crate::config::TemplateSource;
use crate::error::{RosterError, RosterResult};
use calamine::{open_workbook, Reader, Xlsx};

/// Instructions printed at the top of the static block on every roster
pub const INSTRUCTIONS: &[&str] = &[
    "INSTRUCTOR CHECKLIST",
    "1. Mark every participant P (pass), F (fail) or N (no-show) in column A.",
    "2. Write QR or PAPER in the test column for each participant who wrote the test.",
    "3. Highlight kit and textbook cells green when delivered, red when not delivered.",
    "4. Upload this completed roster to Connecteam the same day as the class.",
];

/// Block used when no template workbook is configured
const DEFAULT_INFO: &[&[&str]] = &[
    &["CLASS INFORMATION"],
    &["Participants must attend the full class to be eligible for certification."],
    &["Late arrivals of more than 15 minutes may be rebooked at the instructor's discretion."],
    &["Certificates are emailed within 5 business days of a passing result."],
    &["Questions: contact the office before the class start time."],
];

pub const OFFICE_NOTE_LABEL: &str = "NOTE TO OFFICE:";

/// Rows of informational text, cells from column A
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoBlock {
    pub rows: Vec<Vec<String>>,
}

impl Default for InfoBlock {
    fn default() -> Self {
        Self {
            rows: DEFAULT_INFO
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }
}

impl InfoBlock {
    /// Load the configured template, or the built-in block without one
    pub fn resolve(source: Option<&TemplateSource>) -> RosterResult<Self> {
        match source {
            Some(src) => Self::load(src),
            None => Ok(Self::default()),
        }
    }

    /// Read rows `first_row..=last_row` (1-based) of the template sheet.
    /// Trailing blank cells are dropped; blank rows are kept as spacers.
    pub fn load(source: &TemplateSource) -> RosterResult<Self> {
        let mut workbook: Xlsx<_> = open_workbook(&source.path).map_err(|e| {
            RosterError::Template(format!(
                "Failed to open template {}: {}",
                source.path.display(),
                e
            ))
        })?;

        let range = workbook.worksheet_range(&source.sheet).map_err(|e| {
            RosterError::Template(format!(
                "Failed to read sheet '{}' of template {}: {}",
                source.sheet,
                source.path.display(),
                e
            ))
        })?;

        let width = range.end().map(|(_, c)| c + 1).unwrap_or(0);
        let mut rows = Vec::new();
        for row in (source.first_row - 1)..source.last_row {
            let mut cells: Vec<String> = (0..width)
                .map(|col| range.get_value((row, col)).map(cell_text).unwrap_or_default())
                .collect();
            while cells.last().is_some_and(|c| c.trim().is_empty()) {
                cells.pop();
            }
            rows.push(cells);
        }

        if rows.iter().all(|r| r.is_empty()) {
            return Err(RosterError::Template(format!(
                "rows {}..={} of sheet '{}' are empty",
                source.first_row, source.last_row, source.sheet
            )));
        }

        Ok(Self { rows })
    }
}
