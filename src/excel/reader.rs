//! Read a generated roster back into plain text cells

use super::exporter::ROSTER_SHEET;
use super::importer::cell_text;
use super::template::INSTRUCTIONS;
use crate::error::{RosterError, RosterResult};
use crate::types::ROSTER_COLUMNS;
use calamine::{open_workbook_from_rs, Reader, Xlsx};
use std::io::Cursor;

/// Sheet contents indexed by absolute (0-based) row and column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTable {
    pub headers: Vec<String>,
    /// Every row below the header, static block included
    pub rows: Vec<Vec<String>>,
}

impl RosterTable {
    /// Text at a sheet position; row 0 is the header
    pub fn cell(&self, row: usize, col: usize) -> &str {
        let found = if row == 0 {
            self.headers.get(col)
        } else {
            self.rows.get(row - 1).and_then(|r| r.get(col))
        };
        found.map(String::as_str).unwrap_or("")
    }

    /// Participant lines: rows after the header up to the instruction
    /// block, without trailing blank rows. Column A is never filled on a
    /// participant line, so the checklist heading there marks the block.
    pub fn participants(&self) -> &[Vec<String>] {
        let block = self
            .rows
            .iter()
            .position(|r| r.first().is_some_and(|c| c == INSTRUCTIONS[0]))
            .unwrap_or(self.rows.len());
        let end = self.rows[..block]
            .iter()
            .rposition(|r| r.iter().any(|c| !c.trim().is_empty()))
            .map_or(0, |last| last + 1);
        &self.rows[..end]
    }

    pub fn participant_count(&self) -> usize {
        self.participants().len()
    }
}

pub fn read_roster(bytes: &[u8]) -> RosterResult<RosterTable> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e| RosterError::Workbook(format!("Failed to open roster: {}", e)))?;

    let range = workbook
        .worksheet_range(ROSTER_SHEET)
        .map_err(|e| RosterError::Workbook(format!("Failed to read roster sheet: {}", e)))?;

    let height = range.end().map(|(r, _)| r + 1).unwrap_or(0);
    let width = range
        .end()
        .map(|(_, c)| c + 1)
        .unwrap_or(0)
        .max(ROSTER_COLUMNS as u32);

    let read_row = |row: u32| -> Vec<String> {
        (0..width)
            .map(|col| range.get_value((row, col)).map(cell_text).unwrap_or_default())
            .collect()
    };

    let headers = read_row(0);
    let rows = (1..height).map(read_row).collect();

    Ok(RosterTable { headers, rows })
}
