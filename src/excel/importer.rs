//! Booking export importer - Excel (.xlsx) → input rows

use crate::error::{RosterError, RosterResult};
use crate::schema::{self, FieldSpec, ResolvedColumns, BOOKING_EXPORT_SCHEMA};
use crate::types::InputRow;
use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Text layouts accepted for the start column
const START_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Date-only layouts, read as midnight
const START_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Reads registrant rows from a booking export workbook
pub struct BookingImporter<'a> {
    sheet: String,
    schema: &'a [FieldSpec],
}

impl BookingImporter<'static> {
    /// Importer for `sheet` using the standard booking export schema
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            schema: BOOKING_EXPORT_SCHEMA,
        }
    }
}

impl<'a> BookingImporter<'a> {
    pub fn with_schema(sheet: impl Into<String>, schema: &'a [FieldSpec]) -> Self {
        Self {
            sheet: sheet.into(),
            schema,
        }
    }

    pub fn import_path(&self, path: &Path) -> RosterResult<Vec<InputRow>> {
        let bytes = std::fs::read(path)?;
        self.import_bytes(&bytes)
    }

    /// Parse an uploaded workbook held in memory
    pub fn import_bytes(&self, bytes: &[u8]) -> RosterResult<Vec<InputRow>> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e| RosterError::Workbook(format!("Failed to open Excel file: {}", e)))?;

        let sheet_names = workbook.sheet_names();
        if !sheet_names.iter().any(|s| s == &self.sheet) {
            return Err(RosterError::MissingSheet {
                sheet: self.sheet.clone(),
                available: sheet_names.join(", "),
            });
        }

        let range = workbook
            .worksheet_range(&self.sheet)
            .map_err(|e| RosterError::Workbook(format!("Failed to read sheet: {}", e)))?;

        self.read_rows(&range)
    }

    fn read_rows(&self, range: &Range<Data>) -> RosterResult<Vec<InputRow>> {
        let (Some((header_row, _)), Some((last_row, last_col))) = (range.start(), range.end())
        else {
            return Err(RosterError::Workbook(format!(
                "Sheet '{}' is empty",
                self.sheet
            )));
        };

        // Cells are addressed from column A so positional fallbacks hold
        // even when the leading columns are unused
        let read = |row: u32| -> Vec<Data> {
            (0..=last_col)
                .map(|col| range.get_value((row, col)).cloned().unwrap_or(Data::Empty))
                .collect()
        };

        let headers: Vec<String> = read(header_row).iter().map(cell_text).collect();
        let columns = schema::resolve(self.schema, &headers)?;
        debug!(?columns, "resolved booking export columns");

        let mut result = Vec::new();
        for row in (header_row + 1)..=last_row {
            let cells = read(row);
            if cells.iter().all(|c| matches!(c, Data::Empty)) {
                continue;
            }
            // Sheet row numbers are 1-based
            result.push(build_row(row as usize + 1, &cells, &columns));
        }

        Ok(result)
    }
}

fn build_row(row_number: usize, cells: &[Data], columns: &ResolvedColumns) -> InputRow {
    let text = |idx: usize| cells.get(idx).map(cell_text).unwrap_or_default();
    let optional = |idx: Option<usize>| {
        idx.map(text).filter(|value| !value.trim().is_empty())
    };

    let start_cell = cells.get(columns.start).unwrap_or(&Data::Empty);

    InputRow {
        row_number,
        first_name: text(columns.first_name).trim().to_string(),
        last_name: text(columns.last_name).trim().to_string(),
        course_type: text(columns.course_type),
        start: parse_start(start_cell),
        start_text: cell_text(start_cell),
        course_level: text(columns.course_level).trim().to_string(),
        textbook: optional(columns.textbook),
        kit: optional(columns.kit),
    }
}

/// Display text of a cell, as a spreadsheet user would read it
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::Error(e) => format!("#{:?}", e),
    }
}

/// Interpret a start cell. Native date-times, Excel serial numbers and
/// the textual layouts in `START_FORMATS` and `START_DATE_FORMATS` are
/// understood.
pub fn parse_start(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime().map(round_to_second),
        Data::Float(f) => from_excel_serial(*f),
        Data::Int(i) => from_excel_serial(*i as f64),
        Data::String(s) | Data::DateTimeIso(s) => parse_start_text(s),
        _ => None,
    }
}

pub fn parse_start_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    START_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            START_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Days since 1899-12-30, fractional part is the time of day
fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch
        .checked_add_signed(Duration::milliseconds(millis))
        .map(round_to_second)
}

fn round_to_second(dt: NaiveDateTime) -> NaiveDateTime {
    let rounded = dt.with_nanosecond(0).unwrap_or(dt);
    if dt.nanosecond() >= 500_000_000 {
        rounded + Duration::seconds(1)
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    // ==================== Start Parsing Tests ====================

    #[test]
    fn test_parse_iso_text() {
        assert_eq!(
            parse_start_text("2025-03-27 09:00:00"),
            Some(dt(2025, 3, 27, 9, 0))
        );
        assert_eq!(
            parse_start_text("2025-03-27T13:30"),
            Some(dt(2025, 3, 27, 13, 30))
        );
    }

    #[test]
    fn test_parse_us_text_with_meridiem() {
        assert_eq!(
            parse_start_text("03/27/2025 1:30 PM"),
            Some(dt(2025, 3, 27, 13, 30))
        );
    }

    #[test]
    fn test_parse_date_only_text_is_midnight() {
        assert_eq!(parse_start_text("2025-03-27"), Some(dt(2025, 3, 27, 0, 0)));
        assert_eq!(parse_start_text("03/27/2025"), Some(dt(2025, 3, 27, 0, 0)));
    }

    #[test]
    fn test_parse_garbage_text() {
        assert_eq!(parse_start_text("next tuesday"), None);
        assert_eq!(parse_start_text("   "), None);
    }

    #[test]
    fn test_parse_excel_serial() {
        // 45743 = 2025-03-27, .375 = 09:00
        assert_eq!(
            parse_start(&Data::Float(45743.375)),
            Some(dt(2025, 3, 27, 9, 0))
        );
        assert_eq!(parse_start(&Data::Int(45743)), Some(dt(2025, 3, 27, 0, 0)));
    }

    #[test]
    fn test_parse_empty_cell() {
        assert_eq!(parse_start(&Data::Empty), None);
        assert_eq!(parse_start(&Data::Bool(true)), None);
    }

    // ==================== Cell Text Tests ====================

    #[test]
    fn test_cell_text_variants() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("Ada".into())), "Ada");
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
    }

    // ==================== Column Addressing Tests ====================

    fn legacy_export(first_col: u16) -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Main").unwrap();
        let headers = [
            (first_col, "Start"),
            (first_col + 1, "First name (participant)"),
            (first_col + 2, "Last name (participant)"),
            (12, "Product Type"),
            (61, "Participant grade"),
        ];
        for (col, h) in headers {
            sheet.write_string(0, col, h).unwrap();
        }
        sheet.write_string(1, first_col, "2025-03-27 09:00:00").unwrap();
        sheet.write_string(1, first_col + 1, "Ada").unwrap();
        sheet.write_string(1, first_col + 2, "Lovelace").unwrap();
        sheet.write_string(1, 12, "CPR (Toronto)").unwrap();
        sheet.write_string(1, 61, "Level C").unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_positional_fallback_from_column_a() {
        let rows = BookingImporter::new("Main")
            .import_bytes(&legacy_export(0))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].course_type, "CPR (Toronto)");
        assert_eq!(rows[0].course_level, "Level C");
    }

    #[test]
    fn test_positional_fallback_with_empty_leading_columns() {
        let rows = BookingImporter::new("Main")
            .import_bytes(&legacy_export(2))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[0].first_name, "Ada");
        assert_eq!(rows[0].course_type, "CPR (Toronto)");
        assert_eq!(rows[0].course_level, "Level C");
        assert_eq!(rows[0].start, Some(dt(2025, 3, 27, 9, 0)));
    }

    #[test]
    fn test_import_rejects_non_workbook() {
        let importer = BookingImporter::new("Main");
        let err = importer.import_bytes(b"not a zip").unwrap_err();
        assert!(matches!(err, RosterError::Workbook(_)));
    }
}
