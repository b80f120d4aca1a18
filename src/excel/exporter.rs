//! Roster exporter - RosterDocument → styled .xlsx bytes

use super::template::OFFICE_NOTE_LABEL;
use crate::error::{RosterError, RosterResult};
use crate::types::{RosterDocument, StaticSection, ROSTER_COLUMNS, ROSTER_HEADERS};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

pub const ROSTER_SHEET: &str = "Roster";

const COLUMN_WIDTHS: [f64; ROSTER_COLUMNS] = [16.0, 18.0, 18.0, 24.0, 18.0, 22.0, 22.0, 32.0];
/// Height of the merged highlight block next to the office note, in rows
const OFFICE_BLOCK_ROWS: u32 = 4;

struct RosterFormats {
    header: Format,
    row_even: Format,
    row_odd: Format,
    static_text: Format,
    office_note: Format,
    office_block: Format,
}

impl RosterFormats {
    fn new() -> Self {
        let cell = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();

        Self {
            header: cell.clone().set_bold().set_background_color(0xD9D9D9),
            row_even: cell.clone().set_background_color(0xFFFFFF),
            row_odd: cell.set_background_color(0xF2F2F2),
            static_text: Format::new().set_bold(),
            office_note: Format::new()
                .set_bold()
                .set_background_color(0xFFFF00)
                .set_border(FormatBorder::Thin),
            office_block: Format::new()
                .set_background_color(0xFFF2CC)
                .set_border(FormatBorder::Thin),
        }
    }
}

/// Writes one roster per workbook
pub struct RosterExporter;

impl RosterExporter {
    /// Serialize a roster to .xlsx bytes
    pub fn to_bytes(doc: &RosterDocument) -> RosterResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let formats = RosterFormats::new();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(ROSTER_SHEET)?;

        Self::write_layout(worksheet)?;
        Self::write_header(worksheet, &formats)?;
        Self::write_rows(worksheet, doc, &formats)?;

        if let Some(section) = &doc.static_section {
            Self::write_static_section(worksheet, section, &formats)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| RosterError::Export(format!("Failed to save roster: {}", e)))
    }

    fn write_layout(worksheet: &mut Worksheet) -> RosterResult<()> {
        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }
        worksheet.set_row_height(0, 75)?;
        worksheet.set_freeze_panes(1, 0)?;
        worksheet.set_landscape();
        worksheet.set_print_fit_to_pages(1, 0);
        Ok(())
    }

    fn write_header(worksheet: &mut Worksheet, formats: &RosterFormats) -> RosterResult<()> {
        for (col, label) in ROSTER_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *label, &formats.header)?;
        }
        Ok(())
    }

    fn write_rows(
        worksheet: &mut Worksheet,
        doc: &RosterDocument,
        formats: &RosterFormats,
    ) -> RosterResult<()> {
        for (idx, row) in doc.rows.iter().enumerate() {
            let sheet_row = idx as u32 + 1;
            let format = if idx % 2 == 0 {
                &formats.row_even
            } else {
                &formats.row_odd
            };

            for (col, value) in row.cells().iter().enumerate() {
                if value.is_empty() {
                    worksheet.write_blank(sheet_row, col as u16, format)?;
                } else {
                    worksheet.write_string_with_format(sheet_row, col as u16, *value, format)?;
                }
            }
        }
        Ok(())
    }

    fn write_static_section(
        worksheet: &mut Worksheet,
        section: &StaticSection,
        formats: &RosterFormats,
    ) -> RosterResult<()> {
        let mut row = section.start_row;

        for line in &section.instructions {
            worksheet.write_string_with_format(row, 0, line, &formats.static_text)?;
            row += 1;
        }
        row += 1;

        for cells in &section.info {
            for (col, value) in cells.iter().enumerate().take(ROSTER_COLUMNS) {
                if !value.is_empty() {
                    worksheet.write_string_with_format(row, col as u16, value, &formats.static_text)?;
                }
            }
            row += 1;
        }

        let note_row = section.office_note_row();
        worksheet.write_string_with_format(note_row, 0, OFFICE_NOTE_LABEL, &formats.office_note)?;
        worksheet.merge_range(
            note_row,
            1,
            note_row + OFFICE_BLOCK_ROWS - 1,
            (ROSTER_COLUMNS - 1) as u16,
            "",
            &formats.office_block,
        )?;

        Ok(())
    }
}
