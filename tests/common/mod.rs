//! Booking export fixtures built in memory
#![allow(dead_code)]

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

#[derive(Clone, Copy)]
pub enum Start<'a> {
    /// Text cell, e.g. "2025-03-27 09:00:00"
    Text(&'a str),
    /// Real date-time cell with a date number format
    Native(&'a str),
    Blank,
}

#[derive(Clone, Copy)]
pub struct Registrant<'a> {
    pub start: Start<'a>,
    pub course_type: &'a str,
    pub first: &'a str,
    pub last: &'a str,
    pub level: &'a str,
    pub textbook: Option<&'a str>,
    pub kit: Option<&'a str>,
}

/// Registrant with a text start; an empty start leaves the cell blank
pub fn registrant<'a>(
    start: &'a str,
    course_type: &'a str,
    first: &'a str,
    last: &'a str,
) -> Registrant<'a> {
    Registrant {
        start: if start.is_empty() {
            Start::Blank
        } else {
            Start::Text(start)
        },
        course_type,
        first,
        last,
        level: "Level C",
        textbook: None,
        kit: None,
    }
}

pub const HEADERS: [&str; 9] = [
    "Booking number",
    "Start",
    "Course Type",
    "First name (participant)",
    "Last name (participant)",
    "Email",
    "Course Level",
    "Textbook",
    "First Aid Kit",
];

/// Booking export with the standard headers on sheet `Main`
pub fn booking_export(rows: &[Registrant]) -> Vec<u8> {
    booking_export_with(&HEADERS, "Main", rows)
}

/// Booking export with custom headers; columns follow the `HEADERS` order
pub fn booking_export_with(headers: &[&str], sheet_name: &str, rows: &[Registrant]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).unwrap();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm");

    for (col, h) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *h).unwrap();
    }

    for (idx, r) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_number(row, 0, 1000.0 + idx as f64).unwrap();
        match r.start {
            Start::Text(s) => {
                sheet.write_string(row, 1, s).unwrap();
            }
            Start::Native(s) => {
                let dt = ExcelDateTime::parse_from_str(s).unwrap();
                sheet.write_datetime_with_format(row, 1, &dt, &date_format).unwrap();
            }
            Start::Blank => {}
        }
        let cells = [
            (2, Some(r.course_type)),
            (3, Some(r.first)),
            (4, Some(r.last)),
            (5, Some("someone@example.com")),
            (6, Some(r.level)),
            (7, r.textbook),
            (8, r.kit),
        ];
        for (col, value) in cells {
            if (col as usize) < headers.len() {
                if let Some(v) = value.filter(|v| !v.is_empty()) {
                    sheet.write_string(row, col, v).unwrap();
                }
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}
