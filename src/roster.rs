//! Per-class roster construction
//!
//! Turns a [`Group`] into a [`RosterDocument`]: one line per participant
//! with derived kit and textbook status, and the static instruction block
//! placed at a fixed row when the class is small enough.

use crate::config::RosterConfig;
use crate::excel::template::{InfoBlock, INSTRUCTIONS};
use crate::types::{Group, InputRow, RosterDocument, RosterRow, StaticSection};

pub struct RosterBuilder {
    declined_kit_phrase: String,
    textbook_label: String,
    static_block: Option<(u32, InfoBlock)>,
}

impl RosterBuilder {
    /// Builder without a static block
    pub fn new(config: &RosterConfig) -> Self {
        Self {
            declined_kit_phrase: config.declined_kit_phrase.clone(),
            textbook_label: config.textbook_label.clone(),
            static_block: None,
        }
    }

    /// Append `info` below every roster, starting at the configured row
    pub fn with_static_block(mut self, static_block_row: u32, info: InfoBlock) -> Self {
        self.static_block = Some((static_block_row, info));
        self
    }

    pub fn build(&self, group: &Group) -> RosterDocument {
        let rows: Vec<RosterRow> = group.rows.iter().map(|r| self.build_row(r)).collect();

        let static_section = self.static_block.as_ref().map(|(offset, info)| {
            // Header sits on row 0, so data occupies rows 1..=len
            let after_data = rows.len() as u32 + 1;
            StaticSection {
                start_row: (*offset).max(after_data),
                instructions: INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
                info: info.rows.clone(),
            }
        });

        RosterDocument {
            rows,
            static_section,
        }
    }

    fn build_row(&self, row: &InputRow) -> RosterRow {
        RosterRow {
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            course: row.course_level.clone(),
            kit_status: kit_status(row.kit.as_deref(), &self.declined_kit_phrase),
            textbook_status: textbook_status(row.textbook.as_deref(), &self.textbook_label),
        }
    }
}

/// Blank when the participant declined the kit, the raw answer otherwise
pub fn kit_status(value: Option<&str>, declined_phrase: &str) -> String {
    match value {
        Some(v) if v.trim().is_empty() => String::new(),
        Some(v)
            if !declined_phrase.is_empty()
                && v.to_lowercase().contains(&declined_phrase.to_lowercase()) =>
        {
            String::new()
        }
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// Any non-blank textbook answer means the book was bought
pub fn textbook_status(value: Option<&str>, label: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => label.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DECLINED_KIT_PHRASE;
    use crate::types::GroupKey;
    use chrono::NaiveDate;

    fn group(size: usize) -> Group {
        let start = NaiveDate::from_ymd_opt(2025, 3, 27)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Group {
            key: GroupKey {
                location: "Toronto".to_string(),
                category: "First Aid & CPR/AED".to_string(),
                start,
            },
            rows: (0..size)
                .map(|i| InputRow {
                    row_number: i + 2,
                    first_name: format!("First{}", i),
                    last_name: format!("Last{}", i),
                    course_type: "First Aid & CPR/AED - Level C (Toronto)".to_string(),
                    start: Some(start),
                    start_text: "2025-03-27 09:00:00".to_string(),
                    course_level: "Level C".to_string(),
                    textbook: None,
                    kit: None,
                })
                .collect(),
        }
    }

    // ==================== Kit Status Tests ====================

    #[test]
    fn test_kit_declined_phrase_is_blank() {
        assert_eq!(
            kit_status(Some(DEFAULT_DECLINED_KIT_PHRASE), DEFAULT_DECLINED_KIT_PHRASE),
            ""
        );
    }

    #[test]
    fn test_kit_declined_phrase_inside_longer_answer() {
        let answer = format!("{} - thanks", DEFAULT_DECLINED_KIT_PHRASE.to_uppercase());
        assert_eq!(kit_status(Some(&answer), DEFAULT_DECLINED_KIT_PHRASE), "");
    }

    #[test]
    fn test_kit_other_value_passes_through() {
        assert_eq!(
            kit_status(Some("Yes - add kit ($25)"), DEFAULT_DECLINED_KIT_PHRASE),
            "Yes - add kit ($25)"
        );
    }

    #[test]
    fn test_kit_missing_is_blank() {
        assert_eq!(kit_status(None, DEFAULT_DECLINED_KIT_PHRASE), "");
        assert_eq!(kit_status(Some("   "), DEFAULT_DECLINED_KIT_PHRASE), "");
    }

    // ==================== Textbook Status Tests ====================

    #[test]
    fn test_textbook_present_is_purchased() {
        assert_eq!(textbook_status(Some("1"), "Purchased"), "Purchased");
        assert_eq!(textbook_status(Some("Digital"), "Purchased"), "Purchased");
    }

    #[test]
    fn test_textbook_blank_is_blank() {
        assert_eq!(textbook_status(None, "Purchased"), "");
        assert_eq!(textbook_status(Some(" "), "Purchased"), "");
    }

    // ==================== Builder Tests ====================

    #[test]
    fn test_build_preserves_order_and_fields() {
        let mut g = group(3);
        g.rows[1].kit = Some("Yes".to_string());
        g.rows[2].textbook = Some("Printed".to_string());

        let doc = RosterBuilder::new(&RosterConfig::default()).build(&g);
        assert_eq!(doc.participant_count(), 3);
        assert!(doc.static_section.is_none());
        assert_eq!(doc.rows[0].first_name, "First0");
        assert_eq!(doc.rows[2].last_name, "Last2");
        assert_eq!(doc.rows[1].kit_status, "Yes");
        assert_eq!(doc.rows[2].textbook_status, "Purchased");
        assert_eq!(doc.rows[0].course, "Level C");
    }

    #[test]
    fn test_static_block_at_fixed_row_for_small_class() {
        let builder = RosterBuilder::new(&RosterConfig::default())
            .with_static_block(25, InfoBlock::default());
        let doc = builder.build(&group(4));
        let section = doc.static_section.unwrap();
        assert_eq!(section.start_row, 25);
        assert_eq!(section.instructions.len(), INSTRUCTIONS.len());
        assert_eq!(section.info, InfoBlock::default().rows);
    }

    #[test]
    fn test_static_block_follows_large_class() {
        let builder = RosterBuilder::new(&RosterConfig::default())
            .with_static_block(25, InfoBlock::default());
        let doc = builder.build(&group(30));
        // 30 participants fill rows 1..=30
        assert_eq!(doc.static_section.unwrap().start_row, 31);
    }

    #[test]
    fn test_static_block_exact_fit() {
        let builder = RosterBuilder::new(&RosterConfig::default())
            .with_static_block(25, InfoBlock::default());
        let doc = builder.build(&group(24));
        assert_eq!(doc.static_section.unwrap().start_row, 25);
    }
}
