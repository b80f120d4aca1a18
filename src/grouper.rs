//! Partition rows into classes by (location, category, start)

use crate::config::MissingStartPolicy;
use crate::error::{RosterError, RosterResult};
use crate::extract::extract_category_location;
use crate::types::{Group, GroupKey, InputRow, SkippedRow};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    /// Sorted by key
    pub groups: Vec<Group>,
    pub skipped: Vec<SkippedRow>,
}

impl Grouping {
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

/// Group rows by class. Rows keep their export order inside each group.
pub fn group_rows(rows: Vec<InputRow>, policy: MissingStartPolicy) -> RosterResult<Grouping> {
    let mut buckets: BTreeMap<GroupKey, Vec<InputRow>> = BTreeMap::new();
    let mut skipped = Vec::new();

    for row in rows {
        let Some(start) = row.start else {
            match policy {
                MissingStartPolicy::Abort => {
                    return Err(RosterError::InvalidStartTime {
                        row: row.row_number,
                        value: row.start_text,
                    });
                }
                MissingStartPolicy::Skip => {
                    warn!(
                        row = row.row_number,
                        value = %row.start_text,
                        "skipping row with missing or unparseable start time"
                    );
                    skipped.push(SkippedRow {
                        row_number: row.row_number,
                        value: row.start_text,
                    });
                    continue;
                }
            }
        };

        let (category, location) = extract_category_location(&row.course_type);
        let key = GroupKey {
            location,
            category,
            start,
        };
        buckets.entry(key).or_default().push(row);
    }

    let groups = buckets
        .into_iter()
        .map(|(key, rows)| Group { key, rows })
        .collect();

    Ok(Grouping { groups, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 27)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn row(n: usize, course: &str, start: Option<NaiveDateTime>) -> InputRow {
        InputRow {
            row_number: n,
            first_name: format!("P{}", n),
            last_name: "Test".to_string(),
            course_type: course.to_string(),
            start,
            start_text: start.map(|s| s.to_string()).unwrap_or_default(),
            course_level: "Level C".to_string(),
            textbook: None,
            kit: None,
        }
    }

    #[test]
    fn test_levels_share_a_group() {
        let rows = vec![
            row(2, "First Aid & CPR/AED - Level C (Toronto)", Some(at(9, 0))),
            row(3, "First Aid & CPR/AED - Level A (Toronto)", Some(at(9, 0))),
        ];
        let grouping = group_rows(rows, MissingStartPolicy::Skip).unwrap();
        assert_eq!(grouping.groups.len(), 1);
        assert_eq!(grouping.groups[0].len(), 2);
        assert_eq!(grouping.groups[0].key.category, "First Aid & CPR/AED");
    }

    #[test]
    fn test_distinct_keys_split() {
        let rows = vec![
            row(2, "Babysitting (Toronto)", Some(at(9, 0))),
            row(3, "Babysitting (Toronto)", Some(at(13, 0))),
            row(4, "Babysitting (Ottawa)", Some(at(9, 0))),
            row(5, "Lifeguard (Toronto)", Some(at(9, 0))),
        ];
        let grouping = group_rows(rows, MissingStartPolicy::Skip).unwrap();
        assert_eq!(grouping.groups.len(), 4);
        assert_eq!(grouping.row_count(), 4);
    }

    #[test]
    fn test_groups_sorted_by_key() {
        let rows = vec![
            row(2, "Lifeguard (Toronto)", Some(at(9, 0))),
            row(3, "Babysitting (Toronto)", Some(at(13, 0))),
            row(4, "Babysitting (Ottawa)", Some(at(9, 0))),
            row(5, "Babysitting (Toronto)", Some(at(9, 0))),
        ];
        let grouping = group_rows(rows, MissingStartPolicy::Skip).unwrap();
        let keys: Vec<(&str, &str, NaiveDateTime)> = grouping
            .groups
            .iter()
            .map(|g| (g.key.location.as_str(), g.key.category.as_str(), g.key.start))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Ottawa", "Babysitting", at(9, 0)),
                ("Toronto", "Babysitting", at(9, 0)),
                ("Toronto", "Babysitting", at(13, 0)),
                ("Toronto", "Lifeguard", at(9, 0)),
            ]
        );
    }

    #[test]
    fn test_rows_keep_export_order() {
        let rows = vec![
            row(2, "Babysitting (Toronto)", Some(at(9, 0))),
            row(3, "Lifeguard (Toronto)", Some(at(9, 0))),
            row(4, "Babysitting (Toronto)", Some(at(9, 0))),
        ];
        let grouping = group_rows(rows, MissingStartPolicy::Skip).unwrap();
        let babysitting = &grouping.groups[0];
        let numbers: Vec<usize> = babysitting.rows.iter().map(|r| r.row_number).collect();
        assert_eq!(numbers, vec![2, 4]);
    }

    #[test]
    fn test_unknown_format_still_grouped() {
        let rows = vec![row(2, "Unrecognized Format", Some(at(9, 0)))];
        let grouping = group_rows(rows, MissingStartPolicy::Skip).unwrap();
        assert_eq!(grouping.groups[0].key.location, "Unknown");
        assert_eq!(grouping.groups[0].key.category, "Unknown");
    }

    #[test]
    fn test_missing_start_skipped() {
        let mut bad = row(3, "Babysitting (Toronto)", None);
        bad.start_text = "TBD".to_string();
        let rows = vec![row(2, "Babysitting (Toronto)", Some(at(9, 0))), bad];
        let grouping = group_rows(rows, MissingStartPolicy::Skip).unwrap();
        assert_eq!(grouping.row_count(), 1);
        assert_eq!(
            grouping.skipped,
            vec![SkippedRow {
                row_number: 3,
                value: "TBD".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_start_aborts() {
        let rows = vec![
            row(2, "Babysitting (Toronto)", Some(at(9, 0))),
            row(3, "Babysitting (Toronto)", None),
        ];
        let err = group_rows(rows, MissingStartPolicy::Abort).unwrap_err();
        assert!(matches!(err, RosterError::InvalidStartTime { row: 3, .. }));
    }

    #[test]
    fn test_no_rows_no_groups() {
        let grouping = group_rows(Vec::new(), MissingStartPolicy::Skip).unwrap();
        assert!(grouping.groups.is_empty());
        assert!(grouping.skipped.is_empty());
    }
}
