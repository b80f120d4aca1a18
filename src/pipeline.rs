//! End-to-end run: booking export bytes in, roster archive bytes out
//!
//! The two boundaries are [`ingest`] (workbook → rows) and [`export`]
//! (groups → archive). [`generate`] chains them with grouping in between.
//! Everything here is synchronous and single pass.

use crate::archive::ArchivePackager;
use crate::config::RosterConfig;
use crate::error::RosterResult;
use crate::excel::{BookingImporter, InfoBlock, RosterExporter};
use crate::grouper::{group_rows, Grouping};
use crate::naming::FileNamer;
use crate::roster::RosterBuilder;
use crate::types::{Group, GroupKey, InputRow, SkippedRow};
use serde::Serialize;
use tracing::{debug, info};

/// One roster inside the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    pub file_name: String,
    pub key: GroupKey,
    pub participants: usize,
    pub size: usize,
}

#[derive(Debug, Clone)]
pub struct RosterArchive {
    pub entries: Vec<ArchiveEntry>,
    pub bytes: Vec<u8>,
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub rows_read: usize,
    pub skipped: Vec<SkippedRow>,
    pub archive: RosterArchive,
}

/// A group and the file name it will be written under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRoster {
    pub file_name: String,
    pub key: GroupKey,
    pub participants: usize,
}

/// Read the registration rows of an uploaded booking export
pub fn ingest(bytes: &[u8], config: &RosterConfig) -> RosterResult<Vec<InputRow>> {
    BookingImporter::new(config.sheet.clone()).import_bytes(bytes)
}

/// Group rows, applying the configured missing-start policy
pub fn group(rows: Vec<InputRow>, config: &RosterConfig) -> RosterResult<Grouping> {
    group_rows(rows, config.on_missing_start)
}

/// File names each group would get, without rendering anything
pub fn plan(groups: &[Group]) -> Vec<PlannedRoster> {
    let mut namer = FileNamer::new();
    groups
        .iter()
        .map(|g| PlannedRoster {
            file_name: namer.name_for(&g.key),
            key: g.key.clone(),
            participants: g.len(),
        })
        .collect()
}

/// Render one roster per group and bundle them
pub fn export(groups: &[Group], config: &RosterConfig) -> RosterResult<RosterArchive> {
    let mut builder = RosterBuilder::new(config);
    if config.include_static_block {
        let info = InfoBlock::resolve(config.template.as_ref())?;
        builder = builder.with_static_block(config.static_block_row, info);
    }

    let mut packager = ArchivePackager::new();
    let mut entries = Vec::with_capacity(groups.len());

    for (group, planned) in groups.iter().zip(plan(groups)) {
        let doc = builder.build(group);
        let bytes = RosterExporter::to_bytes(&doc)?;
        debug!(
            file = %planned.file_name,
            participants = planned.participants,
            bytes = bytes.len(),
            "rendered roster"
        );

        packager.add(&planned.file_name, &bytes)?;
        entries.push(ArchiveEntry {
            file_name: planned.file_name,
            key: planned.key,
            participants: planned.participants,
            size: bytes.len(),
        });
    }

    let bytes = packager.finish()?;
    Ok(RosterArchive { entries, bytes })
}

/// Booking export bytes → roster archive
pub fn generate(input: &[u8], config: &RosterConfig) -> RosterResult<GenerateOutcome> {
    let rows = ingest(input, config)?;
    let rows_read = rows.len();

    let grouping = group(rows, config)?;
    let archive = export(&grouping.groups, config)?;

    info!(
        rows = rows_read,
        rosters = archive.entries.len(),
        skipped = grouping.skipped.len(),
        "roster archive generated"
    );

    Ok(GenerateOutcome {
        rows_read,
        skipped: grouping.skipped,
        archive,
    })
}
