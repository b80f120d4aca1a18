use crate::archive::read_entries;
use crate::config::{MissingStartPolicy, RosterConfig};
use crate::error::RosterResult;
use crate::excel::read_roster;
use crate::pipeline::{self, PlannedRoster};
use crate::types::SkippedRow;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Options of the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub config: Option<PathBuf>,
    pub on_missing_start: Option<MissingStartPolicy>,
    pub no_static_block: bool,
    pub verbose: bool,
}

/// Config file plus command line overrides
fn effective_config(options: &GenerateOptions) -> RosterResult<RosterConfig> {
    let mut config = RosterConfig::load_or_default(options.config.as_deref())?;
    if let Some(policy) = options.on_missing_start {
        config.on_missing_start = policy;
    }
    if options.no_static_block {
        config.include_static_block = false;
    }
    Ok(config)
}

fn format_bytes(n: usize) -> String {
    if n < 1024 {
        format!("{} B", n)
    } else {
        format!("{:.1} KB", n as f64 / 1024.0)
    }
}

fn print_skipped(skipped: &[SkippedRow]) {
    if skipped.is_empty() {
        return;
    }
    println!(
        "{}",
        format!("⚠️  Skipped {} row(s) without a usable start time:", skipped.len()).yellow()
    );
    for row in skipped {
        let value = if row.value.is_empty() {
            "(blank)"
        } else {
            row.value.as_str()
        };
        println!("      row {}: {}", row.row_number, value);
    }
    println!();
}

fn print_plan(planned: &[PlannedRoster]) {
    for roster in planned {
        println!(
            "   📋 {} ({} participant{})",
            roster.file_name.bright_blue(),
            roster.participants,
            if roster.participants == 1 { "" } else { "s" }
        );
    }
}

/// Execute the generate command
pub fn generate(input: PathBuf, output: PathBuf, options: GenerateOptions) -> RosterResult<()> {
    println!("{}", "📚 Roster - Generating class rosters".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    let config = effective_config(&options)?;

    if options.verbose {
        println!("{}", "📖 Reading booking export...".cyan());
    }

    let bytes = fs::read(&input)?;
    let outcome = pipeline::generate(&bytes, &config)?;

    if options.verbose {
        println!("   Read {} registration rows\n", outcome.rows_read);
    }

    print_skipped(&outcome.skipped);

    fs::write(&output, &outcome.archive.bytes)?;

    println!(
        "{}",
        format!("✅ Generated {} roster(s)", outcome.archive.entries.len())
            .bold()
            .green()
    );
    for entry in &outcome.archive.entries {
        println!(
            "   📋 {} ({} participants, {})",
            entry.file_name.bright_blue(),
            entry.participants,
            format_bytes(entry.size)
        );
    }
    println!(
        "\n   Archive: {} ({})\n",
        output.display(),
        format_bytes(outcome.archive.bytes.len())
    );

    Ok(())
}

/// Execute the groups command: show what generate would produce
pub fn groups(input: PathBuf, config_path: Option<PathBuf>) -> RosterResult<()> {
    println!("{}", "📚 Roster - Class groups".bold().green());
    println!("   Input: {}\n", input.display());

    let config = RosterConfig::load_or_default(config_path.as_deref())?;
    let bytes = fs::read(&input)?;
    let rows = pipeline::ingest(&bytes, &config)?;
    let rows_read = rows.len();
    let grouping = pipeline::group(rows, &config)?;

    print_skipped(&grouping.skipped);

    let planned = pipeline::plan(&grouping.groups);
    println!(
        "{}",
        format!(
            "✅ {} row(s) in {} class(es)",
            rows_read - grouping.skipped.len(),
            planned.len()
        )
        .bold()
        .green()
    );
    print_plan(&planned);
    println!();

    Ok(())
}

/// Execute the inspect command: list rosters inside an archive
pub fn inspect(archive: PathBuf) -> RosterResult<()> {
    println!("{}", "📚 Roster - Archive contents".bold().green());
    println!("   Archive: {}\n", archive.display());

    let bytes = fs::read(&archive)?;
    let entries = read_entries(&bytes)?;

    let mut total = 0;
    for (name, content) in &entries {
        match read_roster(content) {
            Ok(table) => {
                total += table.participant_count();
                println!(
                    "   📋 {} ({} participants, {})",
                    name.bright_blue(),
                    table.participant_count(),
                    format_bytes(content.len())
                );
            }
            Err(e) => {
                println!("   ❌ {} ({})", name.red(), e);
            }
        }
    }

    println!(
        "\n{}",
        format!("✅ {} roster(s), {} participant(s)", entries.len(), total)
            .bold()
            .green()
    );

    Ok(())
}

/// Execute the config command: print or write the default configuration
pub fn config(output: Option<PathBuf>) -> RosterResult<()> {
    let yaml = RosterConfig::default().to_yaml()?;
    match output {
        Some(path) => {
            write_config(&path, &yaml)?;
            println!(
                "{}",
                format!("✅ Default configuration written to {}", path.display())
                    .bold()
                    .green()
            );
        }
        None => print!("{}", yaml),
    }
    Ok(())
}

fn write_config(path: &Path, yaml: &str) -> RosterResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, yaml)?;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
