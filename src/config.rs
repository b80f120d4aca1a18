//! Run configuration
//!
//! Everything a run depends on besides the uploaded export lives here,
//! including the location of the static template block. All fields are
//! defaulted so an empty YAML document is a valid configuration.

use crate::error::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Phrase the booking form uses when a participant declines the kit
pub const DEFAULT_DECLINED_KIT_PHRASE: &str = "No, I do not need a first aid kit";

/// What to do with a row whose start time is missing or unparseable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingStartPolicy {
    /// Leave the row out of every group and log a warning
    #[default]
    Skip,
    /// Fail the whole run
    Abort,
}

impl std::str::FromStr for MissingStartPolicy {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(MissingStartPolicy::Skip),
            "abort" => Ok(MissingStartPolicy::Abort),
            other => Err(RosterError::Config(format!(
                "unknown missing-start policy '{}' (expected 'skip' or 'abort')",
                other
            ))),
        }
    }
}

/// Location of the informational block inside a template workbook.
/// Rows are 1-based and inclusive, as shown in Excel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSource {
    pub path: PathBuf,
    #[serde(default = "default_template_sheet")]
    pub sheet: String,
    pub first_row: u32,
    pub last_row: u32,
}

fn default_template_sheet() -> String {
    "Template".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Sheet of the booking export that holds registrations
    pub sheet: String,
    pub declined_kit_phrase: String,
    pub textbook_label: String,
    pub include_static_block: bool,
    /// 0-based sheet row where the static block starts when the data fits above it
    pub static_block_row: u32,
    pub on_missing_start: MissingStartPolicy,
    pub template: Option<TemplateSource>,
    pub archive_name: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            sheet: "Main".to_string(),
            declined_kit_phrase: DEFAULT_DECLINED_KIT_PHRASE.to_string(),
            textbook_label: "Purchased".to_string(),
            include_static_block: true,
            static_block_row: 25,
            on_missing_start: MissingStartPolicy::Skip,
            template: None,
            archive_name: "Rosters.zip".to_string(),
        }
    }
}

impl RosterConfig {
    /// Load a configuration file. Relative template paths resolve against
    /// the directory of the configuration file.
    pub fn load(path: &Path) -> RosterResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;

        if let (Some(template), Some(dir)) = (config.template.as_mut(), path.parent()) {
            if template.path.is_relative() {
                template.path = dir.join(&template.path);
            }
        }

        Ok(config)
    }

    pub fn from_yaml(content: &str) -> RosterResult<Self> {
        let config: RosterConfig = if content.trim().is_empty() {
            RosterConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> RosterResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> RosterResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> RosterResult<()> {
        if self.sheet.trim().is_empty() {
            return Err(RosterError::Config("'sheet' must not be empty".to_string()));
        }
        if self.static_block_row == 0 {
            return Err(RosterError::Config(
                "'static_block_row' must be at least 1 (row 0 is the header)".to_string(),
            ));
        }
        if let Some(t) = &self.template {
            if t.first_row == 0 || t.last_row < t.first_row {
                return Err(RosterError::Config(format!(
                    "template rows {}..{} are not a valid 1-based range",
                    t.first_row, t.last_row
                )));
            }
        }
        Ok(())
    }
}
