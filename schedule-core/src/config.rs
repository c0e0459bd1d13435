//! schedule-builder configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    DEFAULT_CALENDAR_NAME, DEFAULT_OUTPUT_FILE, DEFAULT_PRODUCT_ID, DEFAULT_TIMEZONE,
    DEFAULT_UID_NAMESPACE,
};
use crate::dataset::expand_path;
use crate::date_layout::{DateLayout, DateValidation};
use crate::error::{ScheduleError, ScheduleResult};
use crate::ics::{CalendarOptions, LineEnding};
use crate::selection::GroupDefinition;

static DEFAULT_DATA_PATH: &str = "data.json";

/// Prefix for environment overrides, e.g. `SCHEDULE_DATA_PATH`
static ENV_PREFIX: &str = "SCHEDULE";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

fn default_product_id() -> String {
    DEFAULT_PRODUCT_ID.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_uid_namespace() -> String {
    DEFAULT_UID_NAMESPACE.to_string()
}

fn default_true() -> bool {
    true
}

/// Configuration at ~/.config/schedule-builder/config.toml
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// JSON file with the course sessions
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Where `build` writes the calendar
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    #[serde(default = "default_product_id")]
    pub product_id: String,

    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_true")]
    pub include_timezone: bool,

    #[serde(default)]
    pub date_layout: DateLayout,

    /// Reject impossible dates and times instead of copying them through
    #[serde(default)]
    pub strict_dates: bool,

    #[serde(default = "default_uid_namespace")]
    pub uid_namespace: String,

    #[serde(default)]
    pub line_ending: LineEnding,

    /// Checklist sections, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupDefinition>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            data_path: default_data_path(),
            output_path: default_output_path(),
            calendar_name: default_calendar_name(),
            product_id: default_product_id(),
            timezone: default_timezone(),
            include_timezone: true,
            date_layout: DateLayout::default(),
            strict_dates: false,
            uid_namespace: default_uid_namespace(),
            line_ending: LineEnding::default(),
            groups: Vec::new(),
        }
    }
}

impl ScheduleConfig {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join("schedule-builder");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, creating a commented default file on first run.
    pub fn load() -> ScheduleResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional) with `SCHEDULE_*` environment overrides.
    pub fn load_from(path: &Path) -> ScheduleResult<Self> {
        let config: ScheduleConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| ScheduleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ScheduleError::Config(e.to_string()))?;

        config.calendar_options().validate()?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save the config to `path`.
    pub fn save(&self, path: &Path) -> ScheduleResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ScheduleError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ScheduleResult<()> {
        let contents = format!(
            "\
# schedule-builder configuration

# JSON file with the course sessions:
# data_path = \"{DEFAULT_DATA_PATH}\"

# Where the calendar is written:
# output_path = \"{DEFAULT_OUTPUT_FILE}\"

# Layout of the dates in the data file, \"slash\" (25/12/2024) or \"dash\" (25-12-2024):
# date_layout = \"slash\"

# Reject impossible dates and times instead of copying them into the calendar:
# strict_dates = false

# Calendar metadata:
# calendar_name = \"{DEFAULT_CALENDAR_NAME}\"
# timezone = \"{DEFAULT_TIMEZONE}\"
# include_timezone = true
# uid_namespace = \"{DEFAULT_UID_NAMESPACE}\"
# line_ending = \"crlf\"

# Checklist sections:
# [[groups]]
# name = \"Year 1\"
# courses = [\"CS101\", \"MA201\"]
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        expand_path(&self.data_path)
    }

    pub fn output_path(&self) -> PathBuf {
        expand_path(&self.output_path)
    }

    pub fn calendar_options(&self) -> CalendarOptions {
        CalendarOptions {
            product_id: self.product_id.clone(),
            calendar_name: self.calendar_name.clone(),
            timezone: self.timezone.clone(),
            include_timezone: self.include_timezone,
            date_layout: self.date_layout,
            validation: if self.strict_dates {
                DateValidation::Strict
            } else {
                DateValidation::Lenient
            },
            uid_namespace: self.uid_namespace.clone(),
            line_ending: self.line_ending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        ScheduleConfig::create_default_config(&path).unwrap();
        let config = ScheduleConfig::load_from(&path).unwrap();

        assert_eq!(config, ScheduleConfig::default());
        assert_eq!(config.calendar_options(), CalendarOptions::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScheduleConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.output_path, PathBuf::from("calendar.ics"));
    }

    #[test]
    fn test_multiline_header_value_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "calendar_name = \"\"\"\nCourses\nMETHOD:CANCEL\"\"\"\n",
        )
        .unwrap();

        let err = ScheduleConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)));
        assert!(err.to_string().contains("calendar_name"), "{err}");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = ScheduleConfig {
            date_layout: DateLayout::Dash,
            strict_dates: true,
            line_ending: LineEnding::Lf,
            groups: vec![GroupDefinition {
                name: "Year 1".to_string(),
                courses: vec!["CS101".to_string(), "MA201".to_string()],
            }],
            ..ScheduleConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = ScheduleConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let options = loaded.calendar_options();
        assert_eq!(options.date_layout, DateLayout::Dash);
        assert_eq!(options.validation, DateValidation::Strict);
        assert_eq!(options.line_ending, LineEnding::Lf);
    }
}
