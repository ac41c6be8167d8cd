use crate::data::persistence::Persistable;
use crate::data::range::{DEFAULT_DATE_FORMAT, DEFAULT_PLACEHOLDER};
use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Two-letter weekday header for a seven-column grid.
    pub fn header(self) -> &'static str {
        match self {
            WeekStart::Sunday => "Su Mo Tu We Th Fr Sa",
            WeekStart::Monday => "Mo Tu We Th Fr Sa Su",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PickerSettings {
    pub placeholder: String,
    /// chrono `strftime` pattern used on the trigger label.
    pub date_format: String,
    pub week_start: WeekStart,
}

impl Default for PickerSettings {
    fn default() -> Self {
        PickerSettings {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            week_start: WeekStart::Sunday,
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: PickerSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl PickerSettings {
    /// Loads `settings` from `dir/config.yaml`, rejecting a `date_format`
    /// chrono cannot render.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let settings = SettingsWrapper::load_from(dir)?.settings;
        check_date_format(&settings.date_format).with_context(|| {
            format!(
                "invalid settings in {}",
                dir.join(SettingsWrapper::filename()).display()
            )
        })?;
        Ok(settings)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }
}

/// Fails when `fmt` holds a specifier chrono does not know, or one a bare
/// date cannot fill (hours, offsets).
pub fn check_date_format(fmt: &str) -> Result<()> {
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        bail!("date_format '{}' is not a valid strftime pattern", fmt);
    }
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let mut rendered = String::new();
    if write!(rendered, "{}", sample.format(fmt)).is_err() {
        bail!("date_format '{}' needs more than a calendar date", fmt);
    }
    Ok(())
}
