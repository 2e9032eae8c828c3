use crate::data::persistence::Persistable;
use crate::widget::options::{DEFAULT_DAY_NAMES, DEFAULT_MONTH_NAMES};
use crate::widget::{CalendarError, CalendarOptions, CalendarResult, Surface};
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Value of `start_date` that resolves to the current day.
pub const TODAY: &str = "today";

/// Calendar settings as written in calendar.yaml.
///
/// Every field is optional; whatever is present overrides the built-in
/// default for that key only.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CalendarSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_names: Option<Vec<String>>,
    /// `YYYY-MM-DD` or `today`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendars: Option<u32>,
    /// Copied into the widget's data store at construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, Value>>,
}

/// Wrapper that reads the `settings` key from calendar.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: CalendarSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "calendar.yaml"
    }
}

impl CalendarSettings {
    pub fn load() -> Result<Self> {
        Ok(SettingsWrapper::load()?.settings)
    }

    pub fn load_from(dir: &std::path::Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save_to(&self, dir: &std::path::Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }

    /// Fully spelled-out settings, written by `init`.
    pub fn defaults() -> Self {
        let mut data = HashMap::new();
        data.insert("marked".to_string(), Value::Array(Vec::new()));
        CalendarSettings {
            month_names: Some(DEFAULT_MONTH_NAMES.iter().map(|s| s.to_string()).collect()),
            day_names: Some(DEFAULT_DAY_NAMES.iter().map(|s| s.to_string()).collect()),
            start_date: Some(TODAY.to_string()),
            calendars: Some(1),
            data: Some(data),
        }
    }

    /// Per-key merge: fields set in `overrides` win.
    pub fn merge(self, overrides: CalendarSettings) -> CalendarSettings {
        CalendarSettings {
            month_names: overrides.month_names.or(self.month_names),
            day_names: overrides.day_names.or(self.day_names),
            start_date: overrides.start_date.or(self.start_date),
            calendars: overrides.calendars.or(self.calendars),
            data: overrides.data.or(self.data),
        }
    }

    /// Applies the settings over the widget defaults.
    pub fn into_options<S: Surface>(self, today: NaiveDate) -> CalendarResult<CalendarOptions<S>> {
        let mut options = CalendarOptions::<S>::default();
        if let Some(names) = self.month_names {
            options.month_names = names.try_into().map_err(|names: Vec<String>| {
                CalendarError::Configuration(format!(
                    "month_names needs 12 entries, got {}",
                    names.len()
                ))
            })?;
        }
        if let Some(names) = self.day_names {
            options.day_names = names.try_into().map_err(|names: Vec<String>| {
                CalendarError::Configuration(format!(
                    "day_names needs 7 entries, got {}",
                    names.len()
                ))
            })?;
        }
        options.start_date = match self.start_date {
            Some(raw) => Some(parse_start_date(&raw, today)?),
            None => Some(today),
        };
        if let Some(calendars) = self.calendars {
            options.calendars = calendars;
        }
        options.data = self.data;
        Ok(options)
    }
}

pub fn parse_start_date(raw: &str, today: NaiveDate) -> CalendarResult<NaiveDate> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(TODAY) {
        return Ok(today);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CalendarError::Configuration(format!(
            "Start Date is not defined or incorrect: '{raw}' (expected YYYY-MM-DD or '{TODAY}')"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::NodeTree;
    use serde_json::json;
    use tempfile::TempDir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn options(settings: CalendarSettings) -> CalendarResult<CalendarOptions<NodeTree>> {
        settings.into_options(d(2025, 3, 14))
    }

    #[test]
    fn test_empty_settings_use_widget_defaults() {
        let opts = options(CalendarSettings::default()).unwrap();
        assert_eq!(opts.month_names[0], "January");
        assert_eq!(opts.day_names[0], "Su");
        assert_eq!(opts.calendars, 1);
        assert_eq!(opts.start_date, Some(d(2025, 3, 14)));
        assert!(opts.data.is_none());
    }

    #[test]
    fn test_partial_settings_override_only_their_keys() {
        let settings = CalendarSettings {
            calendars: Some(3),
            start_date: Some("2024-02-15".to_string()),
            ..Default::default()
        };
        let opts = options(settings).unwrap();
        assert_eq!(opts.calendars, 3);
        assert_eq!(opts.start_date, Some(d(2024, 2, 15)));
        assert_eq!(opts.month_names[1], "February");
    }

    #[test]
    fn test_today_keyword() {
        assert_eq!(parse_start_date("today", d(2025, 3, 14)), Ok(d(2025, 3, 14)));
        assert_eq!(parse_start_date(" TODAY ", d(2025, 3, 14)), Ok(d(2025, 3, 14)));
    }

    #[test]
    fn test_invalid_start_date_is_configuration_error() {
        let settings = CalendarSettings {
            start_date: Some("2025-02-30".to_string()),
            ..Default::default()
        };
        let err = options(settings).unwrap_err();
        assert!(matches!(err, CalendarError::Configuration(_)));
        assert!(err.to_string().contains("2025-02-30"));
    }

    #[test]
    fn test_wrong_month_name_count_is_rejected() {
        let settings = CalendarSettings {
            month_names: Some(vec!["Jan".to_string(); 11]),
            ..Default::default()
        };
        let err = options(settings).unwrap_err();
        assert!(err.to_string().contains("got 11"));
    }

    #[test]
    fn test_wrong_day_name_count_is_rejected() {
        let settings = CalendarSettings {
            day_names: Some(vec!["D".to_string(); 8]),
            ..Default::default()
        };
        assert!(matches!(
            options(settings),
            Err(CalendarError::Configuration(_))
        ));
    }

    #[test]
    fn test_custom_day_names_applied() {
        let names: Vec<String> = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let settings = CalendarSettings {
            day_names: Some(names),
            ..Default::default()
        };
        let opts = options(settings).unwrap();
        assert_eq!(opts.day_names[2], "Di");
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = CalendarSettings {
            calendars: Some(2),
            start_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        let cli = CalendarSettings {
            calendars: Some(4),
            ..Default::default()
        };
        let merged = base.merge(cli);
        assert_eq!(merged.calendars, Some(4));
        assert_eq!(merged.start_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_defaults_resolve_cleanly() {
        let opts = options(CalendarSettings::defaults()).unwrap();
        assert_eq!(opts.start_date, Some(d(2025, 3, 14)));
        assert_eq!(opts.data.unwrap()["marked"], json!([]));
    }

    #[test]
    fn test_yaml_with_data_payload() {
        let yaml = r#"
settings:
  calendars: 2
  data:
    marked: ["2025-03-17", "2025-04-01"]
    owner: ops
"#;
        let wrapper: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(wrapper.settings.calendars, Some(2));
        let data = wrapper.settings.data.unwrap();
        assert_eq!(data["marked"], json!(["2025-03-17", "2025-04-01"]));
        assert_eq!(data["owner"], json!("ops"));
    }

    #[test]
    fn test_settings_wrapper_missing_key_uses_default() {
        let wrapper: SettingsWrapper = serde_norway::from_str("other: 1").unwrap();
        assert_eq!(wrapper.settings, CalendarSettings::default());
    }

    #[test]
    fn test_save_to_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let settings = CalendarSettings::defaults();
        settings.save_to(tmp.path()).unwrap();
        let loaded = CalendarSettings::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_unset_fields_are_not_written() {
        let settings = CalendarSettings {
            calendars: Some(2),
            ..Default::default()
        };
        let yaml = serde_norway::to_string(&SettingsWrapper { settings }).unwrap();
        assert!(yaml.contains("calendars: 2"));
        assert!(!yaml.contains("month_names"));
    }
}
