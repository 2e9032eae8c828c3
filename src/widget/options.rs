use crate::calc::month_grid::representable_months;
use crate::widget::error::{CalendarError, CalendarResult};
use crate::widget::hooks::{CellContext, CellHook, ViewContext, ViewHook};
use crate::widget::surface::Surface;
use chrono::{Local, NaiveDate};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

pub const DEFAULT_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const DEFAULT_DAY_NAMES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Construction-time configuration of a [`CalendarWidget`](super::CalendarWidget).
///
/// Every field has a default; callers override individual fields and leave
/// the rest alone:
///
/// ```ignore
/// let options = CalendarOptions::<NodeTree> {
///     calendars: 3,
///     ..Default::default()
/// };
/// ```
pub struct CalendarOptions<S: Surface> {
    pub month_names: [String; 12],
    /// Sunday first.
    pub day_names: [String; 7],
    /// Initial anchor. Defaults to today; `None` is rejected at construction.
    pub start_date: Option<NaiveDate>,
    /// Number of months shown side by side, also the navigation step.
    pub calendars: u32,
    pub on_render: Option<ViewHook<S>>,
    pub on_cell_render: Option<CellHook<S>>,
    /// Initial payload for the widget's data store. Moved out at construction.
    pub data: Option<HashMap<String, Value>>,
}

impl<S: Surface> Default for CalendarOptions<S> {
    fn default() -> Self {
        CalendarOptions {
            month_names: DEFAULT_MONTH_NAMES.map(String::from),
            day_names: DEFAULT_DAY_NAMES.map(String::from),
            start_date: Some(Local::now().date_naive()),
            calendars: 1,
            on_render: None,
            on_cell_render: None,
            data: None,
        }
    }
}

impl<S: Surface> fmt::Debug for CalendarOptions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarOptions")
            .field("month_names", &self.month_names)
            .field("day_names", &self.day_names)
            .field("start_date", &self.start_date)
            .field("calendars", &self.calendars)
            .field("on_render", &self.on_render.is_some())
            .field("on_cell_render", &self.on_cell_render.is_some())
            .field("data", &self.data)
            .finish()
    }
}

impl<S: Surface> CalendarOptions<S> {
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_calendars(mut self, calendars: u32) -> Self {
        self.calendars = calendars;
        self
    }

    pub fn with_data(mut self, data: HashMap<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn on_render(mut self, hook: impl Fn(&mut ViewContext<'_, S>) + 'static) -> Self {
        self.on_render = Some(Box::new(hook));
        self
    }

    pub fn on_cell_render(mut self, hook: impl Fn(&mut CellContext<'_, S>) + 'static) -> Self {
        self.on_cell_render = Some(Box::new(hook));
        self
    }

    /// Display name for a 1-based month number.
    pub fn month_name(&self, month: u32) -> &str {
        month
            .checked_sub(1)
            .and_then(|i| self.month_names.get(i as usize))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Checks the options and returns the start date to anchor on.
    pub(crate) fn validate(&self) -> CalendarResult<NaiveDate> {
        let start = self.start_date.ok_or_else(|| {
            CalendarError::Configuration("Start Date is not defined or incorrect".to_string())
        })?;
        if self.calendars == 0 {
            return Err(CalendarError::Configuration(
                "calendars must be at least 1".to_string(),
            ));
        }
        let limit = representable_months();
        if self.calendars > limit {
            return Err(CalendarError::Configuration(format!(
                "calendars must be at most {limit}, got {}",
                self.calendars
            )));
        }
        Ok(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::node_tree::NodeTree;

    type Options = CalendarOptions<NodeTree>;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.month_names[0], "January");
        assert_eq!(options.month_names[11], "December");
        assert_eq!(options.day_names[0], "Su");
        assert_eq!(options.day_names[6], "Sa");
        assert_eq!(options.calendars, 1);
        assert_eq!(options.start_date, Some(Local::now().date_naive()));
        assert!(options.on_render.is_none());
        assert!(options.on_cell_render.is_none());
        assert!(options.data.is_none());
    }

    #[test]
    fn test_struct_update_overrides_single_field() {
        let options = Options {
            calendars: 3,
            ..Default::default()
        };
        assert_eq!(options.calendars, 3);
        assert_eq!(options.day_names[1], "Mo");
    }

    #[test]
    fn test_month_name_lookup() {
        let options = Options::default();
        assert_eq!(options.month_name(1), "January");
        assert_eq!(options.month_name(12), "December");
        assert_eq!(options.month_name(0), "");
        assert_eq!(options.month_name(13), "");
    }

    #[test]
    fn test_validate_missing_start_date() {
        let options = Options {
            start_date: None,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(CalendarError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_zero_calendars() {
        let options = Options::default().with_calendars(0);
        assert!(matches!(
            options.validate(),
            Err(CalendarError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_more_calendars_than_months_exist() {
        let options = Options::default().with_calendars(4_000_000_000);
        let err = options.validate().unwrap_err();
        assert!(matches!(err, CalendarError::Configuration(_)));
        assert!(err.to_string().contains("4000000000"));
        let options = Options::default().with_calendars(representable_months());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_returns_start_date() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let options = Options::default().with_start_date(start);
        assert_eq!(options.validate(), Ok(start));
    }

    #[test]
    fn test_debug_hides_hooks() {
        let options = Options::default().on_cell_render(|_| {});
        let dbg = format!("{:?}", options);
        assert!(dbg.contains("on_cell_render: true"));
        assert!(dbg.contains("on_render: false"));
    }
}
