use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

/// Number of week rows in every grid, regardless of how many weeks the month spans.
pub const WEEKS_PER_GRID: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;

/// A single day slot of a month grid.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    /// True when `date` belongs to the grid's anchor month.
    pub in_scope: bool,
}

/// 6x7 matrix of days, Sunday-first columns.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    /// First day of the month this grid was built for.
    pub month: NaiveDate,
    pub weeks: [[GridDay; DAYS_PER_WEEK]; WEEKS_PER_GRID],
}

impl MonthGrid {
    /// Iterates over all 42 days in row-major order.
    pub fn days(&self) -> impl Iterator<Item = &GridDay> {
        self.weeks.iter().flat_map(|week| week.iter())
    }

    pub fn first_day(&self) -> NaiveDate {
        self.weeks[0][0].date
    }

    pub fn last_day(&self) -> NaiveDate {
        self.weeks[WEEKS_PER_GRID - 1][DAYS_PER_WEEK - 1].date
    }
}

/// Builds the fixed-size grid for the month containing `anchor`.
///
/// The first cell is the Sunday on or before the first of the month, so the
/// month is always fully covered and padded with days of the adjacent months.
/// Slots that fall outside chrono's date range hold the nearest representable
/// date and are never in scope.
pub fn build_month_grid(anchor: NaiveDate) -> MonthGrid {
    let month = first_of_month(anchor);
    let lead = i64::from(month.weekday().num_days_from_sunday());

    let weeks = std::array::from_fn(|row| {
        std::array::from_fn(|col| {
            let offset = (row * DAYS_PER_WEEK + col) as i64 - lead;
            let shifted = if offset >= 0 {
                month.checked_add_days(Days::new(offset.unsigned_abs()))
            } else {
                month.checked_sub_days(Days::new(offset.unsigned_abs()))
            };
            match shifted {
                Some(date) => GridDay {
                    date,
                    in_scope: same_month(date, month),
                },
                None => GridDay {
                    date: if offset < 0 { NaiveDate::MIN } else { NaiveDate::MAX },
                    in_scope: false,
                },
            }
        })
    });

    MonthGrid { month, weeks }
}

/// Resets `date` to the first day of its month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// True when both dates fall in the same month of the same year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// Moves `date` by a signed number of months, clamping the day to the length
/// of the target month. `None` when the result leaves chrono's date range.
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let step = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    }
}

/// Number of distinct months between `NaiveDate::MIN` and `NaiveDate::MAX`.
pub fn representable_months() -> u32 {
    let (min, max) = (NaiveDate::MIN, NaiveDate::MAX);
    let span = i64::from(max.year() - min.year()) * 12 + i64::from(max.month())
        - i64::from(min.month());
    u32::try_from(span + 1).unwrap_or(u32::MAX)
}
