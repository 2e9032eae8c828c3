use crate::calc::month_grid::{same_month, GridDay};
use crate::widget::error::{CalendarError, CalendarResult};
use crate::widget::hooks::{CellContext, CellHook};
use crate::widget::store::DataStore;
use crate::widget::surface::Surface;
use chrono::{Datelike, NaiveDate};

/// One day slot of a rendered month view.
///
/// The visual node is built on the first call to [`DayCell::render`] and
/// reused afterwards. Cells are rebuilt on every widget render, so the cached
/// node never outlives the tree it belongs to.
#[derive(Debug)]
pub struct DayCell<N> {
    date: NaiveDate,
    scope_date: NaiveDate,
    in_scope: bool,
    element: Option<N>,
}

impl<N: Copy> DayCell<N> {
    /// The cell is in scope when `date` falls in the month of `scope_date`.
    /// Year and month are both compared, so the same month of a different
    /// year is not in scope.
    pub fn new(date: NaiveDate, scope_date: NaiveDate) -> Self {
        DayCell {
            date,
            scope_date,
            in_scope: same_month(date, scope_date),
            element: None,
        }
    }

    /// Builds a cell from raw year/month/day triples.
    pub fn try_from_ymd(cell: (i32, u32, u32), scope: (i32, u32, u32)) -> CalendarResult<Self> {
        let date = ymd(cell, "Cell Date")?;
        let scope_date = ymd(scope, "Scope Date")?;
        Ok(Self::new(date, scope_date))
    }

    pub fn from_grid_day(day: &GridDay, scope_date: NaiveDate) -> Self {
        DayCell {
            date: day.date,
            scope_date,
            in_scope: day.in_scope,
            element: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn scope_date(&self) -> NaiveDate {
        self.scope_date
    }

    pub fn in_scope(&self) -> bool {
        self.in_scope
    }

    /// The materialized node, if the cell has been rendered.
    pub fn element(&self) -> Option<N> {
        self.element
    }

    /// Returns the cell's container, building it on first use.
    pub fn render<S>(
        &mut self,
        surface: &mut S,
        store: &mut DataStore,
        hook: Option<&CellHook<S>>,
    ) -> N
    where
        S: Surface<Node = N>,
    {
        if let Some(element) = self.element {
            return element;
        }

        let container = surface.create_element("div");
        let span = surface.create_element("span");
        if self.in_scope {
            surface.set_attribute(container, "class", "scope");
        }
        surface.set_text(span, &self.date.day().to_string());
        surface.append_child(container, span);
        self.element = Some(container);

        if let Some(hook) = hook {
            let mut ctx = CellContext::new(
                surface,
                container,
                self.date,
                self.scope_date,
                self.in_scope,
                store,
            );
            hook(&mut ctx);
        }

        container
    }
}

fn ymd((y, m, d): (i32, u32, u32), what: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| {
        CalendarError::InvalidDate(format!(
            "{} is not defined or incorrect: {:04}-{:02}-{:02}",
            what, y, m, d
        ))
    })
}
