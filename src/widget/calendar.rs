use crate::calc::month_grid::{build_month_grid, first_of_month, shift_months};
use crate::widget::cell::DayCell;
use crate::widget::error::CalendarResult;
use crate::widget::hooks::ViewContext;
use crate::widget::options::CalendarOptions;
use crate::widget::store::DataStore;
use crate::widget::surface::{NavAction, Surface};
use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetState {
    Uninitialized,
    Rendered,
}

/// A row of month views with previous/next navigation.
///
/// The widget does not own its surface: every operation that touches the
/// element tree takes it as a parameter, and the widget only remembers the
/// container node it renders into.
pub struct CalendarWidget<S: Surface> {
    options: CalendarOptions<S>,
    /// First day of the leftmost visible month.
    anchor: NaiveDate,
    store: DataStore,
    container: S::Node,
    state: WidgetState,
}

impl<S: Surface> CalendarWidget<S> {
    /// Validates `options`, moves the initial data payload into the store and
    /// performs the first render into `container`.
    ///
    /// On error the surface is left untouched.
    pub fn new(
        mut options: CalendarOptions<S>,
        surface: &mut S,
        container: S::Node,
    ) -> CalendarResult<Self> {
        let start = options.validate()?;
        let mut store = DataStore::new();
        if let Some(payload) = options.data.take() {
            store.extend(payload);
        }

        let mut widget = CalendarWidget {
            anchor: fit_anchor(first_of_month(start), options.calendars),
            options,
            store,
            container,
            state: WidgetState::Uninitialized,
        };
        debug!(
            anchor = %widget.anchor,
            calendars = widget.options.calendars,
            "calendar widget constructed"
        );
        widget.render(surface);
        Ok(widget)
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn options(&self) -> &CalendarOptions<S> {
        &self.options
    }

    pub fn container(&self) -> S::Node {
        self.container
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.store.set_data(key, value);
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.store.get_data(key)
    }

    fn step(&self) -> i32 {
        i32::try_from(self.options.calendars).unwrap_or(i32::MAX)
    }

    /// First days of the months currently on screen, left to right.
    pub fn visible_months(&self) -> Vec<NaiveDate> {
        (0..self.step())
            .filter_map(|offset| shift_months(self.anchor, offset))
            .collect()
    }

    /// Tears down the container's children and rebuilds every month view.
    pub fn render(&mut self, surface: &mut S) {
        surface.clear_children(self.container);

        let wrapper = surface.create_element("table");
        let row = surface.create_element("tr");
        let months = self.visible_months();
        let last = months.len().saturating_sub(1);
        for (i, month) in months.into_iter().enumerate() {
            let td = surface.create_element("td");
            let view = self.render_month(surface, month, i == 0, i == last);
            surface.append_child(td, view);
            surface.append_child(row, td);
        }
        surface.append_child(wrapper, row);
        surface.set_attribute(wrapper, "class", "calendar-wrapper");
        surface.append_child(self.container, wrapper);

        self.state = WidgetState::Rendered;
        trace!(anchor = %self.anchor, "calendar rendered");
    }

    /// Moves back by the number of visible months and re-renders. Stays put
    /// when that would leave chrono's date range.
    pub fn previous(&mut self, surface: &mut S) {
        match shift_months(self.anchor, -self.step()) {
            Some(anchor) => {
                self.anchor = anchor;
                debug!(anchor = %self.anchor, "navigated to previous months");
            }
            None => debug!(anchor = %self.anchor, "already at the first representable month"),
        }
        self.render(surface);
    }

    /// Moves forward by the number of visible months and re-renders. Stays put
    /// when the last view would leave chrono's date range.
    pub fn next(&mut self, surface: &mut S) {
        let step = self.step();
        let target = shift_months(self.anchor, step)
            .filter(|anchor| shift_months(*anchor, step - 1).is_some());
        match target {
            Some(anchor) => {
                self.anchor = anchor;
                debug!(anchor = %self.anchor, "navigated to next months");
            }
            None => debug!(anchor = %self.anchor, "already at the last representable months"),
        }
        self.render(surface);
    }

    pub fn dispatch(&mut self, surface: &mut S, action: NavAction) {
        match action {
            NavAction::Previous => self.previous(surface),
            NavAction::Next => self.next(surface),
        }
    }

    /// Runs the action bound to `node`, if any. Returns whether one ran.
    pub fn activate(&mut self, surface: &mut S, node: S::Node) -> bool {
        match surface.action(node) {
            Some(action) => {
                self.dispatch(surface, action);
                true
            }
            None => false,
        }
    }

    fn render_month(
        &mut self,
        surface: &mut S,
        month: NaiveDate,
        show_prev: bool,
        show_next: bool,
    ) -> S::Node {
        let grid = build_month_grid(month);

        let table = surface.create_element("table");
        let thead = self.render_head(surface, month, show_prev, show_next);
        let tfoot = surface.create_element("tfoot");
        let tbody = surface.create_element("tbody");
        surface.set_attribute(table, "class", "calendar");

        for week in &grid.weeks {
            let tr = surface.create_element("tr");
            for day in week {
                let td = surface.create_element("td");
                let mut cell = DayCell::from_grid_day(day, grid.month);
                let node = cell.render(surface, &mut self.store, self.options.on_cell_render.as_ref());
                surface.append_child(td, node);
                surface.append_child(tr, td);
            }
            surface.append_child(tbody, tr);
        }
        surface.append_child(table, thead);
        surface.append_child(table, tfoot);
        surface.append_child(table, tbody);

        if let Some(hook) = &self.options.on_render {
            let mut ctx = ViewContext::new(surface, table, grid.month, &mut self.store);
            hook(&mut ctx);
        }
        table
    }

    fn render_head(
        &self,
        surface: &mut S,
        month: NaiveDate,
        show_prev: bool,
        show_next: bool,
    ) -> S::Node {
        let thead = surface.create_element("thead");
        let first_tr = surface.create_element("tr");
        let second_tr = surface.create_element("tr");
        let prev_td = surface.create_element("td");
        let month_td = surface.create_element("td");
        let next_td = surface.create_element("td");

        if show_prev {
            let prev_btn = surface.create_element("span");
            surface.set_text(prev_btn, "Previous");
            surface.bind_action(prev_btn, NavAction::Previous);
            surface.set_attribute(prev_td, "class", "calendar-btn btn-prev");
            surface.append_child(prev_td, prev_btn);
        }

        if show_next {
            let next_btn = surface.create_element("span");
            surface.set_text(next_btn, "Next");
            surface.bind_action(next_btn, NavAction::Next);
            surface.set_attribute(next_td, "class", "calendar-btn btn-next");
            surface.append_child(next_td, next_btn);
        }

        surface.set_attribute(month_td, "class", "month-name");
        surface.set_attribute(month_td, "colspan", "5");
        let label = format!("{} - {}", self.options.month_name(month.month()), month.year());
        surface.set_text(month_td, &label);
        surface.append_child(first_tr, prev_td);
        surface.append_child(first_tr, month_td);
        surface.append_child(first_tr, next_td);

        for name in &self.options.day_names {
            let th = surface.create_element("th");
            surface.set_text(th, name);
            surface.append_child(second_tr, th);
        }

        surface.append_child(thead, first_tr);
        surface.append_child(thead, second_tr);
        thead
    }
}

/// Pulls `anchor` back so that all `calendars` consecutive months exist.
fn fit_anchor(anchor: NaiveDate, calendars: u32) -> NaiveDate {
    let span = i32::try_from(calendars.saturating_sub(1)).unwrap_or(i32::MAX);
    if shift_months(anchor, span).is_some() {
        return anchor;
    }
    shift_months(first_of_month(NaiveDate::MAX), -span).unwrap_or(anchor)
}
