use crate::widget::store::DataStore;
use crate::widget::surface::Surface;
use chrono::NaiveDate;
use serde_json::Value;

/// Called once per rendered single-month view.
pub type ViewHook<S> = Box<dyn Fn(&mut ViewContext<'_, S>)>;

/// Called once per cell, after the cell's base content is built.
pub type CellHook<S> = Box<dyn Fn(&mut CellContext<'_, S>)>;

/// What a [`ViewHook`] gets to work with.
pub struct ViewContext<'a, S: Surface> {
    pub surface: &'a mut S,
    /// The `table` element of the view.
    pub view: S::Node,
    /// First day of the month shown by the view.
    pub month: NaiveDate,
    store: &'a mut DataStore,
}

impl<'a, S: Surface> ViewContext<'a, S> {
    pub(crate) fn new(
        surface: &'a mut S,
        view: S::Node,
        month: NaiveDate,
        store: &'a mut DataStore,
    ) -> Self {
        ViewContext {
            surface,
            view,
            month,
            store,
        }
    }

    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.store.get_data(key)
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.store.set_data(key, value);
        self
    }
}

/// What a [`CellHook`] gets to work with.
pub struct CellContext<'a, S: Surface> {
    pub surface: &'a mut S,
    /// The cell's container element.
    pub container: S::Node,
    pub cell_date: NaiveDate,
    pub scope_date: NaiveDate,
    pub in_scope: bool,
    store: &'a mut DataStore,
}

impl<'a, S: Surface> CellContext<'a, S> {
    pub(crate) fn new(
        surface: &'a mut S,
        container: S::Node,
        cell_date: NaiveDate,
        scope_date: NaiveDate,
        in_scope: bool,
        store: &'a mut DataStore,
    ) -> Self {
        CellContext {
            surface,
            container,
            cell_date,
            scope_date,
            in_scope,
            store,
        }
    }

    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.store.get_data(key)
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.store.set_data(key, value);
        self
    }
}
