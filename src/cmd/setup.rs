//! Host-side decoration of the widget: the hooks that mark today's cell and
//! the days listed under `marked`, and tag each month view with its month.

use crate::data::CalendarSettings;
use crate::widget::{CalendarOptions, CellContext, NodeTree, Surface, ViewContext};
use anyhow::Result;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

/// Store key holding the current date as `YYYY-MM-DD`.
pub const TODAY_KEY: &str = "today";
/// Store key holding a list of `YYYY-MM-DD` dates to highlight.
pub const MARKED_KEY: &str = "marked";

/// Resolves `settings` into widget options with the host hooks installed.
pub fn calendar_options(
    settings: CalendarSettings,
    today: NaiveDate,
) -> Result<CalendarOptions<NodeTree>> {
    let mut options = settings.into_options::<NodeTree>(today)?;
    let mut data = options.data.take().unwrap_or_default();
    data.insert(TODAY_KEY.to_string(), Value::from(iso(today)));
    debug!(keys = data.len(), "seeding widget data");
    Ok(options
        .with_data(data)
        .on_cell_render(mark_cell)
        .on_render(tag_view))
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn mark_cell(ctx: &mut CellContext<'_, NodeTree>) {
    if !ctx.in_scope {
        return;
    }
    let date = iso(ctx.cell_date);
    if ctx.get_data(TODAY_KEY).and_then(Value::as_str) == Some(date.as_str()) {
        ctx.surface.add_class(ctx.container, "today");
    }
    let marked = ctx
        .get_data(MARKED_KEY)
        .and_then(Value::as_array)
        .is_some_and(|dates| dates.iter().any(|v| v.as_str() == Some(date.as_str())));
    if marked {
        ctx.surface.add_class(ctx.container, "marked");
    }
}

fn tag_view(ctx: &mut ViewContext<'_, NodeTree>) {
    let month = ctx.month.format("%Y-%m").to_string();
    ctx.surface.set_attribute(ctx.view, "data-month", &month);
}
