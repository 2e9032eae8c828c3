use crate::cmd::setup::calendar_options;
use crate::data::CalendarSettings;
use crate::ui::month_view::{month_views, write_text};
use crate::widget::{CalendarWidget, NodeTree, Surface};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use std::io::Write;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// The rendered element tree as HTML
    Html,
    /// Plain-text month blocks
    Text,
    /// Month views as JSON
    Json,
}

pub fn run(settings: CalendarSettings, format: Format) -> Result<()> {
    let today = Local::now().date_naive();
    write_calendar(settings, today, format, &mut std::io::stdout())
}

pub(crate) fn write_calendar<W: Write>(
    settings: CalendarSettings,
    today: NaiveDate,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let widget = CalendarWidget::new(calendar_options(settings, today)?, &mut tree, root)?;
    debug!(anchor = %widget.anchor(), ?format, "printing calendar");

    match format {
        Format::Html => writeln!(out, "{}", tree.to_html(root))?,
        Format::Text => write_text(&month_views(&tree, root), out)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &month_views(&tree, root))?;
            writeln!(out)?;
        }
    }
    Ok(())
}
