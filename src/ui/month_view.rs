//! Reads rendered month views back out of a [`NodeTree`] so that terminal
//! and text front ends can present them.

use crate::widget::{NodeId, NodeTree, Surface};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub label: String,
    pub in_scope: bool,
    pub today: bool,
    pub marked: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub title: String,
    /// `YYYY-MM`, when the view was tagged by the host's render hook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub has_prev: bool,
    pub has_next: bool,
    pub day_names: Vec<String>,
    pub weeks: Vec<Vec<DayView>>,
}

/// Collects every month view rendered under `container`, left to right.
pub fn month_views(tree: &NodeTree, container: NodeId) -> Vec<MonthView> {
    tree.find_by_class(container, "calendar")
        .into_iter()
        .map(|view| read_view(tree, view))
        .collect()
}

fn read_view(tree: &NodeTree, view: NodeId) -> MonthView {
    let title = tree
        .find_by_class(view, "month-name")
        .first()
        .map(|n| tree.text_content(*n))
        .unwrap_or_default();
    let day_names = tree
        .find_by_tag(view, "th")
        .into_iter()
        .map(|n| tree.text_content(n))
        .collect();
    let weeks = tree
        .find_by_tag(view, "tbody")
        .first()
        .map(|tbody| {
            tree.children(*tbody)
                .into_iter()
                .map(|tr| {
                    tree.children(tr)
                        .into_iter()
                        .filter_map(|td| tree.children(td).first().copied())
                        .map(|cell| read_day(tree, cell))
                        .collect()
                })
                .collect()
        })
        .unwrap_or_default();

    MonthView {
        title,
        month: tree.attribute(view, "data-month"),
        has_prev: !tree.find_by_class(view, "btn-prev").is_empty(),
        has_next: !tree.find_by_class(view, "btn-next").is_empty(),
        day_names,
        weeks,
    }
}

fn read_day(tree: &NodeTree, cell: NodeId) -> DayView {
    DayView {
        label: tree.text_content(cell),
        in_scope: tree.has_class(cell, "scope"),
        today: tree.has_class(cell, "today"),
        marked: tree.has_class(cell, "marked"),
    }
}

/// Width of one month block in the text layout: seven 3-column cells.
pub const MONTH_WIDTH: usize = 21;

/// Title line with `<` / `>` where the view carries navigation controls.
pub fn title_line(view: &MonthView) -> String {
    let prev = if view.has_prev { "<" } else { " " };
    let next = if view.has_next { ">" } else { " " };
    format!("{}{:^19}{}", prev, view.title, next)
}

pub fn day_names_line(view: &MonthView) -> String {
    view.day_names
        .iter()
        .map(|name| format!("{:>2} ", name))
        .collect::<String>()
}

/// Plain-text calendar: padding days are left blank. Today is suffixed with
/// `+`, marked days with `*`, and a marked today with `#`.
pub fn write_text<W: Write>(views: &[MonthView], out: &mut W) -> Result<()> {
    for (i, view) in views.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", title_line(view).trim_end())?;
        writeln!(out, "{}", day_names_line(view).trim_end())?;
        for week in &view.weeks {
            let line: String = week
                .iter()
                .map(|day| {
                    if !day.in_scope {
                        "   ".to_string()
                    } else {
                        let suffix = match (day.today, day.marked) {
                            (true, true) => '#',
                            (true, false) => '+',
                            (false, true) => '*',
                            (false, false) => ' ',
                        };
                        format!("{:>2}{}", day.label, suffix)
                    }
                })
                .collect();
            writeln!(out, "{}", line.trim_end())?;
        }
    }
    Ok(())
}
