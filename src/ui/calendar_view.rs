use crate::ui::month_view::{day_names_line, month_views, title_line, DayView, MonthView, MONTH_WIDTH};
use crate::widget::{CalendarOptions, CalendarWidget, NavAction, NodeTree, Surface};
use anyhow::Result;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

// Marked day color
const MARKED_COLOR: Color = Color::Cyan;

const GAP_WIDTH: u16 = 4;

/// Terminal front end: owns the element tree and the widget rendering into it.
pub struct App {
    tree: NodeTree,
    widget: CalendarWidget<NodeTree>,
    /// Rebuilt from the tree after every widget render.
    views: Vec<MonthView>,
}

impl App {
    pub fn new(options: CalendarOptions<NodeTree>) -> Result<Self> {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let widget = CalendarWidget::new(options, &mut tree, root)?;
        let views = month_views(&tree, root);
        Ok(App {
            tree,
            widget,
            views,
        })
    }

    fn navigate(&mut self, action: NavAction) {
        self.widget.dispatch(&mut self.tree, action);
        self.views = month_views(&self.tree, self.widget.container());
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('n') | KeyCode::Right => {
                self.navigate(NavAction::Next);
                false
            }
            KeyCode::Char('p') | KeyCode::Left => {
                self.navigate(NavAction::Previous);
                false
            }
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => true,
            _ => false,
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let size = f.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(10), // title + day names + 6 weeks, inside borders
                Constraint::Min(1),     // key hints
            ])
            .split(size);

        self.render_calendars(f, chunks[0]);
        self.render_help(f, chunks[1]);
    }

    fn render_calendars(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Calendar ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut constraints = Vec::with_capacity(self.views.len() * 2 + 1);
        for _ in &self.views {
            constraints.push(Constraint::Length(MONTH_WIDTH as u16));
            constraints.push(Constraint::Length(GAP_WIDTH));
        }
        constraints.push(Constraint::Min(0));
        let month_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(inner);

        for (i, view) in self.views.iter().enumerate() {
            let mut lines: Vec<Line> = vec![
                Line::from(Span::styled(
                    title_line(view),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )),
                Line::from(day_names_line(view)),
            ];
            for week in &view.weeks {
                let mut spans = Vec::new();
                for day in week {
                    spans.push(Span::styled(format!("{:>2}", day.label), day_style(day)));
                    spans.push(Span::raw(" "));
                }
                lines.push(Line::from(spans));
            }
            let calendar = Paragraph::new(lines).block(Block::default().borders(Borders::NONE));
            f.render_widget(calendar, month_chunks[i * 2]);
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let months = self.widget.options().calendars;
        let hints = Paragraph::new(vec![Line::from(Span::styled(
            format!("n/→=next {months} month(s)  p/←=previous  q/Esc=quit"),
            Style::default().fg(Color::DarkGray),
        ))]);
        f.render_widget(hints, area);
    }
}

/// Determines the ratatui `Style` for a day cell from the classes the widget
/// and its hooks put on it.
pub(crate) fn day_style(day: &DayView) -> Style {
    if !day.in_scope {
        return Style::default().add_modifier(Modifier::DIM);
    }
    let mut s = if day.marked {
        Style::default().fg(MARKED_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    if day.today {
        s = s.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    s
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}
