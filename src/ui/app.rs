use crate::data::DateRange;
use crate::ui::picker::DateRangePicker;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;
use tracing::debug;

/// Host screen that owns the selected range and hands it to the picker.
pub struct App {
    picker: DateRangePicker,
    pub range: Option<DateRange>,
}

impl App {
    pub fn new(picker: DateRangePicker, range: Option<DateRange>) -> Self {
        App { picker, range }
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let mut changed = None;
        let consumed = self
            .picker
            .handle_key(code, modifiers, self.range, &mut |r| changed = Some(r));
        if let Some(range) = changed {
            debug!(?range, "range changed");
            self.range = range;
        }

        !consumed && code == KeyCode::Char('q')
    }

    pub fn refresh_today(&mut self, today: NaiveDate) {
        self.picker.set_today(today);
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(f.area());

        self.picker.render(f, chunks[0], self.range.as_ref());
        f.render_widget(Paragraph::new(self.status_line()), chunks[1]);
    }

    fn status_line(&self) -> Line<'static> {
        let range = match self.range {
            Some(DateRange { from, to: Some(to) }) => format!("{} .. {}", from, to),
            Some(DateRange { from, to: None }) => format!("{} ..", from),
            None => "none".to_string(),
        };
        let hints = if self.picker.is_open() {
            format!(
                "[{}] Tab focus  [ ] year  PgUp/PgDn month  Enter pick  Esc close",
                self.picker.focus().name()
            )
        } else {
            "Enter open  q quit".to_string()
        };
        Line::from(vec![
            Span::styled(format!(" range: {} ", range), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!(" viewing {} ", self.picker.cursor().format("%b %Y")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(hints),
        ])
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.refresh_today(Local::now().date_naive());
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}
