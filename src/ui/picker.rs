use crate::calc::dates::{add_years, start_of_month, with_year, year_list};
use crate::calc::DATE_PRESETS;
use crate::data::{format_label, DateRange, PickerSettings};
use crate::ui::grid::{
    add_to_range, CalendarGrid, GridView, GAP_WIDTH, GRID_HEIGHT, MONTH_WIDTH,
};
use chrono::{Datelike, NaiveDate};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::debug;

const TRIGGER_HEIGHT: u16 = 3;
const PRESET_WIDTH: u16 = 16;
/// Visible rows of the year dropdown, borders included.
const DROPDOWN_HEIGHT: u16 = 12;
const DROPDOWN_WIDTH: u16 = 10;
const DROPDOWN_PAGE: usize = 10;

const MUTED: Color = Color::DarkGray;
const ACCENT: Color = Color::Blue;

/// Which section of the open panel receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Presets,
    Years,
    Calendar,
}

impl Focus {
    pub fn name(self) -> &'static str {
        match self {
            Focus::Presets => "presets",
            Focus::Years => "years",
            Focus::Calendar => "calendar",
        }
    }

    fn next(self) -> Self {
        match self {
            Focus::Presets => Focus::Years,
            Focus::Years => Focus::Calendar,
            Focus::Calendar => Focus::Presets,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Presets => Focus::Calendar,
            Focus::Years => Focus::Presets,
            Focus::Calendar => Focus::Years,
        }
    }
}

/// A trigger button plus a popover with presets, year navigation and a
/// two-month grid.
///
/// The selected range belongs to the caller: every operation that may change
/// it takes the current value and reports the new one through `on_change`.
/// The picker itself only owns the visible-month cursor and its own focus.
pub struct DateRangePicker {
    today: NaiveDate,
    years: Vec<i32>,
    cursor: NaiveDate,
    open: bool,
    focus: Focus,
    preset_index: usize,
    /// Highlighted row while the year dropdown is expanded.
    year_select: Option<usize>,
    grid: CalendarGrid,
    settings: PickerSettings,
    class_name: Option<String>,
}

impl DateRangePicker {
    pub fn new(today: NaiveDate, range: Option<&DateRange>, settings: PickerSettings) -> Self {
        let cursor = range.map(|r| r.from).unwrap_or(today);
        DateRangePicker {
            today,
            years: year_list(today.year()),
            cursor,
            open: false,
            focus: Focus::default(),
            preset_index: 0,
            year_select: None,
            grid: CalendarGrid::new(cursor),
            settings,
            class_name: None,
        }
    }

    /// Layout tag shown in the trigger's title. Has no effect on behavior.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }

    /// Advances the picker's notion of today. The year list is rebuilt only
    /// when the calendar year actually changes.
    pub fn set_today(&mut self, today: NaiveDate) {
        if today.year() != self.today.year() {
            self.years = year_list(today.year());
            debug!(year = today.year(), "rebuilt year list");
        }
        self.today = today;
    }

    pub fn label(&self, range: Option<&DateRange>) -> String {
        format_label(range, &self.settings.date_format, &self.settings.placeholder)
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.year_select = None;
        debug!(open = self.open, "toggled panel");
    }

    pub fn close(&mut self) {
        self.open = false;
        self.year_select = None;
    }

    fn set_cursor(&mut self, date: NaiveDate) {
        self.cursor = date;
        self.grid.keep_visible(date);
        debug!(cursor = %date, "cursor moved");
    }

    // ── Presets ───────────────────────────────────────────────────────────────

    /// Applies the preset at `index`: reports its range and moves the cursor to its start.
    pub fn apply_preset(&mut self, index: usize, on_change: &mut dyn FnMut(Option<DateRange>)) {
        let Some(preset) = DATE_PRESETS.get(index) else {
            return;
        };
        let range = preset.range(self.today);
        debug!(preset = preset.name, from = %range.from, "applied preset");
        on_change(Some(range));
        self.set_cursor(range.from);
    }

    // ── Year navigation ───────────────────────────────────────────────────────

    pub fn previous_year(&mut self) {
        self.set_cursor(add_years(self.cursor, -1));
    }

    pub fn can_go_next_year(&self) -> bool {
        self.cursor.year() < self.current_year()
    }

    /// Returns false, leaving the cursor alone, once the cursor reaches the current year.
    pub fn next_year(&mut self) -> bool {
        if !self.can_go_next_year() {
            return false;
        }
        self.set_cursor(add_years(self.cursor, 1));
        true
    }

    /// Sets the cursor year from the dropdown. Unlike `next_year` there is no
    /// upper bound beyond the list itself.
    pub fn select_year(&mut self, year: i32) {
        self.set_cursor(with_year(self.cursor, year));
    }

    fn open_year_dropdown(&mut self) {
        let current = self.cursor.year();
        let index = self.years().iter().position(|&y| y == current).unwrap_or(0);
        self.year_select = Some(index);
    }

    fn handle_dropdown_key(&mut self, code: KeyCode, index: usize) {
        let last = self.years.len().saturating_sub(1);
        let next = match code {
            KeyCode::Up => index.saturating_sub(1),
            KeyCode::Down => (index + 1).min(last),
            KeyCode::PageUp => index.saturating_sub(DROPDOWN_PAGE),
            KeyCode::PageDown => (index + DROPDOWN_PAGE).min(last),
            KeyCode::Home => 0,
            KeyCode::End => last,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.year_select = None;
                if let Some(&year) = self.years.get(index) {
                    self.select_year(year);
                }
                return;
            }
            KeyCode::Esc => {
                self.year_select = None;
                return;
            }
            _ => index,
        };
        self.year_select = Some(next);
    }

    // ── Calendar grid ─────────────────────────────────────────────────────────

    /// Month change from the grid: the new left month becomes the cursor.
    pub fn set_month(&mut self, month: NaiveDate) {
        self.set_cursor(start_of_month(month));
    }

    /// Forwards a picked day, folded into `range`, without further checks.
    pub fn select_day(
        &mut self,
        day: NaiveDate,
        range: Option<DateRange>,
        on_change: &mut dyn FnMut(Option<DateRange>),
    ) {
        let next = add_to_range(day, range);
        debug!(day = %day, ?next, "grid selection");
        on_change(next);
    }

    fn move_grid_focus(&mut self, days: i64) {
        if let Some(month) = self.grid.move_focus(days, self.cursor) {
            self.set_month(month);
        }
    }

    fn page_grid(&mut self, months: i32) {
        let month = self.grid.page(months, self.cursor);
        self.set_month(month);
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Returns true when the key was consumed by the picker.
    pub fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
        range: Option<DateRange>,
        on_change: &mut dyn FnMut(Option<DateRange>),
    ) -> bool {
        if !self.open {
            return match code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.toggle();
                    true
                }
                _ => false,
            };
        }

        if let Some(index) = self.year_select {
            self.handle_dropdown_key(code, index);
            return true;
        }

        match code {
            KeyCode::Esc => {
                self.close();
                return true;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                self.grid.keep_visible(self.cursor);
                return true;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                self.grid.keep_visible(self.cursor);
                return true;
            }
            KeyCode::Char('[') => {
                self.previous_year();
                return true;
            }
            KeyCode::Char(']') => {
                self.next_year();
                return true;
            }
            _ => {}
        }

        match self.focus {
            Focus::Presets => match code {
                KeyCode::Up => self.preset_index = self.preset_index.saturating_sub(1),
                KeyCode::Down => {
                    self.preset_index = (self.preset_index + 1).min(DATE_PRESETS.len() - 1)
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.apply_preset(self.preset_index, on_change)
                }
                _ => return false,
            },
            Focus::Years => match code {
                KeyCode::Left => self.previous_year(),
                KeyCode::Right => {
                    self.next_year();
                }
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => self.open_year_dropdown(),
                _ => return false,
            },
            Focus::Calendar => match code {
                KeyCode::Left => self.move_grid_focus(-1),
                KeyCode::Right => self.move_grid_focus(1),
                KeyCode::Up => self.move_grid_focus(-7),
                KeyCode::Down => self.move_grid_focus(7),
                KeyCode::PageUp => self.page_grid(-1),
                KeyCode::PageDown => self.page_grid(1),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.select_day(self.grid.focused, range, on_change)
                }
                _ => return false,
            },
        }
        true
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Width and height the open panel wants, borders included.
    pub fn panel_size() -> (u16, u16) {
        let right = MONTH_WIDTH * 2 + GAP_WIDTH + 2;
        let width = 2 + PRESET_WIDTH + 1 + right;
        let presets = 1 + DATE_PRESETS.len() as u16;
        let height = 2 + presets.max(2 + GRID_HEIGHT);
        (width, height)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, range: Option<&DateRange>) {
        let (w, h) = Self::panel_size();
        let trigger_area = Rect {
            height: TRIGGER_HEIGHT.min(area.height),
            width: w.min(area.width),
            ..area
        };
        self.render_trigger(f, trigger_area, range);

        if self.open {
            let below = area.height.saturating_sub(TRIGGER_HEIGHT);
            let panel = Rect {
                x: area.x,
                y: area.y + TRIGGER_HEIGHT.min(area.height),
                width: w.min(area.width),
                height: h.min(below),
            };
            self.render_panel(f, panel, range);
        }
    }

    fn render_trigger(&self, f: &mut Frame, area: Rect, range: Option<&DateRange>) {
        let label_style = if range.is_some() {
            Style::default()
        } else {
            Style::default().fg(MUTED)
        };
        let mut block = Block::default().borders(Borders::ALL);
        if let Some(class_name) = &self.class_name {
            block = block.title(format!(" {} ", class_name));
        }
        if self.open {
            block = block.border_style(Style::default().fg(ACCENT));
        }
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(self.label(range), label_style),
        ]);
        f.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_panel(&self, f: &mut Frame, area: Rect, range: Option<&DateRange>) {
        f.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(PRESET_WIDTH),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);
        self.render_presets(f, columns[0]);
        let separator = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(MUTED));
        f.render_widget(separator, columns[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(columns[2]);
        self.render_year_nav(f, right[0]);
        let rule = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(MUTED));
        f.render_widget(rule, right[1]);

        let grid_area = Rect {
            x: right[2].x + 1,
            width: right[2].width.saturating_sub(1),
            ..right[2]
        };
        GridView {
            cursor: self.cursor,
            range,
            today: self.today,
            week_start: self.settings.week_start,
            grid: &self.grid,
            has_focus: self.focus == Focus::Calendar,
        }
        .render(f, grid_area);

        if let Some(index) = self.year_select {
            self.render_year_dropdown(f, right[0], index);
        }
    }

    fn render_presets(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            " Quick select",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for (i, preset) in DATE_PRESETS.iter().enumerate() {
            let style = if self.focus == Focus::Presets && i == self.preset_index {
                Style::default().fg(Color::Black).bg(ACCENT)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!("  {}", preset.name), style)));
        }
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_year_nav(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let year_style = if self.focus == Focus::Years {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let next_style = if self.can_go_next_year() {
            Style::default()
        } else {
            Style::default().fg(MUTED).add_modifier(Modifier::DIM)
        };

        f.render_widget(Paragraph::new(" < "), chunks[0]);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {} v ", self.cursor.year()),
                year_style,
            )))
            .centered(),
            chunks[1],
        );
        f.render_widget(Paragraph::new(Span::styled(" > ", next_style)), chunks[2]);
    }

    fn render_year_dropdown(&self, f: &mut Frame, anchor: Rect, index: usize) {
        let frame_area = f.area();
        let x = anchor.x + anchor.width.saturating_sub(DROPDOWN_WIDTH) / 2;
        let y = anchor.y + 1;
        let area = Rect {
            x,
            y,
            width: DROPDOWN_WIDTH.min(frame_area.width.saturating_sub(x)),
            height: DROPDOWN_HEIGHT.min(frame_area.height.saturating_sub(y)),
        };
        let items: Vec<ListItem> = self
            .years
            .iter()
            .map(|y| ListItem::new(format!(" {}", y)))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(ACCENT));
        let mut state = ListState::default().with_selected(Some(index));
        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_picker(today: NaiveDate, range: Option<&DateRange>) -> DateRangePicker {
        DateRangePicker::new(today, range, PickerSettings::default())
    }

    /// Sends a key with a recording callback; returns (consumed, reported ranges).
    fn press(
        picker: &mut DateRangePicker,
        code: KeyCode,
        range: Option<DateRange>,
    ) -> (bool, Vec<Option<DateRange>>) {
        let mut changes = Vec::new();
        let consumed = picker.handle_key(code, KeyModifiers::empty(), range, &mut |r| {
            changes.push(r)
        });
        (consumed, changes)
    }

    fn open_picker(today: NaiveDate, range: Option<&DateRange>) -> DateRangePicker {
        let mut picker = make_picker(today, range);
        picker.toggle();
        picker
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(picker: &DateRangePicker, range: Option<&DateRange>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                picker.render(f, area, range);
            })
            .unwrap();
        buffer_text(&terminal)
    }

    // ── construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_cursor_starts_at_range_start() {
        let r = DateRange::new(d(2019, 4, 2), Some(d(2019, 4, 9)));
        let picker = make_picker(d(2026, 10, 18), Some(&r));
        assert_eq!(picker.cursor(), d(2019, 4, 2));
        assert!(!picker.is_open());
    }

    #[test]
    fn test_cursor_defaults_to_today() {
        let picker = make_picker(d(2026, 10, 18), None);
        assert_eq!(picker.cursor(), d(2026, 10, 18));
    }

    #[test]
    fn test_year_list_from_current_year() {
        let picker = make_picker(d(2026, 10, 18), None);
        let years = picker.years();
        assert_eq!(years.len(), 100);
        assert_eq!(years[0], 2026);
        assert_eq!(years[99], 1927);
        assert!(years.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_set_today_same_year_keeps_list() {
        let mut picker = make_picker(d(2026, 10, 18), None);
        let before = picker.years().as_ptr();
        picker.set_today(d(2026, 12, 31));
        assert_eq!(picker.years().as_ptr(), before);
    }

    #[test]
    fn test_set_today_new_year_rebuilds_list() {
        let mut picker = make_picker(d(2026, 12, 31), None);
        picker.set_today(d(2027, 1, 1));
        assert_eq!(picker.years()[0], 2027);
        assert_eq!(picker.current_year(), 2027);
    }

    // ── trigger ───────────────────────────────────────────────────────────────

    #[test]
    fn test_enter_toggles_closed_panel() {
        let mut picker = make_picker(d(2026, 10, 18), None);
        let (consumed, changes) = press(&mut picker, KeyCode::Enter, None);
        assert!(consumed);
        assert!(picker.is_open());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_closed_picker_ignores_other_keys() {
        let mut picker = make_picker(d(2026, 10, 18), None);
        let (consumed, _) = press(&mut picker, KeyCode::Char('q'), None);
        assert!(!consumed);
        assert!(!picker.is_open());
    }

    #[test]
    fn test_esc_closes_panel() {
        let mut picker = open_picker(d(2026, 10, 18), None);
        press(&mut picker, KeyCode::Esc, None);
        assert!(!picker.is_open());
    }

    #[test]
    fn test_label_uses_settings() {
        let picker = make_picker(d(2026, 10, 18), None);
        let r = DateRange::new(d(2024, 1, 5), Some(d(2024, 1, 10)));
        assert_eq!(picker.label(Some(&r)), "Jan 05, 2024 - Jan 10, 2024");
        assert_eq!(picker.label(None), "Select date range");
    }

    // ── presets ───────────────────────────────────────────────────────────────

    #[test]
    fn test_apply_preset_reports_range_and_moves_cursor() {
        let today = d(2026, 10, 18);
        let mut picker = make_picker(today, None);
        let mut changes = Vec::new();
        picker.apply_preset(2, &mut |r| changes.push(r));
        let expected = DateRange::new(d(2026, 9, 19), Some(today));
        assert_eq!(changes, vec![Some(expected)]);
        assert_eq!(picker.cursor(), d(2026, 9, 19));
    }

    #[test]
    fn test_apply_preset_out_of_range_is_ignored() {
        let mut picker = make_picker(d(2026, 10, 18), None);
        let mut changes = Vec::new();
        picker.apply_preset(99, &mut |r| changes.push(r));
        assert!(changes.is_empty());
    }

    #[test]
    fn test_preset_keys_select_this_year() {
        let mut picker = open_picker(d(2026, 10, 18), None);
        for _ in 0..10 {
            press(&mut picker, KeyCode::Down, None);
        }
        let (_, changes) = press(&mut picker, KeyCode::Enter, None);
        assert_eq!(
            changes,
            vec![Some(DateRange::new(d(2026, 1, 1), Some(d(2026, 12, 31))))]
        );
        assert_eq!(picker.cursor(), d(2026, 1, 1));
        assert!(picker.is_open());
    }

    // ── year navigation ───────────────────────────────────────────────────────

    #[test]
    fn test_previous_year_always_decrements() {
        let mut picker = make_picker(d(2026, 10, 18), None);
        picker.previous_year();
        assert_eq!(picker.cursor(), d(2025, 10, 18));
        picker.previous_year();
        assert_eq!(picker.cursor(), d(2024, 10, 18));
    }

    #[test]
    fn test_next_year_blocked_at_current_year() {
        let mut picker = make_picker(d(2026, 10, 18), None);
        assert!(!picker.can_go_next_year());
        assert!(!picker.next_year());
        assert_eq!(picker.cursor(), d(2026, 10, 18));
    }

    #[test]
    fn test_next_year_blocked_key_reports_nothing() {
        let mut picker = open_picker(d(2026, 10, 18), None);
        let (consumed, changes) = press(&mut picker, KeyCode::Char(']'), None);
        assert!(consumed);
        assert!(changes.is_empty());
        assert_eq!(picker.cursor(), d(2026, 10, 18));
    }

    #[test]
    fn test_next_year_increments_when_behind() {
        let r = DateRange::single(d(2020, 3, 4));
        let mut picker = make_picker(d(2026, 10, 18), Some(&r));
        assert!(picker.next_year());
        assert_eq!(picker.cursor(), d(2021, 3, 4));
    }

    #[test]
    fn test_previous_year_from_leap_day() {
        let r = DateRange::single(d(2024, 2, 29));
        let mut picker = make_picker(d(2026, 10, 18), Some(&r));
        picker.previous_year();
        assert_eq!(picker.cursor(), d(2023, 2, 28));
    }

    #[test]
    fn test_select_year_keeps_month_and_day() {
        let mut picker = make_picker(d(2026, 10, 18), None);
        picker.select_year(1950);
        assert_eq!(picker.cursor(), d(1950, 10, 18));
    }

    #[test]
    fn test_select_year_can_pass_next_year_guard() {
        let r = DateRange::single(d(2030, 5, 1));
        let mut picker = make_picker(d(2026, 10, 18), Some(&r));
        assert!(!picker.can_go_next_year());
        picker.select_year(2026);
        assert_eq!(picker.cursor(), d(2026, 5, 1));
    }

    #[test]
    fn test_year_keys_step_and_dropdown() {
        let r = DateRange::single(d(2020, 6, 15));
        let mut picker = open_picker(d(2026, 10, 18), Some(&r));
        press(&mut picker, KeyCode::Tab, None);
        assert_eq!(picker.focus(), Focus::Years);

        press(&mut picker, KeyCode::Left, None);
        assert_eq!(picker.cursor(), d(2019, 6, 15));
        press(&mut picker, KeyCode::Right, None);
        assert_eq!(picker.cursor(), d(2020, 6, 15));

        // dropdown opens on the cursor year (index 6), Down twice → 2018
        press(&mut picker, KeyCode::Enter, None);
        assert_eq!(picker.year_select, Some(6));
        press(&mut picker, KeyCode::Down, None);
        press(&mut picker, KeyCode::Down, None);
        let (_, changes) = press(&mut picker, KeyCode::Enter, None);
        assert!(changes.is_empty());
        assert_eq!(picker.year_select, None);
        assert_eq!(picker.cursor(), d(2018, 6, 15));
    }

    #[test]
    fn test_dropdown_esc_cancels_without_closing_panel() {
        let mut picker = open_picker(d(2026, 10, 18), None);
        press(&mut picker, KeyCode::Tab, None);
        press(&mut picker, KeyCode::Enter, None);
        press(&mut picker, KeyCode::End, None);
        assert_eq!(picker.year_select, Some(99));
        press(&mut picker, KeyCode::Esc, None);
        assert_eq!(picker.year_select, None);
        assert!(picker.is_open());
        assert_eq!(picker.cursor(), d(2026, 10, 18));
    }

    // ── calendar grid ─────────────────────────────────────────────────────────

    #[test]
    fn test_grid_selection_forwarded_verbatim() {
        let mut picker = open_picker(d(2026, 10, 18), None);
        press(&mut picker, KeyCode::BackTab, None);
        assert_eq!(picker.focus(), Focus::Calendar);

        let (_, changes) = press(&mut picker, KeyCode::Enter, None);
        assert_eq!(changes, vec![Some(DateRange::single(d(2026, 10, 18)))]);

        let start = DateRange::single(d(2026, 10, 18));
        press(&mut picker, KeyCode::Right, Some(start));
        press(&mut picker, KeyCode::Right, Some(start));
        let (_, changes) = press(&mut picker, KeyCode::Enter, Some(start));
        assert_eq!(
            changes,
            vec![Some(DateRange::new(d(2026, 10, 18), Some(d(2026, 10, 20))))]
        );
    }

    #[test]
    fn test_grid_reselecting_start_clears_range() {
        let mut picker = make_picker(d(2026, 10, 18), None);
        let r = DateRange::new(d(2026, 10, 1), Some(d(2026, 10, 5)));
        let mut changes = Vec::new();
        picker.select_day(d(2026, 10, 1), Some(r), &mut |c| changes.push(c));
        assert_eq!(changes, vec![None]);
    }

    #[test]
    fn test_grid_focus_overflow_moves_cursor() {
        let r = DateRange::single(d(2024, 2, 26));
        let mut picker = open_picker(d(2026, 10, 18), Some(&r));
        press(&mut picker, KeyCode::BackTab, None);
        // window is Feb–Mar 2024 until paged
        press(&mut picker, KeyCode::PageDown, None);
        assert_eq!(picker.cursor(), d(2024, 3, 1));
        assert_eq!(picker.grid.focused, d(2024, 3, 26));
        press(&mut picker, KeyCode::Down, None);
        assert_eq!(picker.grid.focused, d(2024, 4, 2));
        assert_eq!(picker.cursor(), d(2024, 3, 1));
        for _ in 0..5 {
            press(&mut picker, KeyCode::Down, None);
        }
        // forward overflow shows May on the left page
        assert_eq!(picker.grid.focused, d(2024, 5, 7));
        assert_eq!(picker.cursor(), d(2024, 5, 1));
        // backward overflow shows April on the right page
        press(&mut picker, KeyCode::Up, None);
        assert_eq!(picker.grid.focused, d(2024, 4, 30));
        assert_eq!(picker.cursor(), d(2024, 3, 1));
    }

    #[test]
    fn test_page_up_moves_cursor_back_a_month() {
        let mut picker = open_picker(d(2026, 10, 18), None);
        press(&mut picker, KeyCode::BackTab, None);
        press(&mut picker, KeyCode::PageUp, None);
        assert_eq!(picker.cursor(), d(2026, 9, 1));
        assert!(!picker.can_go_next_year());
    }

    #[test]
    fn test_year_change_pulls_grid_focus_along() {
        let mut picker = make_picker(d(2026, 10, 18), None);
        picker.select_year(2001);
        assert_eq!(picker.grid.focused, d(2001, 10, 18));
    }

    // ── rendering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_render_closed_shows_placeholder_only() {
        let picker = make_picker(d(2026, 10, 18), None);
        let text = draw(&picker, None);
        assert!(text.contains("Select date range"));
        assert!(!text.contains("Quick select"));
    }

    #[test]
    fn test_render_open_panel() {
        let r = DateRange::new(d(2024, 1, 5), Some(d(2024, 1, 10)));
        let picker = open_picker(d(2026, 10, 18), Some(&r));
        let text = draw(&picker, Some(&r));
        assert!(text.contains("Jan 05, 2024 - Jan 10, 2024"));
        assert!(text.contains("Quick select"));
        assert!(text.contains("Last 30 days"));
        assert!(text.contains("January 2024"));
        assert!(text.contains("February 2024"));
        assert!(text.contains("Su Mo Tu We Th Fr Sa"));
        assert!(text.contains(" 2024 v "));
    }

    #[test]
    fn test_render_class_name_in_title() {
        let picker = make_picker(d(2026, 10, 18), None).with_class_name("report-range");
        let text = draw(&picker, None);
        assert!(text.contains("report-range"));
    }

    #[test]
    fn test_render_dropdown_lists_years() {
        let mut picker = open_picker(d(2026, 10, 18), None);
        press(&mut picker, KeyCode::Tab, None);
        press(&mut picker, KeyCode::Enter, None);
        let text = draw(&picker, None);
        assert!(text.contains(" 2026"));
        assert!(text.contains(" 2020"));
    }

    #[test]
    fn test_panel_fits_declared_size() {
        let (w, h) = DateRangePicker::panel_size();
        assert_eq!(w, 2 + PRESET_WIDTH + 1 + 45);
        assert_eq!(h, 12);
    }
}
