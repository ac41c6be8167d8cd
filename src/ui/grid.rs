use crate::calc::dates::{add_months, days_in_month, end_of_month, month_name, start_of_month};
use crate::data::{DateRange, WeekStart};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub const MONTH_WIDTH: u16 = 20;
pub const GAP_WIDTH: u16 = 3;
/// Title + weekday header + up to six week rows.
pub const GRID_HEIGHT: u16 = 8;

const RANGE_BG: Color = Color::Indexed(24); // muted blue
const ENDPOINT_BG: Color = Color::Cyan;

/// Keyboard focus within the two-month grid.
///
/// The grid never owns the visible month; moves that leave the window report
/// the new left month and the caller decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarGrid {
    pub focused: NaiveDate,
}

impl CalendarGrid {
    pub fn new(focused: NaiveDate) -> Self {
        CalendarGrid { focused }
    }

    /// Moves focus by `days`. Returns the new left month when focus leaves the
    /// window starting at `cursor`'s month: stepping forward puts the focused
    /// month on the left page, stepping back puts it on the right page.
    pub fn move_focus(&mut self, days: i64, cursor: NaiveDate) -> Option<NaiveDate> {
        self.focused = self
            .focused
            .checked_add_signed(Duration::days(days))
            .unwrap_or(self.focused);
        let (first, last) = visible_window(cursor);
        if self.focused < first {
            Some(start_of_month(add_months(self.focused, -1)))
        } else if self.focused > last {
            Some(start_of_month(self.focused))
        } else {
            None
        }
    }

    /// Shifts the window by `months`, carrying focus along. Returns the new left month.
    pub fn page(&mut self, months: i32, cursor: NaiveDate) -> NaiveDate {
        self.focused = add_months(self.focused, months);
        start_of_month(add_months(cursor, months))
    }

    /// Pulls focus back into view after the cursor moved underneath it.
    pub fn keep_visible(&mut self, cursor: NaiveDate) {
        let (first, last) = visible_window(cursor);
        if self.focused < first || self.focused > last {
            self.focused = cursor;
        }
    }
}

/// First and last day shown when `cursor`'s month is the left page.
pub fn visible_window(cursor: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        start_of_month(cursor),
        end_of_month(add_months(start_of_month(cursor), 1)),
    )
}

/// Range-mode selection: folds a picked day into the current range.
pub fn add_to_range(day: NaiveDate, range: Option<DateRange>) -> Option<DateRange> {
    match range {
        None => Some(DateRange::single(day)),
        Some(DateRange { from, to: None }) => {
            if day < from {
                Some(DateRange::new(day, Some(from)))
            } else {
                Some(DateRange::new(from, Some(day)))
            }
        }
        Some(DateRange { from, to: Some(to) }) => {
            if day == to && day == from {
                None
            } else if day == to {
                Some(DateRange::single(to))
            } else if day == from {
                None
            } else if day < from {
                Some(DateRange::new(day, Some(to)))
            } else {
                Some(DateRange::new(from, Some(day)))
            }
        }
    }
}

/// Rows of seven cells for one month; `None` pads before the 1st and after the last day.
pub fn month_weeks(year: i32, month: u32, week_start: WeekStart) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = match week_start {
        WeekStart::Sunday => first.weekday().num_days_from_sunday() as usize,
        WeekStart::Monday => first.weekday().num_days_from_monday() as usize,
    };
    let total = days_in_month(year, month) as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    for day in 1..=total {
        let col = (offset + day - 1) % 7;
        week[col] = NaiveDate::from_ymd_opt(year, month, day as u32);
        if col == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

/// Determines the ratatui `Style` for a calendar day cell based on its state.
pub(crate) fn day_cell_style(
    is_endpoint: bool,
    in_range: bool,
    is_today: bool,
    is_focused: bool,
    is_weekend: bool,
) -> Style {
    let mut style = if is_endpoint {
        Style::default()
            .fg(Color::Black)
            .bg(ENDPOINT_BG)
            .add_modifier(Modifier::BOLD)
    } else if in_range {
        Style::default().fg(Color::White).bg(RANGE_BG)
    } else if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if is_weekend {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    if is_focused {
        style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
    }
    style
}

/// Everything the grid needs to paint one frame.
pub struct GridView<'a> {
    pub cursor: NaiveDate,
    pub range: Option<&'a DateRange>,
    pub today: NaiveDate,
    pub week_start: WeekStart,
    pub grid: &'a CalendarGrid,
    pub has_focus: bool,
}

impl GridView<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(MONTH_WIDTH),
                Constraint::Length(GAP_WIDTH),
                Constraint::Length(MONTH_WIDTH),
                Constraint::Min(0),
            ])
            .split(area);
        let left = start_of_month(self.cursor);
        let right = add_months(left, 1);
        f.render_widget(Paragraph::new(self.month_lines(left)), chunks[0]);
        f.render_widget(Paragraph::new(self.month_lines(right)), chunks[2]);
    }

    fn month_lines(&self, month_start: NaiveDate) -> Vec<Line<'static>> {
        let (year, month) = (month_start.year(), month_start.month());
        let title = format!("{} {}", month_name(month), year);
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{:^20}", title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(self.week_start.header()),
        ];

        for week in month_weeks(year, month, self.week_start) {
            let mut spans = Vec::with_capacity(14);
            for (col, cell) in week.iter().enumerate() {
                if col > 0 {
                    spans.push(Span::raw(" "));
                }
                match cell {
                    Some(date) => {
                        let style = day_cell_style(
                            self.range.is_some_and(|r| r.is_endpoint(*date)),
                            self.range.is_some_and(|r| r.contains(*date)),
                            *date == self.today,
                            self.has_focus && *date == self.grid.focused,
                            matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
                        );
                        spans.push(Span::styled(format!("{:2}", date.day()), style));
                    }
                    None => spans.push(Span::raw("  ")),
                }
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}
