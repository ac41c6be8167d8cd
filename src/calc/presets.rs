use crate::calc::dates::{end_of_month, end_of_year, start_of_month, start_of_year};
use crate::data::DateRange;
use chrono::{Duration, NaiveDate};

/// A named quick-select entry. `compute` receives today's date.
#[derive(Clone, Copy)]
pub struct DatePreset {
    pub name: &'static str,
    pub compute: fn(NaiveDate) -> DateRange,
}

impl DatePreset {
    pub fn range(&self, today: NaiveDate) -> DateRange {
        (self.compute)(today)
    }
}

pub const DATE_PRESETS: [DatePreset; 5] = [
    DatePreset {
        name: "Today",
        compute: today_only,
    },
    DatePreset {
        name: "Last 7 days",
        compute: last_7_days,
    },
    DatePreset {
        name: "Last 30 days",
        compute: last_30_days,
    },
    DatePreset {
        name: "This month",
        compute: this_month,
    },
    DatePreset {
        name: "This year",
        compute: this_year,
    },
];

fn today_only(today: NaiveDate) -> DateRange {
    DateRange::new(today, Some(today))
}

/// Inclusive window of `days` calendar days ending today.
fn trailing_days(today: NaiveDate, days: i64) -> DateRange {
    DateRange::new(today - Duration::days(days - 1), Some(today))
}

fn last_7_days(today: NaiveDate) -> DateRange {
    trailing_days(today, 7)
}

fn last_30_days(today: NaiveDate) -> DateRange {
    trailing_days(today, 30)
}

fn this_month(today: NaiveDate) -> DateRange {
    DateRange::new(start_of_month(today), Some(end_of_month(today)))
}

fn this_year(today: NaiveDate) -> DateRange {
    DateRange::new(start_of_year(today), Some(end_of_year(today)))
}
