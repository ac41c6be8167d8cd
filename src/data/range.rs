use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLACEHOLDER: &str = "Select date range";
pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y";

/// A start date with an optional end date. Neither order nor span is validated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: Option<NaiveDate>) -> Self {
        DateRange { from, to }
    }

    pub fn single(day: NaiveDate) -> Self {
        DateRange { from: day, to: None }
    }

    /// True when `date` lies between the endpoints (inclusive), in either order.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.to {
            Some(to) => {
                let (lo, hi) = if self.from <= to {
                    (self.from, to)
                } else {
                    (to, self.from)
                };
                lo <= date && date <= hi
            }
            None => date == self.from,
        }
    }

    pub fn is_endpoint(&self, date: NaiveDate) -> bool {
        date == self.from || self.to == Some(date)
    }
}

/// Text shown on the trigger button for the given range.
pub fn format_label(range: Option<&DateRange>, date_format: &str, placeholder: &str) -> String {
    match range {
        Some(DateRange { from, to: Some(to) }) => {
            format!("{} - {}", from.format(date_format), to.format(date_format))
        }
        Some(DateRange { from, to: None }) => from.format(date_format).to_string(),
        None => placeholder.to_string(),
    }
}
