pub mod persistence;
pub mod picker_settings;
pub mod range;

pub use picker_settings::{PickerSettings, WeekStart};
pub use range::{format_label, DateRange};
