pub mod dates;
pub mod presets;

pub use presets::DATE_PRESETS;
