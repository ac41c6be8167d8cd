use crate::data::{format_label, DateRange, PickerSettings};
use anyhow::Result;

pub fn run(range: Option<DateRange>, settings: &PickerSettings, json: bool) -> Result<()> {
    write_range(range.as_ref(), settings, json, &mut std::io::stdout())
}

/// Prints a range either as the trigger label or as JSON (`null` when unset).
pub(crate) fn write_range<W: std::io::Write>(
    range: Option<&DateRange>,
    settings: &PickerSettings,
    json: bool,
    out: &mut W,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(&range)?)?;
    } else {
        writeln!(
            out,
            "{}",
            format_label(range, &settings.date_format, &settings.placeholder)
        )?;
    }
    Ok(())
}
