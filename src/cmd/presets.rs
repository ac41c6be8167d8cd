use crate::calc::DATE_PRESETS;
use crate::data::{format_label, PickerSettings};
use anyhow::Result;
use chrono::NaiveDate;

pub fn run(today: NaiveDate, settings: &PickerSettings) -> Result<()> {
    write_presets(today, settings, &mut std::io::stdout())
}

pub(crate) fn write_presets<W: std::io::Write>(
    today: NaiveDate,
    settings: &PickerSettings,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Quick select (today: {})", today)?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<14} {:<12} {:<12} {}", "Preset", "From", "To", "Label")?;
    for preset in &DATE_PRESETS {
        let range = preset.range(today);
        let to = range.to.map(|t| t.to_string()).unwrap_or_default();
        writeln!(
            out,
            "  {:<14} {:<12} {:<12} {}",
            preset.name,
            range.from,
            to,
            format_label(Some(&range), &settings.date_format, &settings.placeholder)
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} preset(s)", DATE_PRESETS.len())?;
    Ok(())
}
