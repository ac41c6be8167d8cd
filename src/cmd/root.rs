use crate::cmd::label::write_range;
use crate::data::{DateRange, PickerSettings};
use crate::ui::app::{run_app, App};
use crate::ui::picker::DateRangePicker;
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;
use tracing::info;

pub fn run(
    settings: PickerSettings,
    range: Option<DateRange>,
    class_name: Option<String>,
    json: bool,
) -> Result<()> {
    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let mut picker = DateRangePicker::new(today, range.as_ref(), settings.clone());
    if let Some(class_name) = class_name {
        picker = picker.with_class_name(class_name);
    }
    let mut app = App::new(picker, range);
    info!(%today, ?range, "picker started");

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result?;

    info!(range = ?app.range, "picker closed");
    write_range(app.range.as_ref(), &settings, json, &mut std::io::stdout())
}
