use crate::data::AppSettings;
use crate::ui::app::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::info;

pub fn run(settings: AppSettings, start_date: Option<NaiveDate>) -> Result<()> {
    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let start_date = start_date.unwrap_or(today);
    info!(%today, %start_date, "starting daylist");
    let mut app = App::new(settings, today, start_date);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    info!("daylist exited");

    result
}
