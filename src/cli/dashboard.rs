//! Dashboard command

use super::month_or_current;
use crate::config::settings::Settings;
use crate::display::format_dashboard;
use crate::error::FiscalResult;
use crate::services::DashboardService;
use crate::storage::Storage;

pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    month: Option<&str>,
) -> FiscalResult<()> {
    let month = month_or_current(month)?;
    let summary = DashboardService::new(storage).summary(month)?;
    print!("{}", format_dashboard(&summary, &settings.currency_symbol));
    Ok(())
}
