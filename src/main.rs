use anyhow::Result;
use chrono::Local;
use log::error;
use crate::initialization::init;
use crate::worker::run;

mod config;
mod initialization;
mod logging;
mod manager_mail;
mod manager_weather;
mod models;
mod report;
mod status;
mod weekend;
mod worker;

fn main() -> Result<()> {
    // If initialization fails logging may not be set up, the error is left to the exit status
    let (config, mgr, cities, dry_run) = init()?;

    let run_date = Local::now().date_naive();

    if let Err(e) = run(&config, &mgr, &cities, run_date, dry_run) {
        error!("Run failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
