use anyhow::{Context, Result};
use chrono::{Datelike, Local, Timelike};
use tt_core::ClockTime;

/// Local wall-clock time and weekday index (Monday = 0).
pub fn local_now() -> Result<(ClockTime, usize)> {
    let now = Local::now();
    let clock = ClockTime::new(now.hour() as u8, now.minute() as u8).context("local clock out of range")?;
    Ok((clock, now.weekday().num_days_from_monday() as usize))
}
