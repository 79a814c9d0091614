use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use holiday_core::YearWindow;
use owo_colors::OwoColorize;

use crate::commands::{authenticate_and_sync, load_picker};
use crate::render::{self, DayStyle};

pub async fn run(month: Option<u32>, select: Option<NaiveDate>) -> Result<()> {
    let mut picker = load_picker()?;

    // Bad arguments fail before any network traffic
    let window = picker.config().window;
    let (selected, month) = resolve_selection(&window, month, select)?;

    let failure = authenticate_and_sync(&mut picker).await?;

    let lookup = picker.lookup();

    println!("{}\n", "Company Holiday Calendar".bold());
    println!(
        "{}",
        render::render_month(window.year(), month, Some(selected), |day| lookup
            .lookup(day))
    );
    println!();

    // Stands in for the hover tooltip
    match lookup.lookup(selected) {
        Some(holiday) => {
            let style = DayStyle::for_holiday(Some(&holiday));
            let label = match style.border {
                Some(color) => render::paint(&holiday.to_string(), color),
                None => holiday.to_string(),
            };
            println!("{} {}", selected.format("%a %b %e").to_string().dimmed(), label);
        }
        None => println!(
            "{} {}",
            selected.format("%a %b %e").to_string().dimmed(),
            "No holiday".dimmed()
        ),
    }

    if failure.is_some() {
        println!("{}", "Holidays could not be loaded.".red());
    }

    println!("\n{}", render::render_legend());

    Ok(())
}

/// The day to select and the month to draw.
fn resolve_selection(
    window: &YearWindow,
    month: Option<u32>,
    select: Option<NaiveDate>,
) -> Result<(NaiveDate, u32)> {
    if let Some(m) = month.filter(|m| !(1..=12).contains(m)) {
        anyhow::bail!("Invalid month {}. Expected 1-12", m);
    }

    if let Some(day) = select.filter(|d| !window.contains(*d)) {
        anyhow::bail!("{} is outside the synced year {}", day, window.year());
    }

    let selected = select.unwrap_or_else(|| default_selection(window, month));
    Ok((selected, month.unwrap_or(selected.month())))
}

/// Today when it falls in the synced year, otherwise the first of the
/// requested month (or Jan 1).
fn default_selection(window: &YearWindow, month: Option<u32>) -> NaiveDate {
    let today = Local::now().date_naive();

    match month {
        Some(m) if today.month() == m && window.contains(today) => today,
        Some(m) => NaiveDate::from_ymd_opt(window.year(), m, 1).unwrap_or(window.first_day()),
        None if window.contains(today) => today,
        None => window.first_day(),
    }
}
