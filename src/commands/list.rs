use anyhow::Result;
use holiday_core::{Classification, HolidaySet};
use owo_colors::OwoColorize;

use crate::commands::{authenticate_and_sync, load_picker};
use crate::render;

pub async fn run(json: bool) -> Result<()> {
    let mut picker = load_picker()?;

    if let Some(e) = authenticate_and_sync(&mut picker).await? {
        return Err(e.into());
    }

    let holidays = picker.holidays();
    let year = picker.config().window.year();

    if json {
        println!("{}", serde_json::to_string_pretty(&*holidays)?);
        return Ok(());
    }

    if holidays.is_empty() {
        println!("{}", format!("No holidays in {}", year).dimmed());
        return Ok(());
    }

    for line in render_by_month(&holidays, year) {
        println!("{}", line);
    }

    println!(
        "\n{} public, {} work",
        holidays.count(Classification::Public),
        holidays.count(Classification::Work)
    );

    Ok(())
}

/// Holidays grouped under month headings, in set order within each month.
fn render_by_month(holidays: &HolidaySet, year: i32) -> Vec<String> {
    let mut lines = Vec::new();

    for month in 1..=12 {
        let mut in_month = holidays.in_month(year, month).peekable();
        let Some(first) = in_month.peek() else {
            continue;
        };

        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(first.date().format("%B").to_string().bold().to_string());
        lines.extend(in_month.map(render::render_holiday));
    }

    lines
}
