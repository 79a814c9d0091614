use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::commands::{authenticate_and_sync, load_picker};
use crate::render;

pub async fn run(date: NaiveDate) -> Result<()> {
    let mut picker = load_picker()?;

    let window = picker.config().window;
    if !window.contains(date) {
        anyhow::bail!(
            "{} is outside the synced year {}. Set `year` in the config to look up other years.",
            date,
            window.year()
        );
    }

    if let Some(e) = authenticate_and_sync(&mut picker).await? {
        return Err(e.into());
    }

    match picker.lookup().lookup(date) {
        Some(holiday) => println!("{}", render::render_holiday(&holiday)),
        None => println!("{}", format!("No holiday on {}", date).dimmed()),
    }

    Ok(())
}
