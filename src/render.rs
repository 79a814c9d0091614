//! Terminal rendering of the holiday picker.
//!
//! Days are drawn as 4-column cells. Holidays get the background color of
//! their classification with accent-colored brackets as a border, and the
//! selected day uses the hover color.

use chrono::{Datelike, NaiveDate, Weekday};
use holiday_core::{Classification, HolidayRecord};
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

const PUBLIC_BACKGROUND: Rgb = Rgb(0xff, 0xeb, 0xee);
const PUBLIC_ACCENT: Rgb = Rgb(0xd3, 0x2f, 0x2f);
const PUBLIC_HOVER: Rgb = Rgb(0xff, 0xcd, 0xd2);

const WORK_BACKGROUND: Rgb = Rgb(0xe3, 0xf2, 0xfd);
const WORK_ACCENT: Rgb = Rgb(0x19, 0x76, 0xd2);
const WORK_HOVER: Rgb = Rgb(0xbb, 0xde, 0xfb);

/// Visual treatment of one day. `None` fields leave the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayStyle {
    pub background: Option<Rgb>,
    pub border: Option<Rgb>,
    pub hover: Option<Rgb>,
    pub text: Option<Rgb>,
}

impl DayStyle {
    pub fn for_classification(classification: Option<Classification>) -> Self {
        match classification {
            Some(Classification::Public) => DayStyle {
                background: Some(PUBLIC_BACKGROUND),
                border: Some(PUBLIC_ACCENT),
                hover: Some(PUBLIC_HOVER),
                text: Some(BLACK),
            },
            Some(Classification::Work) => DayStyle {
                background: Some(WORK_BACKGROUND),
                border: Some(WORK_ACCENT),
                hover: Some(WORK_HOVER),
                text: Some(BLACK),
            },
            None => DayStyle::default(),
        }
    }

    pub fn for_holiday(holiday: Option<&HolidayRecord>) -> Self {
        Self::for_classification(holiday.map(|h| h.classification()))
    }

    pub fn is_plain(&self) -> bool {
        *self == DayStyle::default()
    }
}

/// Accent color used for a classification in legends and lists.
pub fn accent(classification: Classification) -> Rgb {
    match classification {
        Classification::Public => PUBLIC_ACCENT,
        Classification::Work => WORK_ACCENT,
    }
}

pub fn paint(text: &str, color: Rgb) -> String {
    text.truecolor(color.0, color.1, color.2).to_string()
}

/// One day cell, e.g. ` 5 ` or `[26]`.
pub fn day_cell(day: NaiveDate, style: DayStyle, selected: bool) -> String {
    let number = format!("{:>2}", day.day());

    if style.is_plain() {
        return if selected {
            format!(" {} ", number.reversed())
        } else {
            format!(" {} ", number)
        };
    }

    let background = if selected { style.hover } else { style.background };
    let text = style.text.unwrap_or(BLACK);

    let number = match background {
        Some(bg) => number
            .truecolor(text.0, text.1, text.2)
            .on_truecolor(bg.0, bg.1, bg.2)
            .to_string(),
        None => number.truecolor(text.0, text.1, text.2).to_string(),
    };

    match style.border {
        Some(border) => format!("{}{}{}", paint("[", border), number, paint("]", border)),
        None => format!(" {} ", number),
    }
}

/// Weeks of a month, Monday first. Days outside the month are `None`.
pub fn month_weeks(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut day = first;

    while day.month() == month {
        let column = day.weekday().num_days_from_monday() as usize;
        week[column] = Some(day);

        if day.weekday() == Weekday::Sun {
            weeks.push(week);
            week = [None; 7];
        }

        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }

    weeks
}

/// The month grid with a title row and weekday header.
pub fn render_month<F>(year: i32, month: u32, selected: Option<NaiveDate>, lookup: F) -> String
where
    F: Fn(NaiveDate) -> Option<HolidayRecord>,
{
    let mut lines = Vec::new();

    let title = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();
    lines.push(format!("{:^28}", title).bold().to_string());
    lines.push(
        ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
            .iter()
            .map(|d| format!(" {} ", d))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for week in month_weeks(year, month) {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let holiday = lookup(*day);
                    day_cell(
                        *day,
                        DayStyle::for_holiday(holiday.as_ref()),
                        selected == Some(*day),
                    )
                }
                None => "    ".to_string(),
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

/// The `■ Public Holiday` / `■ Work Holiday` legend.
pub fn render_legend() -> String {
    [Classification::Public, Classification::Work]
        .iter()
        .map(|c| paint(&format!("■ {} Holiday", c), accent(*c)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A holiday as a single line: date, tag, title.
pub fn render_holiday(holiday: &HolidayRecord) -> String {
    let tag = paint(
        &format!("[{}]", holiday.classification()),
        accent(holiday.classification()),
    );
    format!(
        "  {} {} {}",
        holiday.date().format("%a %b %e").to_string().dimmed(),
        holiday,
        tag
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_style_per_classification() {
        let public = DayStyle::for_classification(Some(Classification::Public));
        assert_eq!(public.background, Some(Rgb(0xff, 0xeb, 0xee)));
        assert_eq!(public.border, Some(Rgb(0xd3, 0x2f, 0x2f)));
        assert_eq!(public.hover, Some(Rgb(0xff, 0xcd, 0xd2)));
        assert_eq!(public.text, Some(BLACK));

        let work = DayStyle::for_classification(Some(Classification::Work));
        assert_eq!(work.background, Some(Rgb(0xe3, 0xf2, 0xfd)));
        assert_eq!(work.border, Some(Rgb(0x19, 0x76, 0xd2)));
        assert_eq!(work.hover, Some(Rgb(0xbb, 0xde, 0xfb)));

        assert!(DayStyle::for_classification(None).is_plain());
    }

    #[test]
    fn test_plain_day_cell_has_no_escape_codes() {
        let cell = day_cell(day(2024, 1, 5), DayStyle::default(), false);
        assert_eq!(cell, "  5 ");
    }

    #[test]
    fn test_holiday_cell_is_bracketed_and_colored() {
        let style = DayStyle::for_classification(Some(Classification::Public));
        let cell = day_cell(day(2024, 1, 26), style, false);

        assert!(cell.contains("26"));
        assert!(cell.contains('['));
        assert!(cell.contains(']'));
        assert!(cell.contains("\x1b["));
        assert_ne!(cell, day_cell(day(2024, 1, 26), style, true));
    }

    #[test]
    fn test_month_weeks_start_on_monday() {
        // Jan 1 2024 was a Monday
        let weeks = month_weeks(2024, 1);

        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0], Some(day(2024, 1, 1)));
        assert_eq!(weeks[4][2], Some(day(2024, 1, 31)));
        assert_eq!(weeks[4][3], None);
    }

    #[test]
    fn test_month_weeks_pad_leading_days() {
        // Feb 1 2024 was a Thursday
        let weeks = month_weeks(2024, 2);

        assert!(weeks[0][..3].iter().all(Option::is_none));
        assert_eq!(weeks[0][3], Some(day(2024, 2, 1)));
        let days: usize = weeks.iter().map(|w| w.iter().flatten().count()).sum();
        assert_eq!(days, 29);
    }

    #[test]
    fn test_december_terminates() {
        let weeks = month_weeks(2024, 12);
        let last = weeks.last().unwrap().iter().flatten().last().copied();
        assert_eq!(last, Some(day(2024, 12, 31)));
    }

    #[test]
    fn test_render_month_queries_every_day() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let grid = render_month(2024, 1, None, |d| {
            calls.set(calls.get() + 1);
            (d == day(2024, 1, 26))
                .then(|| HolidayRecord::new(d, Classification::Public, "Republic Day"))
        });

        assert_eq!(calls.get(), 31);
        assert!(grid.contains("January 2024"));
        assert!(grid.contains("26"));
    }
}
