//! Plain-text rendering of readings and command outcomes

use std::fmt;
use std::io::{self, Write};

use chrono::{Local, NaiveDate, TimeZone};
use toolbox_domain::entities::{Notice, Reading};
use toolbox_domain::services::insights::{categorize_reading, ReadingsSummary};
use toolbox_domain::services::views::{ChartPoint, DailyRow};

use crate::commands::Outcome;

/// One reading with its local date and time
pub fn format_reading(reading: &Reading) -> String {
    format_reading_in(reading, &Local)
}

pub fn format_reading_in<Tz>(reading: &Reading, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!(
        "{}  {:>3}/{:<3} mmHg  {}",
        reading.timestamp().with_timezone(tz).format("%Y-%m-%d %I:%M %p"),
        reading.systolic(),
        reading.diastolic(),
        categorize_reading(reading)
    )
}

pub fn format_daily_row(row: &DailyRow) -> String {
    format!(
        "{:>8}  {:>3}/{:<3} mmHg  {}",
        row.time, row.systolic, row.diastolic, row.category
    )
}

pub fn format_chart_point(point: &ChartPoint) -> String {
    format!("{:<20}  {:>3}/{:<3}", point.label, point.systolic, point.diastolic)
}

pub fn format_summary(summary: &ReadingsSummary) -> Vec<String> {
    vec![
        format!("Readings:  {}", summary.reading_count),
        format!(
            "Average:   {:.0}/{:.0} mmHg ({})",
            summary.avg_systolic, summary.avg_diastolic, summary.category
        ),
        format!("Systolic:  {}-{}", summary.min_systolic, summary.max_systolic),
        format!("Diastolic: {}-{}", summary.min_diastolic, summary.max_diastolic),
        format!(
            "Period:    {} to {}",
            summary.first_taken.with_timezone(&Local).format("%b %d, %Y"),
            summary.last_taken.with_timezone(&Local).format("%b %d, %Y")
        ),
    ]
}

/// Empty-state line for a day without readings
pub fn no_readings_on(day: NaiveDate) -> String {
    format!("No readings recorded for {}.", day.format("%b %d, %Y"))
}

/// Write the outcome lines, then the notice, to stdout
pub fn print_outcome(outcome: &Outcome) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in &outcome.lines {
        writeln!(out, "{line}")?;
    }
    if let Some(notice) = &outcome.notice {
        writeln!(out, "{notice}")?;
    }
    out.flush()
}

/// Write a failure notice to stderr
pub fn print_failure(notice: &Notice) -> io::Result<()> {
    let stderr = io::stderr();
    let mut err = stderr.lock();
    writeln!(err, "{notice}")?;
    err.flush()
}
