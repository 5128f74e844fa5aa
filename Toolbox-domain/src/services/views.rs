//! Derived views over a readings collection: the per-day table, range
//! filtering, calendar markers and chart points.
//!
//! Day boundaries are local calendar days, never UTC midnight. Each view
//! has an `_in` variant taking the timezone explicitly.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::entities::{DateRange, Reading};
use crate::services::insights::{categorize_reading, BloodPressureCategory};

/// One point handed to the chart collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Local time label, e.g. `Jun 13, 8:05 AM`
    pub label: String,
    pub systolic: u16,
    pub diastolic: u16,
}

/// One row of the selected day's table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRow {
    /// Local time of day, e.g. `8:05 AM`
    pub time: String,
    pub systolic: u16,
    pub diastolic: u16,
    pub category: BloodPressureCategory,
}

/// Sort ascending by timestamp; equal timestamps keep their order
pub fn sort_chronologically(readings: &mut [Reading]) {
    readings.sort_by_key(|reading| reading.timestamp());
}

/// Readings taken on `day` in local time, ascending
pub fn filter_by_day(readings: &[Reading], day: NaiveDate) -> Vec<Reading> {
    filter_by_day_in(readings, day, &Local)
}

pub fn filter_by_day_in<Tz: TimeZone>(readings: &[Reading], day: NaiveDate, tz: &Tz) -> Vec<Reading> {
    filter_sorted(readings, |reading| reading.day_in(tz) == day)
}

/// Readings inside `range` in local time, ascending. No range keeps everything.
pub fn filter_by_range(readings: &[Reading], range: Option<&DateRange>) -> Vec<Reading> {
    filter_by_range_in(readings, range, &Local)
}

pub fn filter_by_range_in<Tz: TimeZone>(
    readings: &[Reading],
    range: Option<&DateRange>,
    tz: &Tz,
) -> Vec<Reading> {
    match range {
        Some(range) => filter_sorted(readings, |reading| range.contains(reading.day_in(tz))),
        None => filter_sorted(readings, |_| true),
    }
}

fn filter_sorted<F>(readings: &[Reading], keep: F) -> Vec<Reading>
where
    F: Fn(&Reading) -> bool,
{
    let mut selected: Vec<Reading> = readings.iter().filter(|r| keep(*r)).cloned().collect();
    sort_chronologically(&mut selected);
    selected
}

/// Local days that have at least one reading
pub fn recorded_days(readings: &[Reading]) -> BTreeSet<NaiveDate> {
    recorded_days_in(readings, &Local)
}

pub fn recorded_days_in<Tz: TimeZone>(readings: &[Reading], tz: &Tz) -> BTreeSet<NaiveDate> {
    readings.iter().map(|reading| reading.day_in(tz)).collect()
}

/// Chart points in chronological order
pub fn chart_points(readings: &[Reading]) -> Vec<ChartPoint> {
    chart_points_in(readings, &Local)
}

pub fn chart_points_in<Tz>(readings: &[Reading], tz: &Tz) -> Vec<ChartPoint>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    filter_sorted(readings, |_| true)
        .into_iter()
        .map(|reading| ChartPoint {
            label: reading
                .timestamp()
                .with_timezone(tz)
                .format("%b %-d, %-I:%M %p")
                .to_string(),
            systolic: reading.systolic(),
            diastolic: reading.diastolic(),
        })
        .collect()
}

/// Table rows for the readings taken on `day`
pub fn daily_rows(readings: &[Reading], day: NaiveDate) -> Vec<DailyRow> {
    daily_rows_in(readings, day, &Local)
}

pub fn daily_rows_in<Tz>(readings: &[Reading], day: NaiveDate, tz: &Tz) -> Vec<DailyRow>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    filter_by_day_in(readings, day, tz)
        .into_iter()
        .map(|reading| DailyRow {
            time: reading
                .timestamp()
                .with_timezone(tz)
                .format("%-I:%M %p")
                .to_string(),
            systolic: reading.systolic(),
            diastolic: reading.diastolic(),
            category: categorize_reading(&reading),
        })
        .collect()
}
