use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};

/// An inclusive span of calendar days, as chosen in a range picker.
///
/// `to` may be absent while the user has only picked the first day; the
/// range then covers `from` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range, swapping the ends if `to` precedes `from`
    pub fn new(from: NaiveDate, to: Option<NaiveDate>) -> Self {
        match to {
            Some(to) if to < from => Self {
                from: to,
                to: Some(from),
            },
            _ => Self { from, to },
        }
    }

    /// Range covering a single day
    pub fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: None }
    }

    /// Range for a picker preset ending today
    pub fn from_preset(preset: DateRangePreset, today: NaiveDate) -> Self {
        Self::new(preset.start(today), Some(today))
    }

    /// First day of the range
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    /// Last day as picked, if any
    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    /// Last day covered by the range
    pub fn last_day(&self) -> NaiveDate {
        self.to.unwrap_or(self.from)
    }

    /// Whether `day` lies inside the range
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.last_day()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to {
            Some(to) => write!(
                f,
                "{} - {}",
                self.from.format("%b %d, %Y"),
                to.format("%b %d, %Y")
            ),
            None => write!(f, "{}", self.from.format("%b %d, %Y")),
        }
    }
}

/// Quick picks offered next to the range calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangePreset {
    Last7Days,
    Last3Weeks,
    LastMonth,
    Last3Months,
    Last6Months,
    LastYear,
}

impl DateRangePreset {
    /// All presets in display order
    pub const ALL: [DateRangePreset; 6] = [
        DateRangePreset::Last7Days,
        DateRangePreset::Last3Weeks,
        DateRangePreset::LastMonth,
        DateRangePreset::Last3Months,
        DateRangePreset::Last6Months,
        DateRangePreset::LastYear,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            DateRangePreset::Last7Days => "Last 7 days",
            DateRangePreset::Last3Weeks => "Last 3 weeks",
            DateRangePreset::LastMonth => "Last month",
            DateRangePreset::Last3Months => "Last 3 months",
            DateRangePreset::Last6Months => "Last 6 months",
            DateRangePreset::LastYear => "Last year",
        }
    }

    /// Machine-readable name, also accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            DateRangePreset::Last7Days => "last-7-days",
            DateRangePreset::Last3Weeks => "last-3-weeks",
            DateRangePreset::LastMonth => "last-month",
            DateRangePreset::Last3Months => "last-3-months",
            DateRangePreset::Last6Months => "last-6-months",
            DateRangePreset::LastYear => "last-year",
        }
    }

    /// First day of the preset when it ends on `today`.
    /// Day counts include today; month steps clamp to the end of shorter months.
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        let start = match self {
            DateRangePreset::Last7Days => today.checked_sub_days(Days::new(6)),
            DateRangePreset::Last3Weeks => today.checked_sub_days(Days::new(20)),
            DateRangePreset::LastMonth => today.checked_sub_months(Months::new(1)),
            DateRangePreset::Last3Months => today.checked_sub_months(Months::new(3)),
            DateRangePreset::Last6Months => today.checked_sub_months(Months::new(6)),
            DateRangePreset::LastYear => today.checked_sub_months(Months::new(12)),
        };
        start.unwrap_or(NaiveDate::MIN)
    }
}

impl FromStr for DateRangePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateRangePreset::ALL
            .into_iter()
            .find(|preset| preset.name() == s.trim())
            .ok_or_else(|| {
                let names: Vec<&str> = DateRangePreset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown range preset {s:?}, expected one of: {}", names.join(", "))
            })
    }
}
