use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike,
    Utc,
};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Calendar unit used for time-axis tick cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    /// Nominal length of one unit, used only to rank auto-tick candidates.
    #[must_use]
    pub fn approx_millis(self) -> i64 {
        match self {
            Self::Year => YEAR_MS,
            Self::Month => MONTH_MS,
            Self::Week => WEEK_MS,
            Self::Day => DAY_MS,
            Self::Hour => HOUR_MS,
            Self::Minute => MINUTE_MS,
            Self::Second => SECOND_MS,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }

    /// Start of the unit containing `time`.
    fn floor(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let date = time.date_naive();
        let naive = match self {
            Self::Second => time.naive_utc().with_nanosecond(0)?,
            Self::Minute => date.and_hms_opt(time.hour(), time.minute(), 0)?,
            Self::Hour => date.and_hms_opt(time.hour(), 0, 0)?,
            Self::Day => date.and_hms_opt(0, 0, 0)?,
            Self::Week => {
                let back = i64::from(date.weekday().num_days_from_sunday());
                (date - TimeDelta::days(back)).and_hms_opt(0, 0, 0)?
            }
            Self::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?
                .and_hms_opt(0, 0, 0)?,
            Self::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0)?,
        };
        Some(Utc.from_utc_datetime(&naive))
    }

    fn offset(self, time: DateTime<Utc>, count: u32) -> Option<DateTime<Utc>> {
        let count_i = i64::from(count);
        match self {
            Self::Second => time.checked_add_signed(TimeDelta::seconds(count_i)),
            Self::Minute => time.checked_add_signed(TimeDelta::minutes(count_i)),
            Self::Hour => time.checked_add_signed(TimeDelta::hours(count_i)),
            Self::Day => time.checked_add_signed(TimeDelta::days(count_i)),
            Self::Week => time.checked_add_signed(TimeDelta::weeks(count_i)),
            Self::Month => time.checked_add_months(Months::new(count)),
            Self::Year => time.checked_add_months(Months::new(count.checked_mul(12)?)),
        }
    }

    fn ceil(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let floored = self.floor(time)?;
        if floored < time {
            self.offset(floored, 1)
        } else {
            Some(floored)
        }
    }

    fn label_pattern(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::Month => "%b %Y",
            Self::Week | Self::Day => "%b %d",
            Self::Hour | Self::Minute => "%H:%M",
            Self::Second => "%H:%M:%S",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "year" | "years" => Ok(Self::Year),
            "month" | "months" => Ok(Self::Month),
            "week" | "weeks" => Ok(Self::Week),
            "day" | "days" => Ok(Self::Day),
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" => Ok(Self::Minute),
            "second" | "seconds" => Ok(Self::Second),
            other => Err(ChartError::InvalidOptions(format!(
                "unknown time unit `{other}`"
            ))),
        }
    }
}

/// Tick cadence: one tick every `interval` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTickSpec {
    pub unit: TimeUnit,
    pub interval: u32,
}

impl TimeTickSpec {
    #[must_use]
    pub fn new(unit: TimeUnit, interval: u32) -> Self {
        Self {
            unit,
            interval: interval.max(1),
        }
    }

    fn approx_millis(self) -> i64 {
        self.unit.approx_millis() * i64::from(self.interval)
    }
}

const AUTO_LADDER: [(TimeUnit, u32); 17] = [
    (TimeUnit::Second, 1),
    (TimeUnit::Second, 5),
    (TimeUnit::Second, 15),
    (TimeUnit::Second, 30),
    (TimeUnit::Minute, 1),
    (TimeUnit::Minute, 5),
    (TimeUnit::Minute, 15),
    (TimeUnit::Minute, 30),
    (TimeUnit::Hour, 1),
    (TimeUnit::Hour, 3),
    (TimeUnit::Hour, 6),
    (TimeUnit::Hour, 12),
    (TimeUnit::Day, 1),
    (TimeUnit::Day, 2),
    (TimeUnit::Week, 1),
    (TimeUnit::Month, 1),
    (TimeUnit::Month, 3),
];

/// Time axis mapping epoch milliseconds onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start_ms: i64,
    end_ms: i64,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start_ms: i64, end_ms: i64, range: (f64, f64)) -> ChartResult<Self> {
        if end_ms <= start_ms {
            return Err(ChartError::InvalidData(format!(
                "time domain must be increasing: start={start_ms}, end={end_ms}"
            )));
        }
        let linear = LinearScale::new((start_ms as f64, end_ms as f64), range)?;
        Ok(Self {
            start_ms,
            end_ms,
            linear,
        })
    }

    /// Builds a scale over a data extent, widening a single instant by one day
    /// on each side.
    pub fn from_extent(start_ms: i64, end_ms: i64, range: (f64, f64)) -> ChartResult<Self> {
        if start_ms == end_ms {
            return Self::new(start_ms - DAY_MS, end_ms + DAY_MS, range);
        }
        Self::new(start_ms.min(end_ms), start_ms.max(end_ms), range)
    }

    #[must_use]
    pub fn domain(self) -> (i64, i64) {
        (self.start_ms, self.end_ms)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn with_range(self, range: (f64, f64)) -> Self {
        Self {
            linear: self.linear.with_range(range),
            ..self
        }
    }

    #[must_use]
    pub fn domain_to_pixel(self, time_ms: f64) -> f64 {
        self.linear.domain_to_pixel(time_ms)
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        self.linear.pixel_to_domain(pixel)
    }

    /// Unit-aligned ticks on the half-open interval `[start, end)`, stepping
    /// by `interval` units from the first aligned instant.
    #[must_use]
    pub fn ticks_every(self, spec: TimeTickSpec) -> Vec<i64> {
        let (Some(start), Some(end)) = (
            DateTime::<Utc>::from_timestamp_millis(self.start_ms),
            DateTime::<Utc>::from_timestamp_millis(self.end_ms),
        ) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut cursor = spec.unit.ceil(start);
        while let Some(tick) = cursor {
            if tick >= end {
                break;
            }
            out.push(tick.timestamp_millis());
            cursor = spec.unit.offset(tick, spec.interval);
        }
        out
    }

    /// Picks a cadence from the standard ladder yielding about `count` ticks.
    #[must_use]
    pub fn auto_tick_spec(self, count: usize) -> TimeTickSpec {
        let target = (self.end_ms - self.start_ms) / (count.max(1) as i64);
        AUTO_LADDER
            .iter()
            .map(|&(unit, interval)| TimeTickSpec::new(unit, interval))
            .find(|spec| spec.approx_millis() >= target)
            .unwrap_or_else(|| {
                let years = (target as f64 / YEAR_MS as f64).ceil().max(1.0);
                let nice_years = crate::core::ticks::tick_step(0.0, years * count as f64, count)
                    .max(1.0)
                    .round();
                TimeTickSpec::new(TimeUnit::Year, nice_years as u32)
            })
    }

    #[must_use]
    pub fn auto_ticks(self, count: usize) -> (TimeTickSpec, Vec<i64>) {
        let spec = self.auto_tick_spec(count);
        (spec, self.ticks_every(spec))
    }
}

/// Formats a tick timestamp using the cadence's calendar unit.
#[must_use]
pub fn format_time_label(time_ms: i64, unit: TimeUnit, use_utc: bool) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp_millis(time_ms) else {
        return time_ms.to_string();
    };
    let pattern = unit.label_pattern();
    if use_utc {
        utc.format(pattern).to_string()
    } else {
        utc.with_timezone(&Local).format(pattern).to_string()
    }
}

/// Parses a data timestamp: RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, or `M/D/YYYY`.
///
/// Dates without an offset are read as UTC midnight.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc().timestamp_millis());
    }
    ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"]
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(text, pattern).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::{TimeScale, TimeTickSpec, TimeUnit, format_time_label, parse_timestamp};

    fn ms(text: &str) -> i64 {
        parse_timestamp(text).expect("timestamp")
    }

    #[test]
    fn day_ticks_cover_half_open_interval() {
        let scale =
            TimeScale::new(ms("2015-01-01"), ms("2015-10-01"), (0.0, 500.0)).expect("scale");
        let ticks = scale.ticks_every(TimeTickSpec::new(TimeUnit::Day, 1));
        assert_eq!(ticks.len(), 273);
        assert_eq!(ticks[0], ms("2015-01-01"));
    }

    #[test]
    fn quarterly_month_ticks_start_at_first_month() {
        let scale =
            TimeScale::new(ms("2015-01-01"), ms("2015-10-01"), (0.0, 500.0)).expect("scale");
        let ticks = scale.ticks_every(TimeTickSpec::new(TimeUnit::Month, 3));
        assert_eq!(
            ticks,
            vec![ms("2015-01-01"), ms("2015-04-01"), ms("2015-07-01")]
        );
    }

    #[test]
    fn ticks_begin_at_next_aligned_instant() {
        let scale = TimeScale::new(
            ms("2018-07-30T06:00:00Z"),
            ms("2018-08-02T00:00:00Z"),
            (0.0, 100.0),
        )
        .expect("scale");
        let ticks = scale.ticks_every(TimeTickSpec::new(TimeUnit::Day, 1));
        assert_eq!(ticks, vec![ms("2018-07-31"), ms("2018-08-01")]);
    }

    #[test]
    fn auto_ticks_pick_monthly_cadence_for_a_year() {
        let scale =
            TimeScale::new(ms("2015-01-01"), ms("2016-01-01"), (0.0, 500.0)).expect("scale");
        let (spec, ticks) = scale.auto_ticks(10);
        assert_eq!(spec, TimeTickSpec::new(TimeUnit::Month, 3));
        assert_eq!(ticks.len(), 4);
    }

    #[test]
    fn parses_slash_dates_and_units() {
        assert_eq!(ms("7/30/2015"), ms("2015-07-30"));
        assert_eq!("Day".parse::<TimeUnit>().expect("unit"), TimeUnit::Day);
        assert!("fortnight".parse::<TimeUnit>().is_err());
        assert_eq!(format_time_label(ms("2015-04-01"), TimeUnit::Month, true), "Apr 2015");
    }
}
