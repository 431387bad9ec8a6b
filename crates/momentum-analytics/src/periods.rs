//! Time Range Builder: a period selector and a reference instant become
//! the current calendar window and the one immediately before it.
//!
//! All calendar arithmetic happens in UTC.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Timestamp, ToSpan};
use tracing::debug;

use momentum_core::models::time_range::{Period, TimeRange, TimeRanges};

use crate::error::AnalyticsError;

/// Build the current and previous windows for `period`.
///
/// Week, month, quarter and year windows are calendar aligned (ISO weeks
/// start on Monday). `Custom` never computes anything: the explicit ranges
/// are returned as given, and their absence is an error.
pub fn build_time_ranges(
    period: Period,
    reference: Timestamp,
    custom: Option<&TimeRanges>,
) -> Result<TimeRanges, AnalyticsError> {
    let date = utc_date(reference);

    let ranges = match period {
        Period::Week => {
            let start = week_start(date);
            let previous = start.checked_sub(7.days())?;
            let end = start.checked_add(7.days())?;
            TimeRanges {
                current: window(start, end, week_label(start))?,
                previous: window(previous, start, week_label(previous))?,
            }
        }
        Period::Month => {
            let start = date.first_of_month();
            let previous = start.checked_sub(1.month())?;
            let end = start.checked_add(1.month())?;
            TimeRanges {
                current: window(start, end, month_label(start))?,
                previous: window(previous, start, month_label(previous))?,
            }
        }
        Period::Quarter => {
            let start = Date::new(date.year(), quarter_of(date) * 3 - 2, 1)?;
            let previous = start.checked_sub(3.months())?;
            let end = start.checked_add(3.months())?;
            TimeRanges {
                current: window(start, end, quarter_label(start))?,
                previous: window(previous, start, quarter_label(previous))?,
            }
        }
        Period::Year => {
            let start = Date::new(date.year(), 1, 1)?;
            let previous = start.checked_sub(1.year())?;
            let end = start.checked_add(1.year())?;
            TimeRanges {
                current: window(start, end, start.year().to_string())?,
                previous: window(previous, start, previous.year().to_string())?,
            }
        }
        Period::Custom => {
            let ranges = custom.ok_or(AnalyticsError::InvalidPeriod(Period::Custom))?;
            for range in [&ranges.current, &ranges.previous] {
                if range.start > range.end {
                    return Err(AnalyticsError::InvertedRange {
                        label: range.label.clone(),
                    });
                }
            }
            ranges.clone()
        }
    };

    debug!(
        %period,
        current = %ranges.current.label,
        previous = %ranges.previous.label,
        "built comparison windows"
    );

    Ok(ranges)
}

/// Calendar date of an instant in UTC.
pub fn utc_date(at: Timestamp) -> Date {
    at.to_zoned(TimeZone::UTC).date()
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: Date) -> Date {
    let offset = i64::from(date.weekday().to_monday_zero_offset());
    date.saturating_sub(offset.days())
}

/// `YYYY-Www`, using the ISO week-numbering year.
pub fn week_label(date: Date) -> String {
    let iso = date.iso_week_date();
    format!("{:04}-W{:02}", iso.year(), iso.week())
}

/// `YYYY-MM`.
pub fn month_label(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// `YYYY-Qn`.
pub fn quarter_label(date: Date) -> String {
    format!("{:04}-Q{}", date.year(), quarter_of(date))
}

fn quarter_of(date: Date) -> i8 {
    (date.month() - 1) / 3 + 1
}

fn window(start: Date, end: Date, label: String) -> Result<TimeRange, AnalyticsError> {
    Ok(TimeRange::new(day_start(start)?, day_start(end)?, label))
}

fn day_start(date: Date) -> Result<Timestamp, AnalyticsError> {
    Ok(date.to_zoned(TimeZone::UTC)?.timestamp())
}
