use chrono::{DateTime, Datelike, Days, Local, NaiveDate, SecondsFormat, TimeZone, Utc, Weekday};
use serde::Serialize;

// Report boundaries: midnight today and the oldest completion instant to ask Asana for.

/// Lookback used when no explicit day count is given on the first weekday after the weekend.
const WEEKEND_BRIDGE_DAYS: u64 = 3;
const DEFAULT_DAYS: u64 = 1;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
pub struct TimeWindow {
  pub today_midnight: DateTime<Local>,
  pub earliest_inclusive: DateTime<Local>,
  pub days: u64,
}

impl TimeWindow {
  /// Build the window for `now`. A `days` of `None` or `0` means 1, or 3 on a Monday.
  pub fn compute(days: Option<u32>, now: DateTime<Local>) -> Self {
    let days = match days {
      Some(d) if d > 0 => u64::from(d),
      _ => default_days(now.weekday()),
    };

    let today = now.date_naive();
    let earliest_day = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);

    TimeWindow {
      today_midnight: local_midnight(today),
      earliest_inclusive: local_midnight(earliest_day),
      days,
    }
  }

  /// `earliest_inclusive` as the RFC 3339 value for `completed_since` (UTC, `Z` suffix).
  pub fn completed_since(&self) -> String {
    self
      .earliest_inclusive
      .with_timezone(&Utc)
      .to_rfc3339_opts(SecondsFormat::Secs, true)
  }
}

fn default_days(weekday: Weekday) -> u64 {
  if weekday == Weekday::Mon {
    WEEKEND_BRIDGE_DAYS
  } else {
    DEFAULT_DAYS
  }
}

/// Start of `day` in the local zone. Zones that skip midnight for DST fall back to the UTC reading of the same wall time.
fn local_midnight(day: NaiveDate) -> DateTime<Local> {
  let naive = day.and_time(chrono::NaiveTime::MIN);
  Local
    .from_local_datetime(&naive)
    .earliest()
    .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}
