//! Reduction of 3-hour forecast samples into one summary per calendar day.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike};

use crate::model::{DailyForecastSummary, RawForecastEntry, round1, title_case};

/// Forecast samples the provider produces per day (one every 3 hours).
pub const SAMPLES_PER_DAY: u8 = 8;

/// Longest forecast the free provider tier serves, in days.
pub const MAX_FORECAST_DAYS: u8 = 5;

const NOON: i64 = 12;

/// Clamp a requested day count into `1..=MAX_FORECAST_DAYS`.
pub fn clamp_days(days: i64) -> u8 {
    // Bounded by the clamp, so the cast cannot truncate.
    days.clamp(1, i64::from(MAX_FORECAST_DAYS)) as u8
}

/// Group `entries` by their local calendar date in `tz` and summarize each day.
///
/// Days come out in the order their first sample appears. Samples for a date
/// that reappears later in the input are merged into the existing day rather
/// than starting a new one. At most `limit` summaries are returned.
///
/// Samples whose timestamp cannot be represented are ignored; the OpenWeather
/// client rejects such payloads before they reach this point.
pub fn aggregate_daily<Tz: TimeZone>(
    entries: &[RawForecastEntry],
    tz: &Tz,
    limit: usize,
) -> Vec<DailyForecastSummary> {
    let mut days: Vec<(NaiveDate, Vec<(DateTime<Tz>, &RawForecastEntry)>)> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for entry in entries {
        let Some(local) = DateTime::from_timestamp(entry.dt, 0).map(|utc| utc.with_timezone(tz))
        else {
            continue;
        };
        let date = local.date_naive();

        match index.get(&date) {
            Some(&slot) => days[slot].1.push((local, entry)),
            None => {
                index.insert(date, days.len());
                days.push((date, vec![(local, entry)]));
            }
        }
    }

    days.iter()
        .take(limit)
        .filter_map(|(date, samples)| summarize_day(*date, samples))
        .collect()
}

fn summarize_day<Tz: TimeZone>(
    date: NaiveDate,
    samples: &[(DateTime<Tz>, &RawForecastEntry)],
) -> Option<DailyForecastSummary> {
    let temp_max = samples.iter().map(|(_, e)| e.temp).fold(f64::NEG_INFINITY, f64::max);
    let temp_min = samples.iter().map(|(_, e)| e.temp).fold(f64::INFINITY, f64::min);

    // min_by_key keeps the first of equally distant samples.
    let (_, midday) = samples
        .iter()
        .min_by_key(|(local, _)| (i64::from(local.hour()) - NOON).abs())?;

    Some(DailyForecastSummary {
        date: date.format("%Y-%m-%d").to_string(),
        day_name: date.format("%A").to_string(),
        temp_max: round1(temp_max),
        temp_min: round1(temp_min),
        description: title_case(&midday.description),
        icon: midday.icon.clone(),
        humidity: midday.humidity,
        wind_speed: midday.wind_speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn ts(date: &str, hour: u32) -> i64 {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp()
    }

    fn entry(dt: i64, temp: f64, desc: &str) -> RawForecastEntry {
        RawForecastEntry {
            dt,
            temp,
            humidity: 50,
            wind_speed: 1.0,
            description: desc.to_string(),
            icon: "01d".to_string(),
        }
    }

    #[test]
    fn clamp_days_limits_to_supported_range() {
        assert_eq!(clamp_days(0), 1);
        assert_eq!(clamp_days(-7), 1);
        assert_eq!(clamp_days(3), 3);
        assert_eq!(clamp_days(30), 5);
    }

    #[test]
    fn single_day_picks_noon_and_extremes() {
        let entries = vec![
            entry(ts("2024-01-01", 6), 10.2, "mist"),
            entry(ts("2024-01-01", 12), 12.5, "clear sky"),
            entry(ts("2024-01-01", 18), 9.8, "few clouds"),
        ];

        let days = aggregate_daily(&entries, &Utc, 5);

        assert_eq!(days.len(), 1);
        let day = &days[0];
        assert_eq!(day.date, "2024-01-01");
        assert_eq!(day.day_name, "Monday");
        assert_eq!(day.temp_max, 12.5);
        assert_eq!(day.temp_min, 9.8);
        assert_eq!(day.description, "Clear Sky");
    }

    #[test]
    fn representative_is_closest_to_noon() {
        let mut entries = vec![
            entry(ts("2024-03-05", 9), 5.0, "a"),
            entry(ts("2024-03-05", 12), 6.0, "b"),
            entry(ts("2024-03-05", 15), 7.0, "c"),
        ];
        entries[1].humidity = 81;
        entries[1].wind_speed = 4.4;
        entries[1].icon = "04d".into();

        let day = &aggregate_daily(&entries, &Utc, 5)[0];
        assert_eq!(day.description, "B");
        assert_eq!(day.humidity, 81);
        assert_eq!(day.wind_speed, 4.4);
        assert_eq!(day.icon, "04d");
    }

    #[test]
    fn equal_distance_from_noon_keeps_first_sample() {
        let entries = vec![
            entry(ts("2024-03-05", 9), 5.0, "morning"),
            entry(ts("2024-03-05", 15), 7.0, "afternoon"),
        ];

        let day = &aggregate_daily(&entries, &Utc, 5)[0];
        assert_eq!(day.description, "Morning");
    }

    #[test]
    fn one_summary_per_date_in_first_seen_order() {
        let entries: Vec<_> = ["2024-06-01", "2024-06-02", "2024-06-03"]
            .iter()
            .flat_map(|d| (0..8).map(move |i| entry(ts(d, i * 3), f64::from(i), "rain")))
            .collect();

        let days = aggregate_daily(&entries, &Utc, 5);
        let dates: Vec<_> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, ["2024-06-01", "2024-06-02", "2024-06-03"]);

        for day in &days {
            assert!(day.temp_max >= day.temp_min);
            assert_eq!(day.temp_max, 7.0);
            assert_eq!(day.temp_min, 0.0);
        }
    }

    #[test]
    fn truncates_to_limit() {
        let entries: Vec<_> = (1..=6)
            .map(|d| entry(ts(&format!("2024-06-0{d}"), 12), 20.0, "sun"))
            .collect();

        assert_eq!(aggregate_daily(&entries, &Utc, 2).len(), 2);
        assert_eq!(aggregate_daily(&entries, &Utc, 10).len(), 6);
        assert!(aggregate_daily(&entries, &Utc, 0).is_empty());
    }

    #[test]
    fn out_of_order_date_is_merged_into_existing_day() {
        let entries = vec![
            entry(ts("2024-06-01", 9), 10.0, "a"),
            entry(ts("2024-06-02", 9), 11.0, "b"),
            entry(ts("2024-06-01", 21), 3.0, "c"),
        ];

        let days = aggregate_daily(&entries, &Utc, 5);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2024-06-01");
        assert_eq!(days[0].temp_min, 3.0);
        assert_eq!(days[1].date, "2024-06-02");
    }

    #[test]
    fn dates_follow_the_given_offset() {
        // 23:00 UTC on Jan 1 is already Jan 2 at UTC+3.
        let entries = vec![
            entry(ts("2024-01-01", 20), 1.0, "a"),
            entry(ts("2024-01-01", 23), 2.0, "b"),
        ];

        let utc_days = aggregate_daily(&entries, &Utc, 5);
        assert_eq!(utc_days.len(), 1);

        let plus3 = FixedOffset::east_opt(3 * 3600).unwrap();
        let local_days = aggregate_daily(&entries, &plus3, 5);
        assert_eq!(local_days.len(), 2);
        assert_eq!(local_days[0].date, "2024-01-01");
        assert_eq!(local_days[1].date, "2024-01-02");
    }

    #[test]
    fn empty_input_yields_no_days() {
        assert!(aggregate_daily(&[], &Utc, 5).is_empty());
    }
}
