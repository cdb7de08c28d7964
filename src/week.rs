use std::fmt;

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, TimeDelta, Utc};

use crate::utils::local_today;

const DAYS_PER_WEEK: i64 = 7;

/// 1-indexed study week containing `today`; the epoch day is week 1.
///
/// Dates before the epoch floor towards negative infinity, so the day before
/// the epoch is week 0 and callers decide what to do with non-positive weeks.
pub fn calculate_weeks_passed(today: NaiveDate, epoch: NaiveDate) -> i64 {
    let elapsed = today.signed_duration_since(epoch).num_days();
    elapsed.div_euclid(DAYS_PER_WEEK) + 1
}

pub fn weeks_passed_at(now: DateTime<Utc>, epoch: NaiveDate, offset: &FixedOffset) -> i64 {
    calculate_weeks_passed(local_today(now, offset), epoch)
}

/// The seven days belonging to one study week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn for_week(week: i64, epoch: NaiveDate) -> Self {
        let start = epoch + TimeDelta::days((week - 1) * DAYS_PER_WEEK);
        let end = start + Days::new(6);
        Self { start, end }
    }
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}부터 {}까지",
            month_day(self.start),
            month_day(self.end)
        )
    }
}

/// Korean numeric month/day without a year, e.g. `9. 16.`
pub fn month_day(date: NaiveDate) -> String {
    format!("{}. {}.", date.month(), date.day())
}

pub fn week_date_range(week: i64, epoch: NaiveDate) -> String {
    WeekRange::for_week(week, epoch).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_day_is_week_one() {
        let epoch = date(2024, 9, 16);
        assert_eq!(calculate_weeks_passed(epoch, epoch), 1);
        assert_eq!(calculate_weeks_passed(date(2024, 9, 22), epoch), 1);
        assert_eq!(calculate_weeks_passed(date(2024, 9, 23), epoch), 2);
        assert_eq!(calculate_weeks_passed(date(2024, 10, 30), epoch), 7);
    }

    #[test]
    fn matches_floor_formula_after_epoch() {
        let epoch = date(2024, 8, 19);
        for offset in 0..400 {
            let today = epoch + Days::new(offset);
            let week = calculate_weeks_passed(today, epoch);
            assert_eq!(week, offset as i64 / 7 + 1);
            assert!(week >= 1);
        }
    }

    #[test]
    fn before_epoch_is_not_positive() {
        let epoch = date(2024, 9, 16);
        assert_eq!(calculate_weeks_passed(date(2024, 9, 15), epoch), 0);
        assert_eq!(calculate_weeks_passed(date(2024, 9, 9), epoch), 0);
        assert_eq!(calculate_weeks_passed(date(2024, 9, 8), epoch), -1);
    }

    #[test]
    fn local_offset_decides_the_day() {
        let epoch = date(2024, 9, 16);
        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        // Sunday 2024-09-22 20:00 UTC is already Monday morning in Korea.
        let now = Utc.with_ymd_and_hms(2024, 9, 22, 20, 0, 0).unwrap();

        assert_eq!(weeks_passed_at(now, epoch, &kst), 2);
        assert_eq!(
            weeks_passed_at(now, epoch, &FixedOffset::east_opt(0).unwrap()),
            1
        );
    }

    #[test]
    fn range_spans_seven_days() {
        let epoch = date(2024, 9, 16);
        for week in 1..60 {
            let range = WeekRange::for_week(week, epoch);
            assert_eq!(range.end.signed_duration_since(range.start).num_days(), 6);
            assert_eq!(calculate_weeks_passed(range.start, epoch), week);
            assert_eq!(calculate_weeks_passed(range.end, epoch), week);
        }
    }

    #[test]
    fn formats_korean_month_day() {
        let epoch = date(2024, 9, 16);
        assert_eq!(week_date_range(1, epoch), "9. 16.부터 9. 22.까지");
        assert_eq!(week_date_range(3, epoch), "9. 30.부터 10. 6.까지");
        assert_eq!(
            week_date_range(16, epoch),
            "12. 30.부터 1. 5.까지",
            "ranges crossing the new year drop the year"
        );
    }
}
