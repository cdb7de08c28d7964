use std::sync::Arc;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc, Weekday};

/// Source of the current instant, swappable in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

pub fn local_today(now: DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    now.with_timezone(offset).date_naive()
}

pub fn local_weekday(now: DateTime<Utc>, offset: &FixedOffset) -> Weekday {
    now.with_timezone(offset).weekday()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn weekday_follows_offset() {
        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        // Friday 16:00 UTC is Saturday 01:00 in Korea.
        let now = Utc.with_ymd_and_hms(2024, 9, 20, 16, 0, 0).unwrap();

        assert_eq!(now.weekday(), Weekday::Fri);
        assert_eq!(local_weekday(now, &kst), Weekday::Sat);
        assert_eq!(
            local_today(now, &kst),
            NaiveDate::from_ymd_opt(2024, 9, 21).unwrap()
        );
    }
}
