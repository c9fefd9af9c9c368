use chrono::{Datelike, Local, Months, NaiveDate};

/// Number of days in `month` (1-12) of `year`.
///
/// Computed as the day-of-month of "day 0 of the next month", i.e. the last
/// day of the requested month.
pub fn days_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Weekday index of the 1st of `month`, counted from Sunday (= 0).
pub fn first_weekday_offset(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map_or(0, |first| first.weekday().num_days_from_sunday())
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month before `date`'s month.
pub fn prev_month_start(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_sub_months(Months::new(1))
        .unwrap_or_else(|| {
            log::warn!("{} has no previous month, staying put", date);
            date
        })
}

/// First day of the month after `date`'s month.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .unwrap_or_else(|| {
            log::warn!("{} has no next month, staying put", date);
            date
        })
}

/// `date` with its day-of-month replaced, if that day exists in the month.
pub fn with_day(date: NaiveDate, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), day)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_of_month(2024, 2), 29);
        assert_eq!(days_of_month(2023, 2), 28);
        assert_eq!(days_of_month(1900, 2), 28);
        assert_eq!(days_of_month(2000, 2), 29);
        assert_eq!(days_of_month(2024, 4), 30);
        assert_eq!(days_of_month(2024, 1), 31);
        assert_eq!(days_of_month(2024, 12), 31);
    }

    #[test]
    fn weekday_offset_is_sunday_based() {
        // 2024-03-01 is a Friday
        assert_eq!(first_weekday_offset(2024, 3), 5);
        // 2023-10-01 is a Sunday
        assert_eq!(first_weekday_offset(2023, 10), 0);
        // 2024-06-01 is a Saturday
        assert_eq!(first_weekday_offset(2024, 6), 6);
    }

    #[test]
    fn navigation_resets_day() {
        assert_eq!(prev_month_start(ymd(2024, 3, 31)), ymd(2024, 2, 1));
        assert_eq!(next_month_start(ymd(2024, 1, 31)), ymd(2024, 2, 1));
    }

    #[test]
    fn navigation_rolls_years() {
        assert_eq!(prev_month_start(ymd(2024, 1, 15)), ymd(2023, 12, 1));
        assert_eq!(next_month_start(ymd(2023, 12, 15)), ymd(2024, 1, 1));
    }

    #[test]
    fn next_then_prev_lands_on_first_of_original_month() {
        let mut date = ymd(1999, 1, 1);
        while date < ymd(2001, 1, 1) {
            assert_eq!(prev_month_start(next_month_start(date)), month_start(date));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn navigation_at_range_limits_is_a_noop() {
        assert_eq!(next_month_start(NaiveDate::MAX), NaiveDate::MAX);
        assert_eq!(prev_month_start(NaiveDate::MIN), NaiveDate::MIN);
    }

    #[test]
    fn replacing_day() {
        assert_eq!(with_day(ymd(2024, 2, 10), 29), Some(ymd(2024, 2, 29)));
        assert_eq!(with_day(ymd(2023, 2, 10), 29), None);
    }
}
