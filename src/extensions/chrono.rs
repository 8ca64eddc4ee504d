use crate::core::types::DayOfWeek;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub trait WeekdayExt {
    fn to_day_of_week(self) -> DayOfWeek;
}

impl WeekdayExt for Weekday {
    fn to_day_of_week(self) -> DayOfWeek {
        match self {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }
}

pub trait NaiveDateExt {
    /// Monday of the ISO week containing this date.
    fn monday(self) -> NaiveDate;
    fn day_of_week(self) -> DayOfWeek;
}

impl NaiveDateExt for NaiveDate {
    fn monday(self) -> NaiveDate {
        self - Duration::days(self.weekday().num_days_from_monday() as i64)
    }

    fn day_of_week(self) -> DayOfWeek {
        self.weekday().to_day_of_week()
    }
}
