use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display},
    sync::OnceLock,
};
use time::{Date as TimeDate, Duration as TimeDuration, Month, format_description::FormatItem};

static FORMAT: OnceLock<Option<Vec<FormatItem<'static>>>> = OnceLock::new();

///
/// Date
///
/// Calendar date stored as whole days since 1970-01-01.
/// Transported as the raw day count, so every `i32` survives encoding.
///

#[derive(Clone, Copy, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Date(i32);

impl Date {
    pub const EPOCH: Self = Self(0);

    const fn epoch_date() -> TimeDate {
        match TimeDate::from_calendar_date(1970, Month::January, 1) {
            Ok(d) => d,
            Err(_) => unreachable!(),
        }
    }

    #[must_use]
    pub const fn from_days(days: i32) -> Self {
        Self(days)
    }

    #[must_use]
    pub fn new_checked(y: i32, m: u8, d: u8) -> Option<Self> {
        let month = Month::try_from(m).ok()?;
        let date = TimeDate::from_calendar_date(y, month, d).ok()?;
        Some(Self::from_time_date(date))
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Calendar year, clamped to the representable calendar range.
    #[must_use]
    pub fn year(self) -> i32 {
        self.to_time_date_clamped().year()
    }

    #[must_use]
    pub fn month(self) -> u8 {
        self.to_time_date_clamped().month().into()
    }

    #[must_use]
    pub fn day(self) -> u8 {
        self.to_time_date_clamped().day()
    }

    /// Parse an ISO `YYYY-MM-DD` string into a `Date`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let format = FORMAT
            .get_or_init(|| time::format_description::parse("[year]-[month]-[day]").ok())
            .as_ref()?;

        TimeDate::parse(s, format).ok().map(Self::from_time_date)
    }

    #[expect(clippy::cast_possible_truncation)]
    fn from_time_date(date: TimeDate) -> Self {
        let days = (date - Self::epoch_date()).whole_days();
        Self(days as i32)
    }

    fn to_time_date(self) -> Option<TimeDate> {
        let delta = TimeDuration::days(self.0.into());
        Self::epoch_date().checked_add(delta)
    }

    fn to_time_date_clamped(self) -> TimeDate {
        self.to_time_date().unwrap_or({
            if self.0 >= 0 {
                TimeDate::MAX
            } else {
                TimeDate::MIN
            }
        })
    }
}

impl Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({self})")
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // outside the calendar range the day count is the only exact form
        let Some(d) = self.to_time_date() else {
            return write!(f, "epoch{:+}d", self.0);
        };
        let month: u8 = d.month().into();
        write!(f, "{:04}-{:02}-{:02}", d.year(), month, d.day())
    }
}

///
/// TESTS
///
