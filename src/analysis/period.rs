//! Rolling look-back windows anchored at the current time.

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

/// How far back from now transactions are shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    /// The last twelve months.
    #[default]
    Year,
    /// The last four months.
    Semester,
    /// The last month.
    Month,
}

impl Period {
    /// Every period, shortest first.
    pub const ALL: [Period; 3] = [Period::Month, Period::Semester, Period::Year];

    /// The length of the window in calendar months.
    pub fn months(self) -> u32 {
        match self {
            Period::Year => 12,
            Period::Semester => 4,
            Period::Month => 1,
        }
    }

    /// The earliest date and time inside the window ending at `now`.
    pub fn boundary(self, now: PrimitiveDateTime) -> PrimitiveDateTime {
        subtract_months(now, self.months())
    }

    /// Whether `date` falls inside the window ending at `now`.
    ///
    /// The boundary is inclusive and there is no upper bound, so future
    /// dated transactions are inside every window.
    pub fn contains(self, date: PrimitiveDateTime, now: PrimitiveDateTime) -> bool {
        date >= self.boundary(now)
    }

    /// The value used for this period in URL queries.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Period::Year => "year",
            Period::Semester => "semester",
            Period::Month => "month",
        }
    }

    /// The text shown to the user for this period.
    pub fn label(self) -> &'static str {
        match self {
            Period::Year => "Past year",
            Period::Semester => "Past semester",
            Period::Month => "Past month",
        }
    }
}

/// Move `datetime` back by `months` calendar months.
///
/// When the day does not exist in the target month it is clamped to the
/// last day of that month, e.g. 31 March minus one month is the end of
/// February. Dates before the earliest representable year saturate.
fn subtract_months(datetime: PrimitiveDateTime, months: u32) -> PrimitiveDateTime {
    let date = datetime.date();
    let month_index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - months as i32;
    let year = month_index.div_euclid(12);
    let month = time::Month::January.nth_next(month_index.rem_euclid(12) as u8);

    let day = date.day().min(time::util::days_in_month(month, year));

    Date::from_calendar_date(year, month, day)
        .map(|date| PrimitiveDateTime::new(date, datetime.time()))
        .unwrap_or(PrimitiveDateTime::MIN)
}
