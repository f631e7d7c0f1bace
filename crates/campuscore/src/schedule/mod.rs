//! Schedule projection: the three-day window shown on the main page,
//! subgroup filtering and the two-line display format.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

mod display;
mod projector;

pub use display::{format_item, pad_right, render};
pub use projector::{group_by_date, is_common, matches_subgroup};

/// Date format used by the backend for `ScheduleItem::date`.
pub const ITEM_DATE_FORMAT: &str = "%d.%m.%Y";

/// One of the three tabs of the main page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayTab {
    #[default]
    Today,
    Tomorrow,
    AfterTomorrow,
}

impl DayTab {
    pub const ALL: [DayTab; 3] = [DayTab::Today, DayTab::Tomorrow, DayTab::AfterTomorrow];

    /// Days after today.
    pub fn offset(self) -> i64 {
        match self {
            DayTab::Today => 0,
            DayTab::Tomorrow => 1,
            DayTab::AfterTomorrow => 2,
        }
    }

    /// Relative day name shown in the schedule section title.
    pub fn label(self) -> &'static str {
        match self {
            DayTab::Today => "сегодня",
            DayTab::Tomorrow => "завтра",
            DayTab::AfterTomorrow => "послезавтра",
        }
    }
}

/// Short Russian weekday label (`пн`, `вт`, ...).
pub fn weekday_short(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "вс",
        Weekday::Mon => "пн",
        Weekday::Tue => "вт",
        Weekday::Wed => "ср",
        Weekday::Thu => "чт",
        Weekday::Fri => "пт",
        Weekday::Sat => "сб",
    }
}

/// The three consecutive dates the main page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDays {
    pub today: NaiveDate,
    pub tomorrow: NaiveDate,
    pub after_tomorrow: NaiveDate,
}

impl ScheduleDays {
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            today,
            tomorrow: today + Duration::days(DayTab::Tomorrow.offset()),
            after_tomorrow: today + Duration::days(DayTab::AfterTomorrow.offset()),
        }
    }

    pub fn date(&self, tab: DayTab) -> NaiveDate {
        match tab {
            DayTab::Today => self.today,
            DayTab::Tomorrow => self.tomorrow,
            DayTab::AfterTomorrow => self.after_tomorrow,
        }
    }

    pub fn dates(&self) -> [NaiveDate; 3] {
        [self.today, self.tomorrow, self.after_tomorrow]
    }

    /// `DD.MM-DD.MM` covering the whole window.
    pub fn date_range(&self) -> String {
        crate::gateway::format_date_range(self.today, self.after_tomorrow)
    }

    /// `сегодня, пт` style title for a tab.
    pub fn tab_title(&self, tab: DayTab) -> String {
        format!("{}, {}", tab.label(), weekday_short(self.date(tab)))
    }
}
