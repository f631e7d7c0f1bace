use campuscore::schedule::{self, DayTab, ScheduleDays};
use chrono::NaiveDate;
use itertools::Itertools;

use super::{PageRender, Pages};
use crate::telegram::format::{escape, header, italic, section, separator};
use crate::telegram::keyboards;

const NO_LESSONS: &str = "Занятия на этот день отсутствуют";

impl Pages {
    /// Main page: the schedule of one of the three tabs starting at `today`.
    ///
    /// A schedule that cannot be loaded renders as an empty day with a note,
    /// the tab keyboard stays usable.
    pub async fn main_page(&self, user_id: i64, tab: DayTab, today: NaiveDate) -> PageRender {
        let days = ScheduleDays::starting(today);
        let keyboard = keyboards::main_page_menu(&days, tab, self.web_app());

        let mut text = format!(
            "{}\n\n{} {}\n",
            header("Главная"),
            section("Расписание"),
            italic(&format!("({})", days.tab_title(tab)))
        );

        let items = match self.api.get_schedule(user_id, &days.date_range()).await {
            Ok(items) => items,
            Err(e) => {
                log::warn!("Failed to load schedule for user {}: {}", user_id, e);
                text.push_str(&format!(
                    "{}\n{}\n{}",
                    separator(),
                    escape(NO_LESSONS),
                    italic("Не удалось загрузить расписание")
                ));
                return PageRender::new(text, keyboard);
            }
        };

        let mode = self.preferences.get(user_id).await;
        let grouped = schedule::group_by_date(&items, &days, mode);
        let lines = grouped
            .get(&days.date(tab))
            .map(|items| schedule::render(items))
            .unwrap_or_default();

        text.push('\n');
        if lines.is_empty() {
            text.push_str(&escape(NO_LESSONS));
            text.push('\n');
        } else {
            let between = format!("\n{}\n", separator());
            text.push_str(&lines.iter().map(|line| escape(line)).join(&between));
        }

        PageRender::new(text, keyboard)
    }
}
