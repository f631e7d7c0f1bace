use campuscore::gateway::{PersonalData, UserProfile};

use super::{PageRender, Pages};
use crate::telegram::format::{escape, header, italic, separator};
use crate::telegram::keyboards;

/// Labelled blocks below the grade-book section, in display order.
const DETAILS: [(&str, &str); 5] = [
    ("Факультет", "faculty"),
    ("Специальность", "spec"),
    ("Профиль", "profile"),
    ("Группа", "group"),
    ("Номер зачётки", "zachetka"),
];

impl Pages {
    /// Student profile. Every lookup is optional: whatever loads is shown,
    /// the rest is skipped.
    pub async fn profile_page(&self, user_id: i64) -> PageRender {
        let mode = self.preferences.get(user_id).await;
        let (personal, user) = tokio::join!(self.api.get_personal_data(user_id), self.api.get_user(user_id));

        let personal = personal
            .map_err(|e| log::warn!("Failed to load personal data for user {}: {}", user_id, e))
            .ok();
        let university = self.university_name(user_id, user).await;

        let mut lines = vec![header("Профиль"), String::new(), separator()];
        if let Some(name) = university {
            lines.push(escape(&name));
        }
        lines.push(separator());

        if let Some(data) = &personal {
            if let Some(name) = data.full_name() {
                lines.push(escape(&name));
            }
            if let Some(course) = data.text("course") {
                lines.push(escape(&format!("Студент, {} курс", course)));
            }
        }
        lines.push(separator());

        let attribute = |key: &str| {
            personal
                .as_ref()
                .and_then(|data| data.text(key))
                .unwrap_or_else(|| "-".to_string())
        };
        lines.push(escape("Зачётка"));
        lines.push(escape(&format!("🟦 {} ср. балл", attribute("avg_grade"))));
        lines.push(String::new());
        lines.push(escape("Долги"));
        lines.push(escape(&format!("😎 {} долгов", attribute("debts"))));
        lines.push(separator());

        if let Some(data) = &personal {
            lines.extend(detail_blocks(data));
        }
        lines.push(separator());

        lines.push(escape(&format!("ID: {}", user_id)));
        if let Some(data) = &personal {
            if let Some(phone) = data.text("phone") {
                lines.push(escape(&format!("Телефон: {}", phone)));
            }
            if let Some(birthday) = data.text("birthday") {
                lines.push(escape(&format!("Дата рождения: {}", birthday)));
            }
        } else {
            lines.push(italic("Не удалось загрузить личные данные"));
        }

        let keyboard = keyboards::profile_menu(mode, self.settings.admin_panel_url.as_deref(), self.web_app());
        PageRender::new(lines.join("\n"), keyboard)
    }

    async fn university_name(&self, user_id: i64, user: campuscore::AppResult<UserProfile>) -> Option<String> {
        let university_id = match user {
            Ok(profile) => profile.university_id?,
            Err(e) => {
                log::warn!("Failed to load user {}: {}", user_id, e);
                return None;
            }
        };
        match self.api.get_university(university_id).await {
            Ok(university) => Some(university.name).filter(|name| !name.trim().is_empty()),
            Err(e) => {
                log::warn!("Failed to load university {} for user {}: {}", university_id, user_id, e);
                None
            }
        }
    }
}

/// `--Факультет--` style blocks separated by blank lines.
fn detail_blocks(data: &PersonalData) -> Vec<String> {
    let mut lines = Vec::new();
    for (label, key) in DETAILS {
        let Some(value) = data.text(key) else {
            continue;
        };
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(escape(&format!("--{}--", label)));
        lines.push(escape(&value));
    }
    lines
}
