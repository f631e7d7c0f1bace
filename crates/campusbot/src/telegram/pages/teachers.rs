use campuscore::gateway::Teacher;

use super::{page_slice, total_pages, PageRender, Pages};
use crate::telegram::format::{bold, escape, header, italic, section};
use crate::telegram::keyboards;

/// Uppercased first character of a name, if any.
pub(crate) fn first_letter(name: &str) -> Option<String> {
    name.trim().chars().next().map(|c| c.to_uppercase().collect())
}

impl Pages {
    /// Letter picker of the teacher directory.
    pub fn teachers_alphabet(&self) -> PageRender {
        let text = format!(
            "{}\n\n{}\n{}\n",
            header("Преподаватели"),
            bold("Поиск преподавателя по ФИО:"),
            escape("Пример: если надо найти Обломов Игорь Александрович, надо нажать на О")
        );
        PageRender::new(text, keyboards::teachers_alphabet_menu(self.web_app()))
    }

    /// Teachers whose name starts with `letter`, `PAGE_SIZE` per page.
    /// Out-of-range pages are clamped to the last one.
    pub async fn teachers_list(&self, user_id: i64, letter: &str, page: usize) -> PageRender {
        let teachers = match self.api.get_teachers(user_id).await {
            Ok(teachers) => teachers,
            Err(e) => {
                log::warn!("Failed to load teachers for user {}: {}", user_id, e);
                return self.error_with_nav("Не удалось загрузить список преподавателей.");
            }
        };

        let wanted = letter.to_uppercase();
        let matching: Vec<Teacher> = teachers
            .into_iter()
            .filter(|teacher| first_letter(&teacher.name).as_deref() == Some(wanted.as_str()))
            .collect();

        let title = bold(&format!("Преподаватели на \"{}\"", letter));
        let total = total_pages(matching.len());
        if total == 0 {
            let text = format!(
                "{}\n\n{}\n\n{}",
                header("Преподаватели"),
                title,
                escape("Не найдено преподавателей, начинающихся с этой буквы.")
            );
            return PageRender::new(text, keyboards::teachers_alphabet_menu(self.web_app()));
        }

        let (page, shown) = page_slice(&matching, page);
        let first_number = page * campuscore::core::config::pagination::PAGE_SIZE + 1;

        let mut text = format!("{}\n\n{}\n\n", header("Преподаватели"), title);
        for (i, teacher) in shown.iter().enumerate() {
            text.push_str(&escape(&format!("{}) {}", first_number + i, teacher.name)));
            text.push('\n');
        }
        text.push('\n');
        text.push_str(&italic(&format!("Страница {} из {}", page + 1, total)));
        text.push('\n');

        PageRender::new(
            text,
            keyboards::teachers_list_menu(shown, letter, page, total, self.web_app()),
        )
    }

    /// Teacher details; the name comes from the directory listing.
    pub async fn teacher_info(&self, user_id: i64, teacher_id: &str) -> PageRender {
        let (info, teachers) = tokio::join!(
            self.api.get_teacher_info(user_id, teacher_id),
            self.api.get_teachers(user_id)
        );

        let info = match info {
            Ok(info) => info,
            Err(e) => {
                log::warn!("Failed to load teacher {} for user {}: {}", teacher_id, user_id, e);
                return self.error_page(
                    "Не удалось загрузить информацию о преподавателе.",
                    keyboards::teachers_alphabet_menu(self.web_app()),
                );
            }
        };

        let name = match teachers {
            Ok(teachers) => teachers
                .into_iter()
                .find(|teacher| teacher.id == teacher_id)
                .map(|teacher| teacher.name)
                .filter(|name| !name.trim().is_empty()),
            Err(e) => {
                log::warn!("Failed to load teacher names for user {}: {}", user_id, e);
                None
            }
        };
        let letter = name.as_deref().and_then(first_letter);

        let mut text = format!(
            "{}\n\n{}\n\n",
            header("Информация о преподавателе"),
            bold(name.as_deref().unwrap_or("Преподаватель"))
        );
        if !info.departments.is_empty() {
            text.push_str(&section("Кафедры"));
            text.push('\n');
            for department in &info.departments {
                text.push_str(&escape(&format!("• {}", department)));
                text.push('\n');
            }
        }

        PageRender::new(text, keyboards::teacher_info_menu(letter.as_deref(), self.web_app()))
    }
}
