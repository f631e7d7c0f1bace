use super::{PageRender, Pages};
use crate::telegram::format::{header, italic};
use crate::telegram::keyboards;

impl Pages {
    /// Services and web platforms; each list degrades to empty on its own.
    pub async fn services_page(&self, user_id: i64) -> PageRender {
        let (services, platforms) = tokio::join!(self.api.get_services(user_id), self.api.get_platforms(user_id));

        let mut notes = Vec::new();
        let services = services.unwrap_or_else(|e| {
            log::warn!("Failed to load services for user {}: {}", user_id, e);
            notes.push(italic("Не удалось загрузить список сервисов"));
            Vec::new()
        });
        let platforms = platforms.unwrap_or_else(|e| {
            log::warn!("Failed to load platforms for user {}: {}", user_id, e);
            notes.push(italic("Не удалось загрузить список платформ"));
            Vec::new()
        });

        let mut text = format!("{}\n\n", header("Сервисы"));
        for note in notes {
            text.push_str(&note);
            text.push('\n');
        }

        PageRender::new(text, keyboards::services_menu(&services, &platforms, self.web_app()))
    }
}
