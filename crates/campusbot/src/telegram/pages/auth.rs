use super::{PageRender, Pages};
use crate::telegram::format::{bold, escape, header};
use crate::telegram::keyboards;

impl Pages {
    /// Shown instead of any page while the account is not linked.
    pub fn auth_page(&self) -> PageRender {
        let text = format!(
            "{}\n\n{}\n\n{}",
            header("Авторизация"),
            bold("Для использования бота необходимо авторизоваться в системе."),
            escape("Пожалуйста, войдите в веб-приложение для авторизации.")
        );
        PageRender::new(text, keyboards::auth_menu(self.web_app()))
    }
}
