use campuscore::core::config::pagination::PAGE_SIZE;

use super::{page_slice, total_pages, PageRender, Pages};
use crate::telegram::format::{bold, escape, header, italic};
use crate::telegram::keyboards;

impl Pages {
    /// Paginated list of campus buildings.
    pub async fn maps_list(&self, user_id: i64, page: usize) -> PageRender {
        let buildings = match self.api.get_maps(user_id).await {
            Ok(buildings) => buildings,
            Err(e) => {
                log::warn!("Failed to load buildings for user {}: {}", user_id, e);
                return self.error_with_nav("Не удалось загрузить список корпусов.");
            }
        };

        let total = total_pages(buildings.len());
        if total == 0 {
            let text = format!("{}\n\n{}", header("Карта"), escape("Корпуса не найдены."));
            return PageRender::new(text, keyboards::maps_list_menu(&[], 0, 0, self.web_app()));
        }

        let (page, shown) = page_slice(&buildings, page);
        let first_number = page * PAGE_SIZE + 1;

        let mut text = format!("{}\n\n{}\n\n", header("Карта"), bold("Корпуса университета"));
        for (i, building) in shown.iter().enumerate() {
            text.push_str(&escape(&format!("{}) {}", first_number + i, building.name)));
            text.push('\n');
        }
        text.push('\n');
        text.push_str(&italic(&format!("Страница {} из {}", page + 1, total)));
        text.push('\n');

        PageRender::new(text, keyboards::maps_list_menu(shown, page, total, self.web_app()))
    }

    /// One building with coordinates and map links; `index` is global
    /// across list pages.
    pub async fn map_info(&self, user_id: i64, index: usize) -> PageRender {
        let buildings = match self.api.get_maps(user_id).await {
            Ok(buildings) => buildings,
            Err(e) => {
                log::warn!("Failed to load buildings for user {}: {}", user_id, e);
                return self.error_page(
                    "Не удалось загрузить информацию о корпусе.",
                    keyboards::maps_back_menu(self.web_app()),
                );
            }
        };

        let Some(building) = buildings.get(index) else {
            return self.error_page("Корпус не найден.", keyboards::maps_back_menu(self.web_app()));
        };

        let mut text = format!("{}\n\n{}\n\n", header("Карта"), bold(&building.name));
        if building.has_coordinates() {
            text.push_str(&escape(&format!(
                "Координаты: {:.6}, {:.6}",
                building.latitude, building.longitude
            )));
            text.push_str("\n\n");
        }

        PageRender::new(text, keyboards::map_info_menu(building, index, self.web_app()))
    }
}
