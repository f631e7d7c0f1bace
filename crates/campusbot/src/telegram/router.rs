//! Navigation state machine.
//!
//! There is no stored "current page": the page to show next is derived from
//! the tapped button's token alone. Tokens are a closed vocabulary; anything
//! unrecognized leads back to the main page.

use campuscore::schedule::DayTab;
use campuscore::SubgroupMode;
use chrono::NaiveDate;

use super::pages::{PageRender, Pages};

const TEACHER_LETTER: &str = "teacher_letter_";
const TEACHER_PAGE: &str = "teacher_page_";
const TEACHER_INFO: &str = "teacher_info_";
const MAPS_PAGE: &str = "maps_page_";
const MAP_INFO: &str = "map_info_";
const SERVICE: &str = "service_";
const PLATFORM: &str = "platform_";
const SUBGROUP: &str = "subgroup_";

/// A button payload, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenMain,
    Home,
    Back,
    Schedule(DayTab),
    OpenServices,
    OpenProfile,
    Subgroup(SubgroupMode),
    OpenTeachers,
    ServiceTeachers,
    TeacherLetter(String),
    TeacherPage { letter: String, page: usize },
    TeacherInfo(String),
    OpenMaps,
    ServiceMaps,
    MapsPage(usize),
    MapInfo(usize),
    WebAppInfo,
    /// Pagination sentinel for unreachable targets
    Disabled,
    ServicesHeader,
    PlatformsHeader,
    /// `service_<key>` without a page of its own
    Service(String),
    /// `platform_<key>` without a URL
    Platform(String),
    Unknown(String),
}

/// First character of `s`, as a string.
fn first_char(s: &str) -> Option<String> {
    s.chars().next().map(String::from)
}

/// Page numbers that do not parse count as the first page.
fn parse_page(s: &str) -> usize {
    s.trim().parse().unwrap_or(0)
}

impl Action {
    /// Button target for a backend service key.
    pub fn service(key: &str) -> Self {
        match key {
            "teachers" => Action::ServiceTeachers,
            "maps" => Action::ServiceMaps,
            other => Action::Service(other.to_string()),
        }
    }

    pub fn platform(key: &str) -> Self {
        Action::Platform(key.to_string())
    }

    pub fn parse(token: &str) -> Self {
        match token {
            "open_main" => return Action::OpenMain,
            "home" => return Action::Home,
            "back" => return Action::Back,
            "schedule_today" => return Action::Schedule(DayTab::Today),
            "schedule_tomorrow" => return Action::Schedule(DayTab::Tomorrow),
            "schedule_after_tomorrow" => return Action::Schedule(DayTab::AfterTomorrow),
            "open_services" => return Action::OpenServices,
            "open_profile" => return Action::OpenProfile,
            "open_teachers" => return Action::OpenTeachers,
            "service_teachers" => return Action::ServiceTeachers,
            "open_maps" => return Action::OpenMaps,
            "service_maps" => return Action::ServiceMaps,
            "web_app_info" => return Action::WebAppInfo,
            "disabled" => return Action::Disabled,
            "services_header" => return Action::ServicesHeader,
            "platforms_header" => return Action::PlatformsHeader,
            _ => {}
        }

        let unknown = || Action::Unknown(token.to_string());

        if let Some(mode) = token.strip_prefix(SUBGROUP) {
            return mode.parse().map(Action::Subgroup).unwrap_or_else(|_| unknown());
        }
        if let Some(rest) = token.strip_prefix(TEACHER_LETTER) {
            return first_char(rest).map(Action::TeacherLetter).unwrap_or_else(unknown);
        }
        if let Some(rest) = token.strip_prefix(TEACHER_PAGE) {
            // Letters are multi-byte, so only the last `_` separates the page.
            return match rest.rsplit_once('_').and_then(|(letter, page)| Some((first_char(letter)?, page))) {
                Some((letter, page)) => Action::TeacherPage {
                    letter,
                    page: parse_page(page),
                },
                None => unknown(),
            };
        }
        if let Some(id) = token.strip_prefix(TEACHER_INFO) {
            return if id.is_empty() {
                unknown()
            } else {
                Action::TeacherInfo(id.to_string())
            };
        }
        if let Some(page) = token.strip_prefix(MAPS_PAGE) {
            return Action::MapsPage(parse_page(page));
        }
        if let Some(index) = token.strip_prefix(MAP_INFO) {
            return index.trim().parse().map(Action::MapInfo).unwrap_or_else(|_| unknown());
        }
        if let Some(key) = token.strip_prefix(SERVICE) {
            return Action::service(key);
        }
        if let Some(key) = token.strip_prefix(PLATFORM) {
            return Action::platform(key);
        }

        unknown()
    }

    /// Callback payload carried by a button.
    pub fn token(&self) -> String {
        match self {
            Action::OpenMain => "open_main".to_string(),
            Action::Home => "home".to_string(),
            Action::Back => "back".to_string(),
            Action::Schedule(DayTab::Today) => "schedule_today".to_string(),
            Action::Schedule(DayTab::Tomorrow) => "schedule_tomorrow".to_string(),
            Action::Schedule(DayTab::AfterTomorrow) => "schedule_after_tomorrow".to_string(),
            Action::OpenServices => "open_services".to_string(),
            Action::OpenProfile => "open_profile".to_string(),
            Action::Subgroup(mode) => format!("{}{}", SUBGROUP, mode),
            Action::OpenTeachers => "open_teachers".to_string(),
            Action::ServiceTeachers => "service_teachers".to_string(),
            Action::TeacherLetter(letter) => format!("{}{}", TEACHER_LETTER, letter),
            Action::TeacherPage { letter, page } => format!("{}{}_{}", TEACHER_PAGE, letter, page),
            Action::TeacherInfo(id) => format!("{}{}", TEACHER_INFO, id),
            Action::OpenMaps => "open_maps".to_string(),
            Action::ServiceMaps => "service_maps".to_string(),
            Action::MapsPage(page) => format!("{}{}", MAPS_PAGE, page),
            Action::MapInfo(index) => format!("{}{}", MAP_INFO, index),
            Action::WebAppInfo => "web_app_info".to_string(),
            Action::Disabled => "disabled".to_string(),
            Action::ServicesHeader => "services_header".to_string(),
            Action::PlatformsHeader => "platforms_header".to_string(),
            Action::Service(key) => format!("{}{}", SERVICE, key),
            Action::Platform(key) => format!("{}{}", PLATFORM, key),
            Action::Unknown(token) => token.clone(),
        }
    }
}

/// What to do with a callback.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// Replace the message with this page.
    Render(PageRender),
    /// Only answer the callback, optionally with a transient notification.
    Notify(Option<String>),
}

/// Maps actions to page renders.
#[derive(Clone)]
pub struct Router {
    pages: Pages,
}

impl Router {
    pub fn new(pages: Pages) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    /// Resolves `action` for `user_id`. `today` anchors the schedule tabs.
    pub async fn route(&self, user_id: i64, action: &Action, today: NaiveDate) -> RouteOutcome {
        let pages = &self.pages;
        let page = match action {
            Action::OpenMain | Action::Home | Action::Back => pages.main_page(user_id, DayTab::Today, today).await,
            Action::Schedule(tab) => pages.main_page(user_id, *tab, today).await,
            Action::OpenServices => pages.services_page(user_id).await,
            Action::OpenProfile => pages.profile_page(user_id).await,
            Action::Subgroup(mode) => {
                if let Err(e) = pages.preferences().set(user_id, *mode).await {
                    log::error!("Failed to store subgroup mode {} for user {}: {}", mode, user_id, e);
                }
                pages.profile_page(user_id).await
            }
            Action::OpenTeachers | Action::ServiceTeachers => pages.teachers_alphabet(),
            Action::TeacherLetter(letter) => pages.teachers_list(user_id, letter, 0).await,
            Action::TeacherPage { letter, page } => pages.teachers_list(user_id, letter, *page).await,
            Action::TeacherInfo(id) => pages.teacher_info(user_id, id).await,
            Action::OpenMaps | Action::ServiceMaps => pages.maps_list(user_id, 0).await,
            Action::MapsPage(page) => pages.maps_list(user_id, *page).await,
            Action::MapInfo(index) => pages.map_info(user_id, *index).await,
            Action::WebAppInfo => {
                let text = match pages.settings().web_app_url.as_deref() {
                    Some(url) => format!("Веб-приложение доступно по ссылке: {}", url),
                    None => "Веб-приложение пока недоступно".to_string(),
                };
                return RouteOutcome::Notify(Some(text));
            }
            Action::Disabled | Action::ServicesHeader | Action::PlatformsHeader => return RouteOutcome::Notify(None),
            Action::Service(_) | Action::Platform(_) => {
                return RouteOutcome::Notify(Some("Этот раздел доступен в веб-приложении".to_string()));
            }
            Action::Unknown(token) => {
                log::info!("Unknown action {:?} from user {}, showing main page", token, user_id);
                pages.main_page(user_id, DayTab::Today, today).await
            }
        };
        RouteOutcome::Render(page)
    }
}
