//! Inline keyboard builders for every page.
//!
//! Button captions are plain text (Telegram does not parse markup in them);
//! callback payloads always come from [`Action::token`].

use campuscore::core::config::pagination::PAGE_SIZE;
use campuscore::gateway::{Building, Platform, Service, Teacher};
use campuscore::schedule::{weekday_short, DayTab, ScheduleDays};
use campuscore::SubgroupMode;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

use super::router::Action;

/// Cyrillic letters offered by the teacher directory.
pub const ALPHABET: [&str; 30] = [
    "А", "Б", "В", "Г", "Д", "Е", "Ё", "Ж", "З", "И", "Й", "К", "Л", "М", "Н", "О", "П", "Р", "С", "Т", "У", "Ф", "Х",
    "Ц", "Ч", "Ш", "Щ", "Э", "Ю", "Я",
];

const ALPHABET_ROW: usize = 6;
const CHECK: &str = "✅";

/// Which section of the bottom navigation row is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    Main,
    Services,
    Profile,
}

pub fn cb(text: impl Into<String>, action: &Action) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.into(), action.token())
}

fn checked(label: &str, active: bool) -> String {
    if active {
        format!("{} {}", CHECK, label)
    } else {
        label.to_string()
    }
}

/// `🏠 Главная | 🔧 Сервисы | 👤 Профиль`, the active entry replaced by a checkmark.
pub fn nav_row(active: Option<NavTab>) -> Vec<InlineKeyboardButton> {
    let entry = |tab: NavTab, emoji: &str, label: &str, action: Action| {
        let text = if active == Some(tab) {
            format!("{} {}", CHECK, label)
        } else {
            format!("{} {}", emoji, label)
        };
        cb(text, &action)
    };
    vec![
        entry(NavTab::Main, "🏠", "Главная", Action::Home),
        entry(NavTab::Services, "🔧", "Сервисы", Action::OpenServices),
        entry(NavTab::Profile, "👤", "Профиль", Action::OpenProfile),
    ]
}

/// Decorative row pointing to the web application; absent when no web app
/// is configured.
pub fn web_app_row(web_app_url: Option<&str>) -> Option<Vec<InlineKeyboardButton>> {
    web_app_url.map(|_| vec![cb("👇 Открыть веб-приложение", &Action::WebAppInfo)])
}

fn finish(
    mut rows: Vec<Vec<InlineKeyboardButton>>,
    active: Option<NavTab>,
    web_app_url: Option<&str>,
) -> InlineKeyboardMarkup {
    rows.push(nav_row(active));
    rows.extend(web_app_row(web_app_url));
    InlineKeyboardMarkup::new(rows)
}

/// Navigation only; used by degraded pages.
pub fn nav_menu(web_app_url: Option<&str>) -> InlineKeyboardMarkup {
    finish(Vec::new(), None, web_app_url)
}

pub fn main_page_menu(days: &ScheduleDays, active: DayTab, web_app_url: Option<&str>) -> InlineKeyboardMarkup {
    let tabs: Vec<InlineKeyboardButton> = DayTab::ALL
        .iter()
        .map(|&tab| cb(checked(weekday_short(days.date(tab)), tab == active), &Action::Schedule(tab)))
        .collect();
    finish(vec![tabs], Some(NavTab::Main), web_app_url)
}

fn service_button(service: &Service) -> InlineKeyboardButton {
    cb(service.caption(), &Action::service(&service.key))
}

/// Platforms open directly when they carry a valid URL.
fn platform_button(platform: &Platform) -> InlineKeyboardButton {
    match platform.url.as_deref().map(str::trim).filter(|u| !u.is_empty()).map(Url::parse) {
        Some(Ok(url)) => InlineKeyboardButton::url(platform.caption(), url),
        _ => cb(platform.caption(), &Action::platform(&platform.key)),
    }
}

pub fn services_menu(services: &[Service], platforms: &[Platform], web_app_url: Option<&str>) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![cb("---Основные сервисы---", &Action::ServicesHeader)]];

    let has_teachers = services.iter().any(|s| s.key == "teachers");
    let mut chats_row = None;
    for pair in services.chunks(2) {
        if pair.iter().any(|s| s.key == "chats") {
            chats_row = Some(rows.len());
        }
        rows.push(pair.iter().map(service_button).collect());
    }

    let mut extras = vec![cb("🎭 Клубы", &Action::service("clubs"))];
    if !has_teachers {
        extras.push(cb("👨‍🏫 Преподаватели", &Action::ServiceTeachers));
    }
    match chats_row {
        Some(index) => rows[index].extend(extras),
        None => rows.push(extras),
    }

    rows.push(vec![cb("---Веб платформы---", &Action::PlatformsHeader)]);
    rows.extend(platforms.chunks(2).map(|pair| pair.iter().map(platform_button).collect()));

    finish(rows, Some(NavTab::Services), web_app_url)
}

pub fn profile_menu(mode: SubgroupMode, admin_panel_url: Option<&str>, web_app_url: Option<&str>) -> InlineKeyboardMarkup {
    let subgroups: Vec<InlineKeyboardButton> = [
        (SubgroupMode::Full, "Вся группа"),
        (SubgroupMode::Group1, "Подгруппа 1"),
        (SubgroupMode::Group2, "Подгруппа 2"),
    ]
    .iter()
    .map(|&(option, label)| cb(checked(label, option == mode), &Action::Subgroup(option)))
    .collect();

    let mut rows = vec![subgroups, nav_row(Some(NavTab::Profile))];
    if let Some(url) = admin_panel_url {
        match Url::parse(url) {
            Ok(url) => rows.push(vec![InlineKeyboardButton::url("🔐 Открыть админ панель", url)]),
            Err(e) => log::warn!("Ignoring invalid admin panel URL {:?}: {}", url, e),
        }
    }
    rows.extend(web_app_row(web_app_url));
    InlineKeyboardMarkup::new(rows)
}

pub fn auth_menu(web_app_url: Option<&str>) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![cb("🔄 Проверить снова", &Action::OpenMain)]];
    rows.extend(web_app_row(web_app_url));
    InlineKeyboardMarkup::new(rows)
}

pub fn teachers_alphabet_menu(web_app_url: Option<&str>) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = ALPHABET
        .chunks(ALPHABET_ROW)
        .map(|letters| {
            letters
                .iter()
                .map(|letter| cb(*letter, &Action::TeacherLetter((*letter).to_string())))
                .collect()
        })
        .collect();
    finish(rows, None, web_app_url)
}

/// `Иванов Иван Иванович` -> `Иванов И.И.`; at most three initials.
pub fn short_teacher_name(full_name: &str) -> String {
    let mut words = full_name.split_whitespace();
    let Some(surname) = words.next() else {
        return full_name.to_string();
    };
    let initials: String = words
        .take(3)
        .filter_map(|word| word.chars().next())
        .map(|c| format!("{}.", c))
        .collect();
    if initials.is_empty() {
        surname.to_string()
    } else {
        format!("{} {}", surname, initials)
    }
}

/// `|<< < Стр #N > >>|`; unreachable targets become the `disabled` sentinel.
pub fn pagination_row(page: usize, total_pages: usize, to_page: impl Fn(usize) -> Action) -> Vec<InlineKeyboardButton> {
    let has_prev = page > 0;
    let has_next = page + 1 < total_pages;
    let target = |enabled: bool, page: usize| if enabled { to_page(page) } else { Action::Disabled };

    vec![
        cb("|<<", &target(has_prev, 0)),
        cb("<", &target(has_prev, page.saturating_sub(1))),
        cb(format!("Стр #{}", page + 1), &Action::Disabled),
        cb(">", &target(has_next, page + 1)),
        cb(">>|", &target(has_next, total_pages.saturating_sub(1))),
    ]
}

/// `teachers` is the current page slice; numbering continues across pages.
pub fn teachers_list_menu(
    teachers: &[Teacher],
    letter: &str,
    page: usize,
    total_pages: usize,
    web_app_url: Option<&str>,
) -> InlineKeyboardMarkup {
    let first_number = page * PAGE_SIZE + 1;
    let mut rows: Vec<Vec<InlineKeyboardButton>> = teachers
        .iter()
        .enumerate()
        .map(|(i, teacher)| {
            cb(
                format!("{}) {}", first_number + i, short_teacher_name(&teacher.name)),
                &Action::TeacherInfo(teacher.id.clone()),
            )
        })
        .collect::<Vec<_>>()
        .chunks(2)
        .map(<[InlineKeyboardButton]>::to_vec)
        .collect();

    rows.push(pagination_row(page, total_pages, |p| Action::TeacherPage {
        letter: letter.to_string(),
        page: p,
    }));
    finish(rows, None, web_app_url)
}

/// Back to the teacher's letter when known, otherwise to the alphabet.
pub fn teacher_info_menu(letter: Option<&str>, web_app_url: Option<&str>) -> InlineKeyboardMarkup {
    let back = match letter {
        Some(letter) => cb(format!("⬅️ К букве {}", letter), &Action::TeacherLetter(letter.to_string())),
        None => cb("⬅️ К алфавиту", &Action::OpenTeachers),
    };
    finish(vec![vec![back]], None, web_app_url)
}

/// `buildings` is the current page slice.
pub fn maps_list_menu(
    buildings: &[Building],
    page: usize,
    total_pages: usize,
    web_app_url: Option<&str>,
) -> InlineKeyboardMarkup {
    let first_index = page * PAGE_SIZE;
    let mut rows: Vec<Vec<InlineKeyboardButton>> = buildings
        .iter()
        .enumerate()
        .map(|(i, building)| {
            cb(
                format!("{}) {}", first_index + i + 1, building.name),
                &Action::MapInfo(first_index + i),
            )
        })
        .collect::<Vec<_>>()
        .chunks(2)
        .map(<[InlineKeyboardButton]>::to_vec)
        .collect();

    if total_pages > 0 {
        rows.push(pagination_row(page, total_pages, Action::MapsPage));
    }
    finish(rows, None, web_app_url)
}

/// One URL button per map provider plus a way back to the list page that
/// contains the building.
pub fn map_info_menu(building: &Building, index: usize, web_app_url: Option<&str>) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = building
        .map_links()
        .into_iter()
        .filter_map(|(provider, link)| match Url::parse(link.trim()) {
            Ok(url) => Some(vec![InlineKeyboardButton::url(provider, url)]),
            Err(e) => {
                log::warn!("Skipping invalid {} link for {:?}: {}", provider, building.name, e);
                None
            }
        })
        .collect();
    rows.push(vec![cb("⬅️ К списку корпусов", &Action::MapsPage(index / PAGE_SIZE))]);
    finish(rows, None, web_app_url)
}

/// Back to the first list page; used when a building cannot be shown.
pub fn maps_back_menu(web_app_url: Option<&str>) -> InlineKeyboardMarkup {
    finish(vec![vec![cb("⬅️ К списку корпусов", &Action::MapsPage(0))]], None, web_app_url)
}
