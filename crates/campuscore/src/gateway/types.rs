//! Wire types of the university REST API.
//!
//! The backend is a Python service whose optional fields are serialized as
//! `null`, so every string/list field goes through [`null_as_default`].

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Deserializes `null` (or a missing field, together with `#[serde(default)]`)
/// into `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope shared by the endpoints that report `success`.
pub(crate) trait Envelope {
    fn success(&self) -> bool;
    fn error(&self) -> Option<&str>;
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(impl Envelope for $ty {
            fn success(&self) -> bool {
                self.success
            }

            fn error(&self) -> Option<&str> {
                self.error.as_deref()
            }
        })*
    };
}

/// One lesson of the schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Raw lesson type: `lecture`, `practice`, `laboratory`/`lab`, or anything else
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub room: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    /// `full`, `subgroup1`, `subgroup2` or empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub audience: String,
    /// `DD.MM.YYYY`, no time zone
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teacher: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_info: String,
    /// The backend spells this key `undergruop`.
    #[serde(rename = "undergruop", alias = "undergroup", default, deserialize_with = "null_as_default")]
    pub undergroup: String,
}

/// Lesson type as shown in the second schedule line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonKind {
    Lecture,
    Practice,
    Lab,
    Other(String),
}

impl LessonKind {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "lecture" => LessonKind::Lecture,
            "practice" => LessonKind::Practice,
            "laboratory" | "lab" => LessonKind::Lab,
            other => LessonKind::Other(other.to_string()),
        }
    }

    pub fn abbreviation(&self) -> &str {
        match self {
            LessonKind::Lecture => "ЛК",
            LessonKind::Practice => "ПР",
            LessonKind::Lab => "ЛБ",
            LessonKind::Other(raw) => raw,
        }
    }
}

impl ScheduleItem {
    pub fn lesson_kind(&self) -> LessonKind {
        LessonKind::from_raw(&self.kind)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScheduleResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule: Vec<ScheduleItem>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A student service or a web platform. Platforms usually carry a URL,
/// services usually do not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, deserialize_with = "null_as_default")]
    pub emoji: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Service {
    /// Button caption: emoji and name separated by a space.
    pub fn caption(&self) -> String {
        format!("{} {}", self.emoji, self.name).trim().to_string()
    }
}

pub type Platform = Service;

#[derive(Debug, Deserialize)]
pub(crate) struct ServicesResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<Service>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlatformsResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Loosely typed personal attributes (`fam`, `name`, `patronymic`, `course`,
/// `faculty`, `group`, `phone`, ...). Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalData(pub HashMap<String, serde_json::Value>);

impl PersonalData {
    /// Returns the attribute as trimmed text; numbers are rendered as-is,
    /// empty strings and other JSON types count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            serde_json::Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// `fam name patronymic`, skipping the missing parts.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<String> = ["fam", "name", "patronymic"]
            .iter()
            .filter_map(|key| self.text(key))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonalDataResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: PersonalData,
    #[serde(default)]
    pub error: Option<String>,
}

/// Messenger user as registered in the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub university_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct University {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Whether the messenger account is linked to a student account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentStatus {
    #[serde(default)]
    pub is_linked: bool,
    #[serde(default)]
    pub student_email: Option<String>,
    #[serde(default)]
    pub linked_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeachersResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub departments: Vec<String>,
    /// base64 data URI
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeacherInfoResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub departments: Vec<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A campus building with links to map providers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub yandex_map_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gis2_map_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub google_map_url: String,
}

impl Building {
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }

    /// Provider name and URL for every non-empty map link, in display order.
    pub fn map_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("Яндекс Карты", self.yandex_map_url.as_str()),
            ("2ГИС", self.gis2_map_url.as_str()),
            ("Google Maps", self.google_map_url.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MapsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub buildings: Vec<Building>,
}

impl_envelope!(
    ScheduleResponse,
    ServicesResponse,
    PlatformsResponse,
    PersonalDataResponse,
    TeachersResponse,
    TeacherInfoResponse,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_item_accepts_nulls_and_misspelled_undergroup() {
        let json = r#"{
            "id": "1", "start": "08:30", "end": "10:00", "title": "Физика",
            "type": "lecture", "room": null, "note": null, "audience": "full",
            "date": "15.11.2025", "teacher": "Иванов И.И.", "undergruop": "Подгруппа 1"
        }"#;
        let item: ScheduleItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.room, "");
        assert_eq!(item.undergroup, "Подгруппа 1");
        assert_eq!(item.lesson_kind(), LessonKind::Lecture);
    }

    #[test]
    fn test_lesson_kind_abbreviations() {
        assert_eq!(LessonKind::from_raw("practice").abbreviation(), "ПР");
        assert_eq!(LessonKind::from_raw("laboratory").abbreviation(), "ЛБ");
        assert_eq!(LessonKind::from_raw("lab").abbreviation(), "ЛБ");
        assert_eq!(LessonKind::from_raw("экзамен").abbreviation(), "экзамен");
    }

    #[test]
    fn test_personal_data_text_and_full_name() {
        let data: PersonalData = serde_json::from_str(
            r#"{"fam": "Петров", "name": "Пётр", "patronymic": null, "course": 3, "group": "  "}"#,
        )
        .unwrap();
        assert_eq!(data.full_name().as_deref(), Some("Петров Пётр"));
        assert_eq!(data.text("course").as_deref(), Some("3"));
        assert_eq!(data.text("group"), None);
        assert_eq!(data.text("phone"), None);
    }

    #[test]
    fn test_building_map_links_skip_empty() {
        let building = Building {
            name: "Корпус 1".to_string(),
            latitude: 56.1,
            longitude: 47.2,
            yandex_map_url: "https://yandex.ru/maps/1".to_string(),
            gis2_map_url: String::new(),
            google_map_url: "https://maps.google.com/1".to_string(),
        };
        let providers: Vec<&str> = building.map_links().into_iter().map(|(name, _)| name).collect();
        assert_eq!(providers, vec!["Яндекс Карты", "Google Maps"]);
        assert!(building.has_coordinates());
    }
}
