//! Backend data gateway
//!
//! Typed access to the university REST API. Everything above this module
//! talks to [`UniversityApi`] so tests can swap the HTTP client for a fake.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::AppResult;

pub mod client;
pub mod types;

pub use client::UniversityApiClient;
pub use types::{
    Building, LessonKind, PersonalData, Platform, ScheduleItem, Service, StudentStatus, Teacher, TeacherInfo,
    University, UserProfile,
};

/// Read-only queries against the university backend.
///
/// Every method is independent and may fail with [`crate::AppError`];
/// callers decide how to degrade.
#[async_trait]
pub trait UniversityApi: Send + Sync {
    /// Lessons for the given `DD.MM-DD.MM` range, see [`format_date_range`].
    async fn get_schedule(&self, user_id: i64, date_range: &str) -> AppResult<Vec<ScheduleItem>>;

    async fn get_services(&self, user_id: i64) -> AppResult<Vec<Service>>;

    async fn get_platforms(&self, user_id: i64) -> AppResult<Vec<Platform>>;

    async fn get_personal_data(&self, user_id: i64) -> AppResult<PersonalData>;

    async fn get_user(&self, user_id: i64) -> AppResult<UserProfile>;

    async fn get_university(&self, university_id: i64) -> AppResult<University>;

    /// Link status between the messenger account and a student account.
    async fn get_student_status(&self, user_id: i64) -> AppResult<StudentStatus>;

    async fn get_teachers(&self, user_id: i64) -> AppResult<Vec<Teacher>>;

    async fn get_teacher_info(&self, user_id: i64, teacher_id: &str) -> AppResult<TeacherInfo>;

    async fn get_maps(&self, user_id: i64) -> AppResult<Vec<Building>>;
}

/// Formats an inclusive date range the way the schedule endpoint expects it:
/// `DD.MM-DD.MM`.
///
/// # Example
///
/// ```
/// use campuscore::gateway::format_date_range;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 11, 17).unwrap();
/// assert_eq!(format_date_range(start, end), "15.11-17.11");
/// ```
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{}-{}", start.format("%d.%m"), end.format("%d.%m"))
}
