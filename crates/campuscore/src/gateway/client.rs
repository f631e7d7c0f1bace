//! reqwest-backed [`UniversityApi`] implementation.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{
    Building, Envelope, MapsResponse, PersonalData, PersonalDataResponse, Platform, PlatformsResponse, ScheduleItem,
    ScheduleResponse, Service, ServicesResponse, StudentStatus, Teacher, TeacherInfo, TeacherInfoResponse,
    TeachersResponse, University, UserProfile,
};
use super::UniversityApi;
use crate::core::config;
use crate::core::{AppError, AppResult};

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// HTTP client for the university backend.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct UniversityApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl UniversityApiClient {
    /// Creates a client with the default request timeout
    /// ([`config::network::REQUEST_TIMEOUT_SECS`]).
    pub fn new(base_url: &str) -> AppResult<Self> {
        let client = reqwest::Client::builder().timeout(config::network::timeout()).build()?;
        Self::with_client(base_url, client)
    }

    /// Creates a client on top of a preconfigured `reqwest::Client`.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> AppResult<Self> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!("not a base URL: {}", base_url)));
        }
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Validation(format!("not a base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `/api/v1/students/{user_id}/{resource}[/{extra}...]`
    fn student_endpoint(&self, user_id: i64, resource: &str, extra: &[&str]) -> AppResult<Url> {
        let user = user_id.to_string();
        let mut segments = vec![API_PREFIX[0], API_PREFIX[1], "students", user.as_str(), resource];
        segments.extend_from_slice(extra);
        self.endpoint(&segments)
    }

    /// GETs `url` and decodes a JSON body. Anything but `200 OK` is an error
    /// carrying the response body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).header(ACCEPT, "application/json").send().await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(AppError::HttpStatus { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Like [`Self::get_json`], additionally rejecting `success: false`.
    async fn get_enveloped<T: DeserializeOwned + Envelope>(&self, url: Url) -> AppResult<T> {
        let response: T = self.get_json(url).await?;
        if !response.success() {
            let message = response.error().unwrap_or("unknown error").to_string();
            return Err(AppError::Backend(message));
        }
        Ok(response)
    }
}

#[async_trait]
impl UniversityApi for UniversityApiClient {
    async fn get_schedule(&self, user_id: i64, date_range: &str) -> AppResult<Vec<ScheduleItem>> {
        let mut url = self.student_endpoint(user_id, "schedule", &[])?;
        url.query_pairs_mut().append_pair("date_range", date_range);
        let response: ScheduleResponse = self.get_enveloped(url).await?;
        Ok(response.schedule)
    }

    async fn get_services(&self, user_id: i64) -> AppResult<Vec<Service>> {
        let url = self.student_endpoint(user_id, "services", &[])?;
        let response: ServicesResponse = self.get_enveloped(url).await?;
        Ok(response.services)
    }

    async fn get_platforms(&self, user_id: i64) -> AppResult<Vec<Platform>> {
        let url = self.student_endpoint(user_id, "platforms", &[])?;
        let response: PlatformsResponse = self.get_enveloped(url).await?;
        Ok(response.platforms)
    }

    async fn get_personal_data(&self, user_id: i64) -> AppResult<PersonalData> {
        let url = self.student_endpoint(user_id, "personal_data", &[])?;
        let response: PersonalDataResponse = self.get_enveloped(url).await?;
        Ok(response.data)
    }

    async fn get_user(&self, user_id: i64) -> AppResult<UserProfile> {
        let url = self.endpoint(&[API_PREFIX[0], API_PREFIX[1], "users", &user_id.to_string()])?;
        self.get_json(url).await
    }

    async fn get_university(&self, university_id: i64) -> AppResult<University> {
        let url = self.endpoint(&[API_PREFIX[0], API_PREFIX[1], "universities", &university_id.to_string()])?;
        self.get_json(url).await
    }

    async fn get_student_status(&self, user_id: i64) -> AppResult<StudentStatus> {
        self.get_json(self.student_endpoint(user_id, "status", &[])?).await
    }

    async fn get_teachers(&self, user_id: i64) -> AppResult<Vec<Teacher>> {
        let url = self.student_endpoint(user_id, "teachers", &[])?;
        let response: TeachersResponse = self.get_enveloped(url).await?;
        Ok(response.teachers)
    }

    async fn get_teacher_info(&self, user_id: i64, teacher_id: &str) -> AppResult<TeacherInfo> {
        let url = self.student_endpoint(user_id, "teacher", &[teacher_id])?;
        let response: TeacherInfoResponse = self.get_enveloped(url).await?;
        Ok(TeacherInfo {
            departments: response.departments,
            photo: response.photo,
        })
    }

    async fn get_maps(&self, user_id: i64) -> AppResult<Vec<Building>> {
        let url = self.student_endpoint(user_id, "maps", &[])?;
        let response: MapsResponse = self.get_json(url).await?;
        Ok(response.buildings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments_without_double_slash() {
        let client = UniversityApiClient::new("https://api.example.org/").unwrap();
        let url = client.student_endpoint(42, "schedule", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.org/api/v1/students/42/schedule");
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_segments() {
        let client = UniversityApiClient::new("http://localhost:8000/proxy").unwrap();
        let url = client.student_endpoint(7, "teacher", &["a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/proxy/api/v1/students/7/teacher/a%20b%2Fc");
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(matches!(UniversityApiClient::new("not a url"), Err(AppError::Url(_))));
        assert!(matches!(
            UniversityApiClient::new("mailto:someone@example.org"),
            Err(AppError::Validation(_))
        ));
    }
}
