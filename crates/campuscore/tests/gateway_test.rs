//! HTTP contract tests for the university API client
//!
//! Run with: cargo test -p campuscore --test gateway_test

use campuscore::gateway::{format_date_range, UniversityApi, UniversityApiClient};
use campuscore::AppError;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> UniversityApiClient {
    UniversityApiClient::new(&server.uri()).unwrap()
}

#[tokio::test]
async fn test_get_schedule_sends_date_range_and_decodes_items() {
    let server = MockServer::start().await;
    let start = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 11, 17).unwrap();
    let range = format_date_range(start, end);
    assert_eq!(range, "15.11-17.11");

    Mock::given(method("GET"))
        .and(path("/api/v1/students/42/schedule"))
        .and(query_param("date_range", "15.11-17.11"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "schedule": [{
                "id": "1", "start": "08:30", "end": "10:00", "title": "Физика",
                "type": "lecture", "room": "301", "note": "", "audience": "full",
                "date": "15.11.2025", "teacher": "Иванов И.И.", "undergruop": null
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = client_for(&server).await.get_schedule(42, &range).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Физика");
    assert_eq!(items[0].undergroup, "");
}

#[tokio::test]
async fn test_success_false_is_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/students/42/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "services": null,
            "error": "student not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).await.get_services(42).await.unwrap_err();
    match err {
        AppError::Backend(message) => assert_eq!(message, "student not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_200_is_status_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/students/42/teachers"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.get_teachers(42).await.unwrap_err();
    match err {
        AppError::HttpStatus { status, body } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/students/42/platforms"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.get_platforms(42).await.unwrap_err();
    assert!(matches!(err, AppError::Decode(_)));
}

#[tokio::test]
async fn test_status_endpoint_has_no_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/students/7/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_linked": true,
            "student_email": "student@example.org",
            "linked_at": "2025-09-01T10:00:00"
        })))
        .mount(&server)
        .await;

    let status = client_for(&server).await.get_student_status(7).await.unwrap();
    assert!(status.is_linked);
    assert_eq!(status.student_email.as_deref(), Some("student@example.org"));
}

#[tokio::test]
async fn test_user_and_university_lookups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "user_id": 7, "university_id": 3, "first_name": "Анна"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/universities/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "name": "ЧувГУ"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let user = client.get_user(7).await.unwrap();
    assert_eq!(user.university_id, Some(3));
    let university = client.get_university(3).await.unwrap();
    assert_eq!(university.name, "ЧувГУ");
}

#[tokio::test]
async fn test_teacher_info_and_maps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/students/7/teacher/t-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "departments": ["Кафедра физики"],
            "photo": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/students/7/maps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "buildings": [{
                "name": "Корпус А", "latitude": 56.14, "longitude": 47.25,
                "yandex_map_url": "https://yandex.ru/maps/?pt=47.25,56.14",
                "gis2_map_url": "", "google_map_url": ""
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let info = client.get_teacher_info(7, "t-15").await.unwrap();
    assert_eq!(info.departments, vec!["Кафедра физики".to_string()]);
    assert_eq!(info.photo, None);

    let buildings = client.get_maps(7).await.unwrap();
    assert_eq!(buildings.len(), 1);
    assert_eq!(buildings[0].map_links().len(), 1);
}

#[tokio::test]
async fn test_personal_data_attribute_bag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/students/7/personal_data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"fam": "Петрова", "name": "Анна", "group": "ИВТ-41-22", "course": "3"}
        })))
        .mount(&server)
        .await;

    let data = client_for(&server).await.get_personal_data(7).await.unwrap();
    assert_eq!(data.full_name().as_deref(), Some("Петрова Анна"));
    assert_eq!(data.text("group").as_deref(), Some("ИВТ-41-22"));
    assert_eq!(data.text("faculty"), None);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and drop a server so the port is very likely closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let client = UniversityApiClient::new(&uri).unwrap();
    let err = client.get_maps(1).await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err:?}");
}
