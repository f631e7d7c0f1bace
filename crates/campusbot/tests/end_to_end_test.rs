//! Full stack: HTTP gateway against a mock backend, CSV preference file,
//! dispatcher and a recording messenger
//!
//! Run with: cargo test -p campusbot --test end_to_end_test

mod common;

use std::sync::Arc;

use campusbot::telegram::CallbackAnswer;
use campusbot::{Dispatcher, MessagePolicy, PageRender, PageSettings, Pages, Router};
use campuscore::{CsvPreferenceStore, UniversityApi, UniversityApiClient};
use common::{callback, test_today, RecordingMessenger, Sent};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: i64 = 501;

fn setup(server: &MockServer, dir: &TempDir) -> (Dispatcher, Arc<RecordingMessenger>) {
    let api: Arc<dyn UniversityApi> = Arc::new(UniversityApiClient::new(&server.uri()).unwrap());
    let store = Arc::new(CsvPreferenceStore::new(dir.path().join("subgroup_settings.csv")));
    let pages = Pages::new(Arc::clone(&api), store, PageSettings::default());
    let messenger = Arc::new(RecordingMessenger::new());
    let dispatcher = Dispatcher::new(api, Router::new(pages), messenger.clone(), MessagePolicy::MainPage)
        .with_clock(Arc::new(test_today));
    (dispatcher, messenger)
}

async fn mount_status(server: &MockServer, is_linked: bool) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/students/{}/status", USER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "is_linked": is_linked })))
        .mount(server)
        .await;
}

fn last_replaced(messenger: &RecordingMessenger) -> PageRender {
    match messenger.sent().pop() {
        Some(Sent::Answer {
            answer: CallbackAnswer::Replace(page),
            ..
        }) => page,
        other => panic!("expected a replaced page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_subgroup_choice_filters_schedule() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_status(&server, true).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/students/{}/schedule", USER)))
        .and(query_param("date_range", "15.11-17.11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "schedule": [
                { "id": "1", "start": "08:30", "end": "10:00", "title": "Матанализ", "type": "lecture",
                  "room": "101", "date": "15.11.2025", "undergruop": null },
                { "id": "2", "start": "10:10", "end": "11:40", "title": "Программирование", "type": "laboratory",
                  "room": "204", "date": "15.11.2025", "undergruop": "Подгруппа 1" },
                { "id": "3", "start": "10:10", "end": "11:40", "title": "Электроника", "type": "laboratory",
                  "room": "205", "date": "15.11.2025", "undergruop": "Подгруппа 2" }
            ]
        })))
        .mount(&server)
        .await;
    let (dispatcher, messenger) = setup(&server, &dir);

    dispatcher.handle(callback(USER, "subgroup_group2")).await.unwrap();
    let profile = last_replaced(&messenger);
    assert!(profile.text.contains("Не удалось загрузить личные данные"));
    let stored = std::fs::read_to_string(dir.path().join("subgroup_settings.csv")).unwrap();
    assert_eq!(stored, "501,group2\n");

    dispatcher.handle(callback(USER, "schedule_today")).await.unwrap();
    let page = last_replaced(&messenger);
    assert!(page.text.contains("Матанализ"));
    assert!(page.text.contains("Электроника"));
    assert!(page.text.contains("ЛБ"));
    assert!(!page.text.contains("Программирование"));
}

#[tokio::test]
async fn test_unlinked_student_sees_auth_page() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_status(&server, false).await;
    let (dispatcher, messenger) = setup(&server, &dir);

    dispatcher.handle(callback(USER, "open_services")).await.unwrap();

    let page = last_replaced(&messenger);
    assert!(page.text.contains("Авторизация"));
    assert!(!dir.path().join("subgroup_settings.csv").exists());
}

#[tokio::test]
async fn test_backend_errors_degrade_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_status(&server, true).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/students/{}/teachers", USER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "student not found"
        })))
        .mount(&server)
        .await;
    let (dispatcher, messenger) = setup(&server, &dir);

    dispatcher.handle(callback(USER, "teacher_letter_А")).await.unwrap();
    let page = last_replaced(&messenger);
    assert!(page.text.contains("Не удалось загрузить список преподавателей"));

    // Unmocked endpoint answers 404
    dispatcher.handle(callback(USER, "map_info_0")).await.unwrap();
    let page = last_replaced(&messenger);
    assert!(page.text.contains("Не удалось загрузить информацию о корпусе"));
}
