//! In-memory stand-ins for the backend and the messenger.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use campusbot::telegram::{CallbackAnswer, CallbackRef, Messenger};
use campusbot::PageRender;
use campuscore::gateway::{
    Building, PersonalData, Platform, ScheduleItem, Service, StudentStatus, Teacher, TeacherInfo, University,
    UserProfile,
};
use campuscore::{AppError, AppResult, UniversityApi};

fn unavailable<T>(what: &str) -> AppResult<T> {
    Err(AppError::Backend(format!("{} unavailable", what)))
}

fn answer<T: Clone>(value: &Option<T>, what: &str) -> AppResult<T> {
    match value {
        Some(value) => Ok(value.clone()),
        None => unavailable(what),
    }
}

/// Backend snapshot. Every `None` field makes the matching call fail.
#[derive(Default)]
pub struct FakeApi {
    pub linked: Option<bool>,
    pub schedule: Option<Vec<ScheduleItem>>,
    pub services: Option<Vec<Service>>,
    pub platforms: Option<Vec<Platform>>,
    pub personal: Option<PersonalData>,
    pub user: Option<UserProfile>,
    pub university: Option<University>,
    pub teachers: Option<Vec<Teacher>>,
    pub teacher_info: Option<TeacherInfo>,
    pub maps: Option<Vec<Building>>,
    /// `date_range` arguments seen by `get_schedule`
    pub schedule_requests: Mutex<Vec<String>>,
}

impl FakeApi {
    /// Linked student, every data call failing.
    pub fn linked() -> Self {
        Self {
            linked: Some(true),
            ..Default::default()
        }
    }

    pub fn schedule_requests(&self) -> Vec<String> {
        self.schedule_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl UniversityApi for FakeApi {
    async fn get_schedule(&self, _user_id: i64, date_range: &str) -> AppResult<Vec<ScheduleItem>> {
        self.schedule_requests.lock().unwrap().push(date_range.to_string());
        answer(&self.schedule, "schedule")
    }

    async fn get_services(&self, _user_id: i64) -> AppResult<Vec<Service>> {
        answer(&self.services, "services")
    }

    async fn get_platforms(&self, _user_id: i64) -> AppResult<Vec<Platform>> {
        answer(&self.platforms, "platforms")
    }

    async fn get_personal_data(&self, _user_id: i64) -> AppResult<PersonalData> {
        answer(&self.personal, "personal data")
    }

    async fn get_user(&self, _user_id: i64) -> AppResult<UserProfile> {
        answer(&self.user, "user")
    }

    async fn get_university(&self, _university_id: i64) -> AppResult<University> {
        answer(&self.university, "university")
    }

    async fn get_student_status(&self, _user_id: i64) -> AppResult<StudentStatus> {
        match self.linked {
            Some(is_linked) => Ok(StudentStatus {
                is_linked,
                ..Default::default()
            }),
            None => unavailable("status"),
        }
    }

    async fn get_teachers(&self, _user_id: i64) -> AppResult<Vec<Teacher>> {
        answer(&self.teachers, "teachers")
    }

    async fn get_teacher_info(&self, _user_id: i64, _teacher_id: &str) -> AppResult<TeacherInfo> {
        answer(&self.teacher_info, "teacher info")
    }

    async fn get_maps(&self, _user_id: i64) -> AppResult<Vec<Building>> {
        answer(&self.maps, "maps")
    }
}

/// One successful outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Page { chat_id: i64, page: PageRender },
    Text { chat_id: i64, text: String },
    Answer { callback_id: String, answer: CallbackAnswer },
}

/// Records what the bot would have sent; each capability can be switched
/// to fail.
#[derive(Default)]
pub struct RecordingMessenger {
    pub sent: Mutex<Vec<Sent>>,
    pub fail_answers: AtomicBool,
    pub fail_sends: AtomicBool,
    pub answer_attempts: AtomicUsize,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_answers() -> Self {
        let messenger = Self::default();
        messenger.fail_answers.store(true, Ordering::SeqCst);
        messenger
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// The only recorded call; panics when there is not exactly one.
    pub fn single(&self) -> Sent {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one outbound call, got {:?}", sent);
        sent[0].clone()
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

fn send_failure() -> AppError {
    AppError::Validation("send failed".to_string())
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_page(&self, chat_id: i64, page: &PageRender) -> AppResult<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(send_failure());
        }
        self.record(Sent::Page {
            chat_id,
            page: page.clone(),
        });
        Ok(())
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> AppResult<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(send_failure());
        }
        self.record(Sent::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback: &CallbackRef, answer: CallbackAnswer) -> AppResult<()> {
        self.answer_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_answers.load(Ordering::SeqCst) {
            return Err(AppError::Validation("answer failed".to_string()));
        }
        self.record(Sent::Answer {
            callback_id: callback.id.clone(),
            answer,
        });
        Ok(())
    }
}
