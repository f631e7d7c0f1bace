//! Builders shared by the page, router and dispatcher tests.

#![allow(dead_code)]

use std::sync::Arc;

use campusbot::telegram::{CallbackRef, Messenger};
use campusbot::{Dispatcher, InboundUpdate, MessagePolicy, PageSettings, Pages, Router};
use campuscore::gateway::{Building, ScheduleItem};
use campuscore::{MemoryPreferenceStore, PreferenceStore, UniversityApi};
use chrono::NaiveDate;
use teloxide::types::{InlineKeyboardButtonKind, InlineKeyboardMarkup};

pub const TEST_WEB_APP: &str = "https://app.example.edu";

/// Saturday, 15 November 2025.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 15).unwrap()
}

/// Pages over `api` with an in-memory preference store and no web app.
pub fn pages(api: Arc<dyn UniversityApi>) -> (Pages, Arc<MemoryPreferenceStore>) {
    let store = Arc::new(MemoryPreferenceStore::new());
    let preferences: Arc<dyn PreferenceStore> = store.clone();
    (Pages::new(api, preferences, PageSettings::default()), store)
}

pub fn dispatcher(
    api: Arc<dyn UniversityApi>,
    messenger: Arc<dyn Messenger>,
    policy: MessagePolicy,
) -> (Dispatcher, Arc<MemoryPreferenceStore>) {
    let (pages, store) = pages(Arc::clone(&api));
    let dispatcher = Dispatcher::new(api, Router::new(pages), messenger, policy).with_clock(Arc::new(test_today));
    (dispatcher, store)
}

pub fn callback(user_id: i64, payload: &str) -> InboundUpdate {
    InboundUpdate::Callback {
        user_id,
        callback: CallbackRef {
            id: format!("cb-{}", payload),
            chat_id: user_id,
            message_id: Some(100),
        },
        payload: payload.to_string(),
    }
}

pub fn item(id: &str, date: &str, title: &str, undergroup: &str) -> ScheduleItem {
    ScheduleItem {
        id: id.to_string(),
        start: "08:30".to_string(),
        end: "10:00".to_string(),
        title: title.to_string(),
        kind: "lecture".to_string(),
        room: "301".to_string(),
        date: date.to_string(),
        undergroup: undergroup.to_string(),
        ..Default::default()
    }
}

pub fn building(name: &str) -> Building {
    Building {
        name: name.to_string(),
        ..Default::default()
    }
}

/// Callback payloads per row; URL buttons as `url:<url>`.
pub fn payloads(keyboard: &InlineKeyboardMarkup) -> Vec<Vec<String>> {
    keyboard
        .inline_keyboard
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| match &button.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                    InlineKeyboardButtonKind::Url(url) => format!("url:{}", url),
                    other => format!("{:?}", other),
                })
                .collect()
        })
        .collect()
}

pub fn texts(keyboard: &InlineKeyboardMarkup) -> Vec<Vec<String>> {
    keyboard
        .inline_keyboard
        .iter()
        .map(|row| row.iter().map(|button| button.text.clone()).collect())
        .collect()
}
