#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use friendbot::config::Config;
use friendbot::database::Store;
use friendbot::error::BotError;
use friendbot::llm::ChatModel;
use friendbot::models::{ChatRole, StoredMessage, User};

pub fn test_config() -> Config {
    Config {
        telegram_token: "token".to_string(),
        openrouter_key: "key".to_string(),
        database_url: String::new(),
        free_limit: 5,
        sub_duration_days: 30,
        max_history: 10,
    }
}

/// Хранилище в памяти с теми же контрактными свойствами, что у Postgres.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<MemState>,
}

#[derive(Default)]
struct MemState {
    users: HashMap<i64, User>,
    messages: Vec<(i64, StoredMessage)>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, user_id: i64) -> Option<User> {
        self.inner.lock().unwrap().users.get(&user_id).cloned()
    }

    pub fn message_count(&self, user_id: i64) -> usize {
        self.inner
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|(id, _)| *id == user_id)
            .count()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn ensure_schema(&self) -> Result<(), BotError> {
        Ok(())
    }

    async fn get_or_create_user(&self, user_id: i64) -> Result<User, BotError> {
        let mut state = self.inner.lock().unwrap();
        Ok(state
            .users
            .entry(user_id)
            .or_insert_with(|| User::new(user_id))
            .clone())
    }

    async fn update_free_count(&self, user_id: i64, count: i32) -> Result<(), BotError> {
        if let Some(user) = self.inner.lock().unwrap().users.get_mut(&user_id) {
            user.free_count = count;
        }
        Ok(())
    }

    async fn update_sub_expiry(
        &self,
        user_id: i64,
        expiry: Option<NaiveDateTime>,
    ) -> Result<(), BotError> {
        if let Some(user) = self.inner.lock().unwrap().users.get_mut(&user_id) {
            user.sub_expiry = expiry;
        }
        Ok(())
    }

    async fn update_persona(&self, user_id: i64, persona: &str) -> Result<(), BotError> {
        if let Some(user) = self.inner.lock().unwrap().users.get_mut(&user_id) {
            user.persona = Some(persona.to_string());
        }
        Ok(())
    }

    async fn append_message(
        &self,
        user_id: i64,
        role: ChatRole,
        content: &str,
    ) -> Result<(), BotError> {
        self.inner
            .lock()
            .unwrap()
            .messages
            .push((user_id, StoredMessage::new(role, content)));
        Ok(())
    }

    async fn fetch_recent_messages(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<StoredMessage>, BotError> {
        let state = self.inner.lock().unwrap();
        let mine: Vec<StoredMessage> = state
            .messages
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, message)| message.clone())
            .collect();
        let skip = mine.len().saturating_sub(limit as usize);
        Ok(mine.into_iter().skip(skip).collect())
    }

    async fn trim_messages(&self, user_id: i64, keep_limit: i64) -> Result<(), BotError> {
        let mut state = self.inner.lock().unwrap();
        let total = state
            .messages
            .iter()
            .filter(|(id, _)| *id == user_id)
            .count();
        let mut excess = total.saturating_sub(keep_limit as usize);
        // retain идёт от старых к новым, лишние уходят с головы
        state.messages.retain(|(id, _)| {
            if *id == user_id && excess > 0 {
                excess -= 1;
                false
            } else {
                true
            }
        });
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub history_len: usize,
    pub user_text: String,
}

enum FakeMode {
    Reply(String),
    Fail,
}

/// Модель по сценарию: фиксированный ответ или фиксированный отказ.
pub struct FakeGpt {
    mode: FakeMode,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeGpt {
    pub fn replying(text: &str) -> Self {
        FakeGpt {
            mode: FakeMode::Reply(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        FakeGpt {
            mode: FakeMode::Fail,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for FakeGpt {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[StoredMessage],
        user_text: &str,
    ) -> Result<String, BotError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            history_len: history.len(),
            user_text: user_text.to_string(),
        });
        match &self.mode {
            FakeMode::Reply(text) => Ok(text.clone()),
            FakeMode::Fail => Err(BotError::ModelError("scripted failure".to_string())),
        }
    }
}
