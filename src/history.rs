//! Окно контекста и удержание истории в заданных пределах.

use crate::database::Store;
use crate::error::BotError;
use crate::models::{ChatRole, StoredMessage};

/// Контекст для модели: не больше `window` самых свежих сообщений,
/// от старых к новым.
pub async fn build_context(
    store: &dyn Store,
    user_id: i64,
    window: i64,
) -> Result<Vec<StoredMessage>, BotError> {
    store.fetch_recent_messages(user_id, window).await
}

/// Ровно две записи за один обмен: сначала пользователь, затем ассистент.
pub async fn record_turn(
    store: &dyn Store,
    user_id: i64,
    user_text: &str,
    assistant_text: &str,
) -> Result<(), BotError> {
    store.append_message(user_id, ChatRole::User, user_text).await?;
    store
        .append_message(user_id, ChatRole::Assistant, assistant_text)
        .await
}

/// Храним вдвое больше окна: запас на случай расширения контекста
/// без немедленной потери уже накопленной истории.
pub async fn enforce_retention(
    store: &dyn Store,
    user_id: i64,
    window: i64,
) -> Result<(), BotError> {
    store.trim_messages(user_id, window * 2).await
}
