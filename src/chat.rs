//! Обработка одного входящего сообщения: доступ, контекст, вызов
//! модели, учёт. Независима от Telegram, поэтому проверяется в тестах
//! на подменённых хранилище и модели.

use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;

use crate::config::Config;
use crate::database::Store;
use crate::entitlement::{self, Entitlement};
use crate::error::BotError;
use crate::history;
use crate::llm::ChatModel;
use crate::models::Persona;

const MODEL_CALL_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Answer { text: String, free_tier: bool },
    LimitReached,
}

pub async fn respond(
    store: &dyn Store,
    model: &dyn ChatModel,
    config: &Config,
    user_id: i64,
    text: &str,
) -> Result<ChatReply, BotError> {
    let user = store.get_or_create_user(user_id).await?;
    let context = history::build_context(store, user_id, config.max_history).await?;
    let persona = Persona::parse(user.persona.as_deref());

    let entitlement = entitlement::classify(&user, Utc::now().naive_utc(), config.free_limit);
    if entitlement == Entitlement::Exhausted {
        return Ok(ChatReply::LimitReached);
    }

    let reply = match timeout(
        MODEL_CALL_TIMEOUT,
        model.complete(persona.system_prompt(), &context, text),
    )
    .await
    {
        Ok(result) => result?,
        Err(_) => {
            return Err(BotError::ModelUnavailable(format!(
                "no response within {}s",
                MODEL_CALL_TIMEOUT.as_secs()
            )))
        }
    };

    // Учёт и история — только после успешного ответа модели.
    // Инкремент читай-считай-пиши без транзакции: параллельные
    // сообщения одного пользователя могут потерять единицу счётчика.
    if entitlement == Entitlement::FreeAllowed {
        store
            .update_free_count(user_id, user.free_count + 1)
            .await?;
    }
    history::record_turn(store, user_id, text, &reply).await?;
    history::enforce_retention(store, user_id, config.max_history).await?;

    Ok(ChatReply::Answer {
        text: reply,
        free_tier: entitlement == Entitlement::FreeAllowed,
    })
}
