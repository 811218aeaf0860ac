use std::error::Error;

use teloxide::prelude::*;
use teloxide::types::ChatAction;

use crate::bot_state::BotState;
use crate::chat::{self, ChatReply};
use crate::handlers::utils::{FREE_TIER_PREFIX, GENERIC_ERROR_REPLY, UPGRADE_NOTICE};

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    // Команды уже обработаны в command_handler
    if text.starts_with('/') {
        return Ok(());
    }

    let user_id = msg.chat.id.0;
    let _ = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await;

    match chat::respond(&state.db, &state.gpt, &state.config, user_id, text).await {
        Ok(ChatReply::Answer { text: reply, free_tier }) => {
            let outgoing = if free_tier {
                format!("{} {}", FREE_TIER_PREFIX, reply)
            } else {
                reply
            };
            bot.send_message(msg.chat.id, outgoing).await?;
        }
        Ok(ChatReply::LimitReached) => {
            bot.send_message(msg.chat.id, UPGRADE_NOTICE).await?;
        }
        Err(e) => {
            // Ошибка одного сообщения не должна валить цикл обработки
            log::error!("❌ Chat turn failed for user {}: {}", user_id, e);
            bot.send_message(msg.chat.id, GENERIC_ERROR_REPLY).await?;
        }
    }

    Ok(())
}
