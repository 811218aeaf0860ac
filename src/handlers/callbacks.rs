use std::error::Error;

use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::database::Store;
use crate::handlers::utils::GENERIC_ERROR_REPLY;
use crate::models::Persona;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Some(data) = q.data.as_deref() {
        if let Some(ref message) = q.message {
            let chat_id = message.chat().id;
            let message_id = message.id();

            if let Some(raw) = data.strip_prefix("persona_") {
                // Незнакомое значение не роняет обработку, действует Girl
                let persona = Persona::parse(Some(raw));

                match state.db.update_persona(chat_id.0, persona.as_str()).await {
                    Ok(()) => {
                        let confirmation = match persona {
                            Persona::Girl => "✅ Теперь я твоя виртуальная подруга 👩",
                            Persona::Boy => "✅ Теперь я твой виртуальный друг 👨",
                        };
                        bot.edit_message_text(chat_id, message_id, confirmation).await?;
                    }
                    Err(e) => {
                        log::error!("❌ Failed to save persona for {}: {}", chat_id, e);
                        bot.send_message(chat_id, GENERIC_ERROR_REPLY).await?;
                    }
                }
            }
        }
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}
