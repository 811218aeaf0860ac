use std::error::Error;

use chrono::Utc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot_state::BotState;
use crate::database::Store;
use crate::entitlement;
use crate::handlers::utils::{format_expiry, persona_keyboard, GENERIC_ERROR_REPLY};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "начать и выбрать персонажа")]
    Start,
    #[command(description = "показать помощь")]
    Help,
    #[command(description = "оформить подписку")]
    Subscribe,
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cmd {
        Command::Start => handle_start(bot, msg, state).await?,
        Command::Help => handle_help(bot, msg).await?,
        Command::Subscribe => handle_subscribe(bot, msg, state).await?,
    }
    Ok(())
}

async fn handle_start(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let user_id = msg.chat.id.0;
    if let Err(e) = state.db.get_or_create_user(user_id).await {
        log::error!("❌ Failed to create user {}: {}", user_id, e);
        bot.send_message(msg.chat.id, GENERIC_ERROR_REPLY).await?;
        return Ok(());
    }

    bot.send_message(
        msg.chat.id,
        "Привет 👋 Я виртуальная подруга!\nВыбери, кто будет с тобой общаться:",
    )
    .reply_markup(persona_keyboard())
    .await?;

    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> Result<(), Box<dyn Error + Send + Sync>> {
    bot.send_message(
        msg.chat.id,
        "🫂 Помощь по боту\n\n\
         /start — начать и выбрать персонажа\n\
         /subscribe — оформить подписку\n\n\
         Просто напиши сообщение, и я отвечу. Без подписки доступно \
         ограниченное число бесплатных сообщений.",
    )
    .await?;

    Ok(())
}

async fn handle_subscribe(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let user_id = msg.chat.id.0;
    // Оплаты нет: команда просто выставляет срок от текущего момента
    let expiry =
        entitlement::subscription_expiry(Utc::now().naive_utc(), state.config.sub_duration_days);

    let activated = async {
        state.db.get_or_create_user(user_id).await?;
        state.db.update_sub_expiry(user_id, Some(expiry)).await
    }
    .await;

    match activated {
        Ok(()) => {
            log::info!("Subscription activated for user {} until {}", user_id, expiry);
            bot.send_message(
                msg.chat.id,
                format!("✅ Подписка активирована до {}!", format_expiry(expiry)),
            )
            .await?;
        }
        Err(e) => {
            log::error!("❌ Failed to activate subscription for {}: {}", user_id, e);
            bot.send_message(msg.chat.id, GENERIC_ERROR_REPLY).await?;
        }
    }

    Ok(())
}
