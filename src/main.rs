use teloxide::prelude::*;

use friendbot::bot_state::BotState;
use friendbot::config::Config;
use friendbot::database::{Database, Store};
use friendbot::handlers::{callback_handler, command_handler, message_handler, Command};
use friendbot::llm::Gpt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Загружаем .env и инициализируем логирование
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting friendbot...");

    // Отсутствие обязательных переменных — фатально, процесс не стартует
    let config = Config::from_env()?;

    let db = Database::new(&config.database_url).await?;
    db.ensure_schema().await?;
    log::info!("✅ Database initialized");

    let bot = Bot::new(config.telegram_token.clone());
    let gpt = Gpt::new(config.openrouter_key.clone());
    let state = BotState::new(db, gpt, config);

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher stopped");
    Ok(())
}
