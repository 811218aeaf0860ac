use std::sync::Arc;

use crate::config::Config;
use crate::database::Database;
use crate::llm::Gpt;

/// Общее состояние, клонируемое в каждый хэндлер диспетчера.
#[derive(Clone)]
pub struct BotState {
    pub db: Database,
    pub gpt: Gpt,
    pub config: Arc<Config>,
}

impl BotState {
    pub fn new(db: Database, gpt: Gpt, config: Config) -> Self {
        BotState {
            db,
            gpt,
            config: Arc::new(config),
        }
    }
}
