pub mod bot_state;
pub mod chat;
pub mod config;
pub mod database;
pub mod entitlement;
pub mod error;
pub mod handlers;
pub mod history;
pub mod llm;
pub mod models;
