use chrono::NaiveDateTime;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::models::Persona;

pub const GENERIC_ERROR_REPLY: &str =
    "Извините, произошла ошибка. Пожалуйста, попробуйте еще раз.";
pub const UPGRADE_NOTICE: &str =
    "🔒 Бесплатные сообщения закончились!\nОформи подписку 👉 /subscribe";
pub const FREE_TIER_PREFIX: &str = "(Бесплатно)";

/// Клавиатура выбора персонажа
pub fn persona_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(
            "👩 Девушка",
            format!("persona_{}", Persona::Girl.as_str()),
        ),
        InlineKeyboardButton::callback("👨 Парень", format!("persona_{}", Persona::Boy.as_str())),
    ]])
}

/// Дата окончания подписки в формате ДД.ММ.ГГГГ
pub fn format_expiry(expiry: NaiveDateTime) -> String {
    expiry.format("%d.%m.%Y").to_string()
}
