use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Строка таблицы users; создаётся лениво при первом контакте.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub user_id: i64,
    pub free_count: i32,
    pub sub_expiry: Option<NaiveDateTime>,
    pub persona: Option<String>,
}

impl User {
    pub fn new(user_id: i64) -> Self {
        User {
            user_id,
            free_count: 0,
            sub_expiry: None,
            persona: None,
        }
    }
}
