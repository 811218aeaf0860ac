#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    pub fn parse(raw: &str) -> ChatRole {
        if raw == "assistant" {
            ChatRole::Assistant
        } else {
            ChatRole::User
        }
    }
}

/// Одна реплика диалога; строки только добавляются, порядок — по id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub role: ChatRole,
    pub content: String,
}

impl StoredMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        StoredMessage {
            role,
            content: content.into(),
        }
    }
}
