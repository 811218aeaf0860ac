pub const SYSTEM_PROMPT_GIRL: &str =
    "Ты милая девушка, поддерживающая разговор. Будь доброй, позитивной, тактичной, без 18+.";
pub const SYSTEM_PROMPT_BOY: &str =
    "Ты умный и добрый парень, поддерживающий разговор. Будь дружелюбным, тактичным, без 18+.";

/// Выбранный пользователем стиль общения. Пока персонаж не выбран
/// (или в базе лежит неизвестное значение), действует Girl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persona {
    #[default]
    Girl,
    Boy,
}

impl Persona {
    /// Тотальный разбор: любое незнакомое значение сводится к Girl.
    pub fn parse(raw: Option<&str>) -> Persona {
        match raw {
            Some("boy") => Persona::Boy,
            _ => Persona::Girl,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Girl => "girl",
            Persona::Boy => "boy",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Persona::Girl => SYSTEM_PROMPT_GIRL,
            Persona::Boy => SYSTEM_PROMPT_BOY,
        }
    }
}
