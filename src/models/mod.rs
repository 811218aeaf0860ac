pub mod message;
pub mod persona;
pub mod user;

pub use message::{ChatRole, StoredMessage};
pub use persona::{Persona, SYSTEM_PROMPT_BOY, SYSTEM_PROMPT_GIRL};
pub use user::User;
