pub mod health;
pub mod text_handlers;
