pub mod text_router;

pub use text_router::{default_routes, ModeRoute, PromptRule, TextRouter};
