pub mod mode;
pub mod operation_request;
pub mod provider_reply;
pub use mode::Mode;
pub use operation_request::*;
pub use provider_reply::{ProviderReply, ReplyField};
