pub mod api;
pub mod gateway;

pub use api::{Chat, ChatApi, ChatError, MemberRole, Message, Update, User};
pub use gateway::ChatGateway;
