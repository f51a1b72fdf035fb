pub mod conversation;
pub mod scenario;
pub mod transcript;
